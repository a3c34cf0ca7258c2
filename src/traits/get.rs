//! Get trait for fetching single resources.

use async_trait::async_trait;

use crate::client::CycleClient;
use crate::error::Result;
use crate::jsonapi::Single;
use crate::query::QueryParams;
use crate::response::ApiResponse;
use crate::traits::ResourceType;

/// Fetch a single resource by id.
///
/// # Example
///
/// ```ignore
/// use cycleapi::{Containers, CycleClient, Get};
///
/// let client = CycleClient::from_env()?;
/// let container = Containers::get(&client, "5c8a...", None).await?;
/// ```
#[async_trait]
pub trait Get: ResourceType {
    /// Fetch the resource by id.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a usable item id, if no response
    /// could be obtained or if the success body could not be parsed; a
    /// missing resource is a `Failure`.
    async fn get(
        client: &CycleClient,
        id: &str,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<Single<Self::Attributes>>> {
        client.get(&Self::item_path(id)?, query).await
    }
}
