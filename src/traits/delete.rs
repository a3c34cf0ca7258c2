//! Delete trait.

use async_trait::async_trait;

use crate::client::CycleClient;
use crate::error::Result;
use crate::query::QueryParams;
use crate::response::ApiResponse;
use crate::task::TaskDocument;
use crate::traits::ResourceType;

/// Delete a resource.
///
/// Deletion is asynchronous on the backend: the response, when the server
/// sends one, is the task tracking the deletion.
#[async_trait]
pub trait Delete: ResourceType {
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    async fn delete(
        client: &CycleClient,
        id: &str,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<Option<TaskDocument>>> {
        client.delete(&Self::item_path(id)?, query).await
    }
}
