//! Update trait for modifying resources.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::CycleClient;
use crate::error::Result;
use crate::jsonapi::{Document, FormattedDoc, Resource, Single};
use crate::query::QueryParams;
use crate::response::ApiResponse;
use crate::traits::ResourceType;

/// Update an existing resource with a PATCH.
///
/// # Example
///
/// ```ignore
/// use cycleapi::{CycleClient, Repos, Update, UpdateRepo};
///
/// let client = CycleClient::from_env()?;
/// let updated = Repos::update(
///     &client,
///     "repo-id",
///     &UpdateRepo {
///         name: Some("New Name".to_string()),
///         ..Default::default()
///     },
///     None,
/// ).await?;
/// ```
#[async_trait]
pub trait Update: ResourceType {
    /// Parameters for the update.
    type Params: Serialize + Send + Sync;

    /// Build the request document; carries the id of the updated resource.
    fn update_document<'a>(
        id: &str,
        params: &'a Self::Params,
    ) -> Document<Resource<&'a Self::Params>> {
        FormattedDoc::new(Self::TYPE).id(id).attributes(params).build()
    }

    /// Update the resource and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    async fn update(
        client: &CycleClient,
        id: &str,
        params: &Self::Params,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<Single<Self::Attributes>>> {
        let document = Self::update_document(id, params);
        client.patch(&Self::item_path(id)?, &document, query).await
    }
}
