//! Create trait for adding resources to a collection.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::CycleClient;
use crate::error::Result;
use crate::jsonapi::{Document, FormattedDoc, Resource, Single};
use crate::query::QueryParams;
use crate::response::ApiResponse;
use crate::traits::ResourceType;

/// Create a new resource.
///
/// The default body sends `params` as the attribute bag without an id.
/// Resources with relationships override [`create_document`](Self::create_document).
#[async_trait]
pub trait Create: ResourceType {
    /// Parameters for the new resource.
    type Params: Serialize + Send + Sync;

    /// Build the request document for `params`.
    fn create_document(params: &Self::Params) -> Document<Resource<&Self::Params>> {
        FormattedDoc::new(Self::TYPE).attributes(params).build()
    }

    /// Create the resource and return the server's representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    async fn create(
        client: &CycleClient,
        params: &Self::Params,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<Single<Self::Attributes>>> {
        let document = Self::create_document(params);
        client.post(Self::PATH, &document, query).await
    }
}
