//! List trait for fetching collections of resources.

use async_trait::async_trait;

use crate::client::CycleClient;
use crate::error::Result;
use crate::jsonapi::{Collection, Resource};
use crate::pagination::{Page, PageParams};
use crate::query::QueryParams;
use crate::response::ApiResponse;
use crate::traits::ResourceType;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List resources with filtering and pagination support.
///
/// # Example
///
/// ```ignore
/// use cycleapi::{CycleClient, List, PageParams, QueryParams, Repos};
///
/// let client = CycleClient::from_env()?;
///
/// // Fetch a single page
/// let page = Repos::list_page(&client, &QueryParams::new(), PageParams::new(1, 50)).await?;
///
/// // Fetch all pages
/// let all_repos = Repos::list_all(&client, &QueryParams::new()).await?;
/// ```
#[async_trait]
pub trait List: ResourceType {
    /// Fetch the collection with whatever paging the server defaults to.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    async fn list(
        client: &CycleClient,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<Collection<Self::Attributes>>> {
        client.get(Self::PATH, query).await
    }

    /// Fetch a single page of the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    async fn list_page(
        client: &CycleClient,
        query: &QueryParams,
        page: PageParams,
    ) -> Result<ApiResponse<Page<Resource<Self::Attributes>>>> {
        let query = query.clone().page(page);
        let response = client
            .get::<Collection<Self::Attributes>>(Self::PATH, Some(&query))
            .await?;
        Ok(response.map(|document| Page::from_document(document, page)))
    }

    /// Fetch every page of the collection.
    ///
    /// Stops at the first failed page and returns that failure.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails at the transport level.
    async fn list_all(
        client: &CycleClient,
        query: &QueryParams,
    ) -> Result<ApiResponse<Vec<Resource<Self::Attributes>>>> {
        let mut all_items = Vec::new();
        let mut page = PageParams::default();

        loop {
            let result = match Self::list_page(client, query, page).await? {
                ApiResponse::Success { document } => document,
                ApiResponse::Failure { errors } => return Ok(ApiResponse::Failure { errors }),
            };
            let has_more = result.has_more && !result.is_empty();
            all_items.extend(result.items);

            if !has_more {
                break;
            }
            page = page.next();

            // Safety limit to prevent infinite loops
            if page.number > MAX_PAGES {
                tracing::warn!(
                    "Reached pagination limit of {} pages, stopping",
                    MAX_PAGES
                );
                break;
            }
        }

        Ok(ApiResponse::Success {
            document: all_items,
        })
    }
}
