//! Datacenters.

use serde::{Deserialize, Serialize};

use crate::cache::{OptionSet, ResponseCache, DEFAULT_TTL};
use crate::client::CycleClient;
use crate::error::Result;
use crate::jsonapi::Collection;
use crate::query::QueryParams;
use crate::response::ApiResponse;
use crate::traits::{Get, List, ResourceType};

const CACHE_KEY: &str = "datacenters";

/// The `datacenters` resource kind.
#[derive(Debug, Clone, Copy)]
pub struct Datacenters;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatacenterAttributes {
    pub name: String,
    pub provider: String,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub continent: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl ResourceType for Datacenters {
    const TYPE: &'static str = "datacenters";
    const PATH: &'static str = "datacenters";
    type Attributes = DatacenterAttributes;
}

impl List for Datacenters {}

impl Get for Datacenters {}

impl Datacenters {
    /// List datacenters, reusing a response fetched moments ago.
    ///
    /// The datacenter list rarely changes and is requested by many screens
    /// at once, so successful responses are kept in the process-wide cache
    /// for [`DEFAULT_TTL`], per query and team.
    #[tracing::instrument(skip(client, query))]
    pub async fn list_cached(
        client: &CycleClient,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<Collection<DatacenterAttributes>>> {
        let options = query.map(OptionSet::from).unwrap_or_default();
        ResponseCache::global()
            .get_or_fetch(CACHE_KEY, options, client.team(), DEFAULT_TTL, || {
                Self::list(client, query)
            })
            .await
    }
}
