//! Currently billed services.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::{OptionSet, ResponseCache, DEFAULT_TTL};
use crate::client::CycleClient;
use crate::error::Result;
use crate::jsonapi::Single;
use crate::query::QueryParams;
use crate::response::ApiResponse;

const PATH: &str = "billing/current";
const CACHE_KEY: &str = "billing/current";

/// The `active_services` singleton: what the team is billed for right now.
#[derive(Debug, Clone, Copy)]
pub struct ActiveServices;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveServicesAttributes {
    #[serde(default)]
    pub term: Option<Term>,
    #[serde(default)]
    pub containers: Vec<Value>,
    #[serde(default)]
    pub due: f64,
    #[serde(default)]
    pub tier: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Term {
    #[serde(default)]
    pub start: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub end: Option<chrono::DateTime<chrono::Utc>>,
}

impl ActiveServices {
    /// Fetch the current services, served from the response cache when
    /// the same team asked with the same query within [`DEFAULT_TTL`].
    #[tracing::instrument(skip(client, query))]
    pub async fn current(
        client: &CycleClient,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<Single<ActiveServicesAttributes>>> {
        let options = query.map(OptionSet::from).unwrap_or_default();
        ResponseCache::global()
            .get_or_fetch(CACHE_KEY, options, client.team(), DEFAULT_TTL, || {
                client.get(PATH, query)
            })
            .await
    }

    /// Drop any cached copy, e.g. after changing services.
    pub fn invalidate() {
        ResponseCache::global().clear(CACHE_KEY);
    }
}
