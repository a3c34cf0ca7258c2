//! Source repositories.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::client::CycleClient;
use crate::error::Result;
use crate::models::common::{Events, Scope, State};
use crate::response::ApiResponse;
use crate::task::{Task, TaskAction, TaskDocument};
use crate::traits::{Create, Delete, Get, List, ResourceType, Tasks, Update};

/// The `repos` resource kind.
#[derive(Debug, Clone, Copy)]
pub struct Repos;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoAttributes {
    pub name: String,
    #[serde(default)]
    pub about: Option<About>,
    #[serde(rename = "type")]
    pub kind: RepoKind,
    #[serde(default)]
    pub owner: Option<Scope>,
    pub url: String,
    pub state: State<RepoState>,
    #[serde(default)]
    pub events: Events,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct About {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoKind {
    Git,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoState {
    Live,
    Building,
    Deleting,
    Deleted,
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoAuth {
    pub private_key: String,
}

/// Parameters for creating a repo.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct NewRepo {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: RepoKind,
    pub auth: Option<RepoAuth>,
}

/// Parameters for updating a repo.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRepo {
    pub name: Option<String>,
    pub auth: Option<RepoAuth>,
}

/// Parameters of the `build` action.
#[derive(Debug, Clone, Serialize)]
pub struct BuildParams {
    pub latest: bool,
    pub commit: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoAction {
    Build,
}

impl TaskAction for RepoAction {
    fn as_str(&self) -> &'static str {
        match self {
            RepoAction::Build => "build",
        }
    }
}

impl ResourceType for Repos {
    const TYPE: &'static str = "repos";
    const PATH: &'static str = "repos";
    type Attributes = RepoAttributes;
}

impl List for Repos {}

impl Get for Repos {}

impl Create for Repos {
    type Params = NewRepo;
}

impl Update for Repos {
    type Params = UpdateRepo;
}

impl Delete for Repos {}

impl Tasks for Repos {
    type Action = RepoAction;
}

impl Repos {
    /// Build an image from the repo.
    #[tracing::instrument(skip(client, params))]
    pub async fn build(
        client: &CycleClient,
        id: &str,
        params: &BuildParams,
    ) -> Result<ApiResponse<TaskDocument>> {
        Self::task(client, id, &Task::with_contents(RepoAction::Build, params), None).await
    }
}
