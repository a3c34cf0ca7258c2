//! Containers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::client::CycleClient;
use crate::error::Result;
use crate::jsonapi::{Collection, Document, FormattedDoc, Id, Resource};
use crate::models::common::{Events, State};
use crate::query::QueryParams;
use crate::response::ApiResponse;
use crate::task::{Task, TaskAction, TaskDocument};
use crate::traits::{Create, Delete, Get, List, ResourceType, Tasks, Update};

/// The `containers` resource kind.
#[derive(Debug, Clone, Copy)]
pub struct Containers;

/// Attributes of a container.
///
/// `config` is kept as raw JSON: its shape differs between API revisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerAttributes {
    pub name: String,

    #[serde(default)]
    pub config: Option<Value>,

    #[serde(default)]
    pub tls: Option<Tls>,

    #[serde(default)]
    pub spawns: Option<u32>,

    #[serde(default)]
    pub scaling: Option<Scaling>,

    #[serde(default)]
    pub volumes: Vec<Volume>,

    pub state: State<ContainerState>,

    #[serde(default)]
    pub events: Events,
}

/// States a container can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    Starting,
    Running,
    Stopping,
    Stopped,
    Deleting,
    Deleted,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ContainerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContainerState::Starting => "starting",
            ContainerState::Running => "running",
            ContainerState::Stopping => "stopping",
            ContainerState::Stopped => "stopped",
            ContainerState::Deleting => "deleting",
            ContainerState::Deleted => "deleted",
            ContainerState::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalingMethod {
    #[serde(rename = "persistent")]
    Persistent,
    #[serde(rename = "geodns")]
    GeoDns,
    #[serde(rename = "loadbalance")]
    LoadBalance,
    #[serde(rename = "loadbalance-geodns")]
    LoadBalanceGeoDns,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scaling {
    pub method: ScalingMethod,
    pub hostname: String,
    pub geodns: Option<GeoDns>,
    pub loadbalance: Option<LoadBalance>,
    pub persistent: Option<Persistent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoDns {
    pub datacenters: Vec<Id>,
    pub max_per_dc: u32,
    pub min_per_dc: u32,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalance {
    pub datacenter: Id,
    pub max: u32,
    pub min: u32,
    pub public_interface: Option<bool>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persistent {
    pub datacenter: Id,
    pub public_interface: Option<bool>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub id: Option<Id>,
    pub volume_plan: String,
    pub path: String,
    pub remote_access: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tls {
    pub enabled: bool,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flags {
    pub auto_restart: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeCommand {
    pub args: Vec<String>,
    #[serde(rename = "override")]
    pub override_entrypoint: bool,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub env_vars: Option<BTreeMap<String, String>>,
    pub command: Option<RuntimeCommand>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerConfig {
    pub flags: Option<Flags>,
    pub tls: Option<Tls>,
    pub dnsrecord: Option<Id>,
    pub runtime: Option<RuntimeConfig>,
}

/// Parameters for creating a container.
///
/// `environment`, `plan`, `image` and `domain` are sent as relationships,
/// everything else as attributes.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct NewContainer {
    pub name: String,
    #[serde(skip)]
    pub environment: Id,
    #[serde(skip)]
    pub plan: Id,
    #[serde(skip)]
    pub image: Id,
    #[serde(skip)]
    pub domain: Option<Id>,
    pub config: ContainerConfig,
    pub scaling: Scaling,
    pub tls: Option<Tls>,
    pub volumes: Vec<Volume>,
}

/// Remote access toggle for an existing volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeAccess {
    pub id: Id,
    pub remote_access: bool,
}

/// Parameters for updating a container.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateContainer {
    pub name: Option<String>,
    pub volumes: Option<Vec<VolumeAccess>>,
}

/// Parameters of the `apply` action.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModifyParams {
    pub plan: Option<Id>,
    pub domain: Option<Id>,
    pub hostname: Option<String>,
    pub runtime: Option<RuntimeConfig>,
    pub tls: Option<Tls>,
    pub flags: Option<Flags>,
}

/// Parameters of the `reimage` action.
#[derive(Debug, Clone, Serialize)]
pub struct ReimageParams {
    pub image: Id,
}

/// Actions accepted by a container's task endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerAction {
    Start,
    Stop,
    Apply,
    Reimage,
}

impl TaskAction for ContainerAction {
    fn as_str(&self) -> &'static str {
        match self {
            ContainerAction::Start => "start",
            ContainerAction::Stop => "stop",
            ContainerAction::Apply => "apply",
            ContainerAction::Reimage => "reimage",
        }
    }
}

/// An entry of a container's event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerEvent {
    pub caption: String,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub platform: bool,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl ResourceType for Containers {
    const TYPE: &'static str = "containers";
    const PATH: &'static str = "containers";
    type Attributes = ContainerAttributes;
}

impl List for Containers {}

impl Get for Containers {}

impl Create for Containers {
    type Params = NewContainer;

    fn create_document(params: &NewContainer) -> Document<Resource<&NewContainer>> {
        FormattedDoc::new(Self::TYPE)
            .attributes(params)
            .to_one("image", "images", params.image.as_str())
            .to_one("plan", "plans", params.plan.as_str())
            .to_one("environment", "environments", params.environment.as_str())
            .to_one_opt("domain", "domains", params.domain.as_deref())
            .build()
    }
}

impl Update for Containers {
    type Params = UpdateContainer;
}

impl Delete for Containers {}

impl Tasks for Containers {
    type Action = ContainerAction;
}

impl Containers {
    /// Start every instance of the container.
    #[tracing::instrument(skip(client))]
    pub async fn start(client: &CycleClient, id: &str) -> Result<ApiResponse<TaskDocument>> {
        Self::perform(client, id, ContainerAction::Start).await
    }

    /// Stop every instance of the container.
    #[tracing::instrument(skip(client))]
    pub async fn stop(client: &CycleClient, id: &str) -> Result<ApiResponse<TaskDocument>> {
        Self::perform(client, id, ContainerAction::Stop).await
    }

    /// Change properties that must propagate to every instance.
    #[tracing::instrument(skip(client, params))]
    pub async fn apply(
        client: &CycleClient,
        id: &str,
        params: &ModifyParams,
    ) -> Result<ApiResponse<TaskDocument>> {
        let task = Task::with_contents(ContainerAction::Apply, params);
        Self::task(client, id, &task, None).await
    }

    /// Switch the container to another image.
    #[tracing::instrument(skip(client, params))]
    pub async fn reimage(
        client: &CycleClient,
        id: &str,
        params: &ReimageParams,
    ) -> Result<ApiResponse<TaskDocument>> {
        let task = Task::with_contents(ContainerAction::Reimage, params);
        Self::task(client, id, &task, None).await
    }

    /// The container's event log.
    #[tracing::instrument(skip(client, query))]
    pub async fn events(
        client: &CycleClient,
        id: &str,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<Collection<ContainerEvent>>> {
        client
            .get(&format!("{}/events", Self::item_path(id)?), query)
            .await
    }

    /// Images the container could be reimaged to.
    #[tracing::instrument(skip(client, query))]
    pub async fn compatible_images(
        client: &CycleClient,
        id: &str,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<Collection>> {
        client
            .get(&format!("{}/compatible-images", Self::item_path(id)?), query)
            .await
    }
}
