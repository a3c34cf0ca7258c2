//! Tasks trait: state transitions posted to `<item>/tasks`.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::CycleClient;
use crate::error::Result;
use crate::query::QueryParams;
use crate::response::ApiResponse;
use crate::task::{Task, TaskAction, TaskDocument};
use crate::traits::ResourceType;

/// Invoke actions on a resource.
///
/// Every action goes through the same endpoint and body shape; a resource
/// only declares which action names it accepts.
#[async_trait]
pub trait Tasks: ResourceType {
    /// Actions accepted by this resource.
    type Action: TaskAction + Send;

    /// Path of the item's task endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a usable item id.
    fn tasks_path(id: &str) -> Result<String> {
        Ok(format!("{}/tasks", Self::item_path(id)?))
    }

    /// Post a task to the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    async fn task<C>(
        client: &CycleClient,
        id: &str,
        task: &Task<C>,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<TaskDocument>>
    where
        C: Serialize + Send + Sync,
    {
        tracing::debug!(kind = Self::TYPE, id, action = %task.action, "submitting task");
        client.post(&Self::tasks_path(id)?, task, query).await
    }

    /// Post a parameterless action.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    async fn perform(
        client: &CycleClient,
        id: &str,
        action: Self::Action,
    ) -> Result<ApiResponse<TaskDocument>> {
        let task = Task::new(action);
        Self::task(client, id, &task, None).await
    }
}
