//! Cycle API client library.
//!
//! A Rust library for the Cycle JSON:API REST backend, built on two
//! primitives every resource module shares:
//!
//! - [`CycleClient`], a typed request dispatcher returning
//!   [`ApiResponse::Success`] or [`ApiResponse::Failure`] with the
//!   backend's structured errors.
//! - [`ResponseCache`], a short-lived in-process cache keyed by request,
//!   options and team scope.
//!
//! # Quick Start
//!
//! ```no_run
//! use cycleapi::{ApiResponse, Containers, CycleClient, List};
//!
//! #[tokio::main]
//! async fn main() -> cycleapi::Result<()> {
//!     // Create client from environment variables
//!     let client = CycleClient::from_env()?;
//!
//!     // List containers
//!     match Containers::list(&client, None).await? {
//!         ApiResponse::Success { document } => {
//!             println!("Found {} containers", document.data.len());
//!         }
//!         ApiResponse::Failure { errors } => {
//!             for error in errors {
//!                 eprintln!("{error}");
//!             }
//!         }
//!     }
//!
//!     // Start one
//!     let task = Containers::start(&client, "container-id").await?.into_result()?;
//!     println!("Task: {:?}", task.data.map(|t| t.kind));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Each resource kind (like [`Containers`] or [`Repos`]) implements
//! [`ResourceType`] and the operation traits its endpoints support:
//!
//! - [`List`] / [`Create`] - collection operations
//! - [`Get`] / [`Update`] / [`Delete`] - item operations
//! - [`Tasks`] - state transitions posted as a [`Task`] to `<item>/tasks`
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `CYCLE_API_KEY` (required) - Your API key
//! - `CYCLE_API_URL` (optional) - Base URL (defaults to `https://api.cycle.io/v1`)
//! - `CYCLE_TEAM_ID` (optional) - Team scope for every request

pub mod cache;
pub mod cli;
mod client;
mod error;
pub mod jsonapi;
mod models;
pub mod output;
mod pagination;
mod query;
mod response;
pub mod task;
mod traits;

// Re-export core types
pub use cache::{OptionSet, ResponseCache, DEFAULT_TTL};
pub use client::CycleClient;
pub use error::{CycleError, Result};
pub use jsonapi::{Collection, Document, ErrorDetail, FormattedDoc, Resource, Single};
pub use pagination::{Page, PageParams, DEFAULT_PAGE_SIZE};
pub use query::{QueryParams, QueryValue};
pub use response::ApiResponse;
pub use task::{make_task, Task, TaskAction, TaskDocument};

// Re-export traits
pub use traits::{Create, Delete, Get, List, ResourceType, Tasks, Update};

// Re-export models
pub use models::*;
