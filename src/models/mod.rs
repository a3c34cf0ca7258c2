//! Cycle API resource kinds.

mod billing_method;
mod billing_service;
mod common;
mod container;
mod datacenter;
mod repo;

pub use billing_method::*;
pub use billing_service::*;
pub use common::*;
pub use container::*;
pub use datacenter::*;
pub use repo::*;
