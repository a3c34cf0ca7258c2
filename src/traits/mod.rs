//! Trait definitions for resource operations.
//!
//! A resource kind implements [`ResourceType`] to name its JSON:API type and
//! collection path, then opts into each operation its endpoints support.
//! Every operation has a default implementation built on the dispatcher,
//! so most resource modules are a handful of empty `impl` blocks.
//!
//! Collection operations ([`List::list`], [`Create::create`]) and item
//! operations taking an id ([`Get::get`], [`Update::update`],
//! [`Delete::delete`], [`Tasks::task`]) are named separately.

mod create;
mod delete;
mod get;
mod list;
mod resource;
mod tasks;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use list::List;
pub use resource::ResourceType;
pub use tasks::Tasks;
pub use update::Update;
