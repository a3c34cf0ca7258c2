//! JSON:API document structures.
//!
//! Wire types for the top-level envelope, resource objects, relationships,
//! links and error documents, plus [`FormattedDoc`] for building request
//! bodies.

mod document;
mod error;
mod format;

pub use document::*;
pub use error::{ErrorDetail, ErrorDocument, ErrorLinks, ErrorSource};
pub use format::FormattedDoc;
