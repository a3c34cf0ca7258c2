//! Resource kind metadata.

use serde::de::DeserializeOwned;

use crate::error::{CycleError, Result};

/// A kind of resource exposed by the API.
pub trait ResourceType: Send + Sync + 'static {
    /// JSON:API `type` of this resource.
    const TYPE: &'static str;

    /// Collection path relative to the API base URL (e.g. `billing/methods`).
    const PATH: &'static str;

    /// Shape of the resource's `attributes`.
    type Attributes: DeserializeOwned + Send + Sync + 'static;

    /// Path of a single item.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::InvalidArgument`] for ids that would not name an
    /// item once joined to the base URL: empty, `.` and `..`.
    fn item_path(id: &str) -> Result<String> {
        if matches!(id, "" | "." | "..") {
            return Err(CycleError::InvalidArgument(format!(
                "'{id}' is not a valid {} id",
                Self::TYPE
            )));
        }
        Ok(format!("{}/{}", Self::PATH, urlencoding::encode(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widgets;

    impl ResourceType for Widgets {
        const TYPE: &'static str = "widgets";
        const PATH: &'static str = "factory/widgets";
        type Attributes = serde_json::Value;
    }

    #[test]
    fn test_item_path_encodes_id() {
        assert_eq!(Widgets::item_path("w1").unwrap(), "factory/widgets/w1");
        assert_eq!(Widgets::item_path("a/b").unwrap(), "factory/widgets/a%2Fb");
        assert_eq!(Widgets::item_path("v1.2").unwrap(), "factory/widgets/v1.2");
    }

    #[test]
    fn test_item_path_rejects_dot_segments() {
        for id in ["", ".", ".."] {
            assert!(matches!(
                Widgets::item_path(id),
                Err(CycleError::InvalidArgument(_))
            ));
        }
    }
}
