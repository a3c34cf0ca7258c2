//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::jsonapi::{ErrorDetail, Resource};
use crate::{
    BillingMethodAttributes, ContainerAttributes, DatacenterAttributes, RepoAttributes,
};

/// Trait for human-readable key-value output.
///
/// Implemented by resource types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(label: &str, id: Option<&str>) -> Vec<String> {
    let title = format!("{label}: {}", id.unwrap_or("-"));
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

impl PrettyPrint for Resource<ContainerAttributes> {
    fn pretty_print(&self) -> String {
        let mut lines = header("Container", self.id.as_deref());

        if let Some(ref attrs) = self.attributes {
            lines.push(format!("Name:           {}", attrs.name));
            lines.push(format!("State:          {}", attrs.state.current));
            if let Some(ref scaling) = attrs.scaling {
                lines.push(format!("Hostname:       {}", scaling.hostname));
            }
            if let Some(spawns) = attrs.spawns {
                lines.push(format!("Spawns:         {}", spawns));
            }
            if !attrs.volumes.is_empty() {
                lines.push(format!("Volumes:        {}", attrs.volumes.len()));
            }
            if let Some(ref created) = attrs.events.created {
                lines.push(format!("Created:        {}", created.format("%Y-%m-%d %H:%M:%S UTC")));
            }
        }

        if let Some(image) = self.related_id("image") {
            lines.push(format!("Image:          {}", image));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Resource<DatacenterAttributes> {
    fn pretty_print(&self) -> String {
        let mut lines = header("Datacenter", self.id.as_deref());

        if let Some(ref attrs) = self.attributes {
            lines.push(format!("Name:           {}", attrs.name));
            lines.push(format!("Provider:       {}", attrs.provider));
            if let Some(ref location) = attrs.location {
                lines.push(format!("Location:       {}, {}", location.city, location.country));
            }
            lines.push(format!("Active:         {}", if attrs.active { "yes" } else { "no" }));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Resource<RepoAttributes> {
    fn pretty_print(&self) -> String {
        let mut lines = header("Repo", self.id.as_deref());

        if let Some(ref attrs) = self.attributes {
            lines.push(format!("Name:           {}", attrs.name));
            lines.push(format!("URL:            {}", attrs.url));
            lines.push(format!("State:          {:?}", attrs.state.current));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Resource<BillingMethodAttributes> {
    fn pretty_print(&self) -> String {
        let mut lines = header("Billing Method", self.id.as_deref());

        if let Some(ref attrs) = self.attributes {
            lines.push(format!("Name:           {}", attrs.name));
            if let Some(ref card) = attrs.credit_card {
                lines.push(format!(
                    "Card:           {} (exp {:02}/{})",
                    card.brand, card.expiration.month, card.expiration.year
                ));
            }
            if attrs.primary {
                lines.push("Primary:        yes".to_string());
            }
        }

        lines.join("\n")
    }
}

impl PrettyPrint for [ErrorDetail] {
    fn pretty_print(&self) -> String {
        self.iter()
            .map(|error| match error.status.as_deref() {
                Some(status) => format!("[{status}] {error}"),
                None => error.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonapi::ErrorSource;

    #[test]
    fn test_container_pretty_print_format() {
        let container: Resource<ContainerAttributes> = serde_json::from_value(serde_json::json!({
            "id": "c1",
            "type": "containers",
            "attributes": {
                "name": "web",
                "state": { "current": "running" }
            }
        }))
        .unwrap();

        let output = container.pretty_print();
        assert!(output.starts_with("Container: c1"));
        assert!(output.contains("State:          running"));
    }

    #[test]
    fn test_errors_pretty_print_includes_pointer() {
        let errors = vec![ErrorDetail {
            status: Some("422".to_string()),
            title: Some("Invalid name".to_string()),
            source: Some(ErrorSource {
                pointer: Some("/data/attributes/name".to_string()),
                parameter: None,
            }),
            ..Default::default()
        }];

        assert_eq!(
            errors.pretty_print(),
            "[422] Invalid name [/data/attributes/name]"
        );
    }
}
