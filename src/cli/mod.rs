//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the cycleapi binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Cycle API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "cycleapi", about = "Cycle API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Team to scope requests to.
    #[arg(long, global = true, env = "CYCLE_TEAM_ID")]
    pub team: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single resource by ID.
    Get {
        /// The type of resource to get.
        entity: Entity,

        /// The resource ID.
        id: String,
    },

    /// List resources with pagination.
    List {
        /// The type of resource to list.
        entity: Entity,

        /// Page number (1-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Number of items per page.
        #[arg(long)]
        size: Option<u32>,

        /// Filters as `name=value`, repeatable.
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },

    /// Run an action (e.g. start, stop, build) on a resource.
    Task {
        /// The type of resource.
        entity: Entity,

        /// The resource ID.
        id: String,

        /// The action name.
        action: String,
    },

    /// Delete a resource.
    Delete {
        /// The type of resource.
        entity: Entity,

        /// The resource ID.
        id: String,
    },
}

/// Resource kinds that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A container.
    #[value(alias = "containers")]
    Container,
    /// A datacenter.
    #[value(alias = "datacenters")]
    Datacenter,
    /// A source repository.
    #[value(alias = "repos")]
    Repo,
    /// A billing method.
    #[value(alias = "billing-methods")]
    BillingMethod,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}
