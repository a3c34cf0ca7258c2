//! Cycle API CLI binary.
//!
//! A command-line interface for interacting with the Cycle API.

use clap::Parser;
use cycleapi::cli::{Cli, Command, Entity};
use cycleapi::output::PrettyPrint;
use cycleapi::{
    ApiResponse, BillingMethodAttributes, BillingMethods, ContainerAttributes, Containers,
    CycleClient, DatacenterAttributes, Datacenters, Delete, Get, List, Page, PageParams,
    QueryParams, RepoAttributes, Repos, Resource, Single, Task, TaskDocument, Tasks,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match CycleClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set CYCLE_API_KEY environment variable");
            return ExitCode::FAILURE;
        }
    };
    let client = match cli.team.clone() {
        Some(team) => client.with_team(team),
        None => client,
    };

    match run(&client, cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the API call succeeded.
async fn run(client: &CycleClient, cli: Cli) -> cycleapi::Result<bool> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, &id, cli.json).await,
        Command::List {
            entity,
            page,
            size,
            filters,
        } => {
            let params = PageParams::new(page.unwrap_or(1), size.unwrap_or(20));
            let query = filters
                .iter()
                .fold(QueryParams::new(), |q, (name, value)| q.filter(name, value.as_str()));
            handle_list(client, entity, &query, params, cli.json).await
        }
        Command::Task { entity, id, action } => {
            handle_task(client, entity, &id, action, cli.json).await
        }
        Command::Delete { entity, id } => handle_delete(client, entity, &id, cli.json).await,
    }
}

async fn handle_get(
    client: &CycleClient,
    entity: Entity,
    id: &str,
    json: bool,
) -> cycleapi::Result<bool> {
    match entity {
        Entity::Container => output_single(Containers::get(client, id, None).await?, json),
        Entity::Datacenter => output_single(Datacenters::get(client, id, None).await?, json),
        Entity::Repo => output_single(Repos::get(client, id, None).await?, json),
        Entity::BillingMethod => {
            output_single(BillingMethods::get(client, id, None).await?, json)
        }
    }
}

async fn handle_list(
    client: &CycleClient,
    entity: Entity,
    query: &QueryParams,
    params: PageParams,
    json: bool,
) -> cycleapi::Result<bool> {
    match entity {
        Entity::Container => output_page(
            Containers::list_page(client, query, params).await?,
            json,
            |c| ContainerRow::from(c),
        ),
        Entity::Datacenter => output_page(
            Datacenters::list_page(client, query, params).await?,
            json,
            |d| DatacenterRow::from(d),
        ),
        Entity::Repo => output_page(
            Repos::list_page(client, query, params).await?,
            json,
            |r| RepoRow::from(r),
        ),
        Entity::BillingMethod => output_page(
            BillingMethods::list_page(client, query, params).await?,
            json,
            |m| BillingMethodRow::from(m),
        ),
    }
}

async fn handle_task(
    client: &CycleClient,
    entity: Entity,
    id: &str,
    action: String,
    json: bool,
) -> cycleapi::Result<bool> {
    let task = Task {
        action,
        attributes: None::<serde_json::Value>,
    };
    let response = match entity {
        Entity::Container => Containers::task(client, id, &task, None).await?,
        Entity::Repo => Repos::task(client, id, &task, None).await?,
        Entity::BillingMethod => BillingMethods::task(client, id, &task, None).await?,
        Entity::Datacenter => {
            return Err(cycleapi::CycleError::InvalidArgument(
                "datacenters have no task endpoint".to_string(),
            ));
        }
    };
    output_task(response, json)
}

async fn handle_delete(
    client: &CycleClient,
    entity: Entity,
    id: &str,
    json: bool,
) -> cycleapi::Result<bool> {
    let response = match entity {
        Entity::Container => Containers::delete(client, id, None).await?,
        Entity::Repo => Repos::delete(client, id, None).await?,
        Entity::BillingMethod => BillingMethods::delete(client, id, None).await?,
        Entity::Datacenter => {
            return Err(cycleapi::CycleError::InvalidArgument(
                "datacenters cannot be deleted".to_string(),
            ));
        }
    };
    match response {
        ApiResponse::Success {
            document: Some(document),
        } => output_task(ApiResponse::Success { document }, json),
        ApiResponse::Success { document: None } => {
            println!("Deleted {id}");
            Ok(true)
        }
        ApiResponse::Failure { errors } => output_task(ApiResponse::Failure { errors }, json),
    }
}

fn output_errors(errors: &[cycleapi::ErrorDetail], json: bool) -> cycleapi::Result<bool> {
    if json {
        eprintln!("{}", serde_json::to_string_pretty(errors)?);
    } else {
        eprintln!("{}", errors.pretty_print());
    }
    Ok(false)
}

fn output_single<A>(response: ApiResponse<Single<A>>, json: bool) -> cycleapi::Result<bool>
where
    A: Serialize,
    Resource<A>: PrettyPrint,
{
    match response {
        ApiResponse::Success { document } => {
            match document.data {
                Some(resource) if !json => println!("{}", resource.pretty_print()),
                data => println!("{}", serde_json::to_string_pretty(&data)?),
            }
            Ok(true)
        }
        ApiResponse::Failure { errors } => output_errors(&errors, json),
    }
}

fn output_task(response: ApiResponse<TaskDocument>, json: bool) -> cycleapi::Result<bool> {
    match response {
        ApiResponse::Success { document } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else if let Some(task) = document.data {
                println!(
                    "Accepted task '{}' ({})",
                    task.kind,
                    task.id.as_deref().unwrap_or("no id")
                );
            }
            Ok(true)
        }
        ApiResponse::Failure { errors } => output_errors(&errors, json),
    }
}

fn output_page<A, R, F>(
    response: ApiResponse<Page<Resource<A>>>,
    json: bool,
    to_row: F,
) -> cycleapi::Result<bool>
where
    A: Serialize,
    R: Tabled,
    F: Fn(&Resource<A>) -> R,
{
    let page = match response {
        ApiResponse::Success { document } => document,
        ApiResponse::Failure { errors } => return output_errors(&errors, json),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        let rows: Vec<R> = page.items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        if page.has_more {
            println!("\nPage {} (more available)", page.number);
        } else {
            println!("\nPage {} (end)", page.number);
        }
    }
    Ok(true)
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ContainerRow {
    id: String,
    name: String,
    state: String,
}

impl From<&Resource<ContainerAttributes>> for ContainerRow {
    fn from(c: &Resource<ContainerAttributes>) -> Self {
        Self {
            id: c.id.clone().unwrap_or_default(),
            name: c.attributes.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            state: c
                .attributes
                .as_ref()
                .map(|a| a.state.current.to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct DatacenterRow {
    id: String,
    name: String,
    provider: String,
}

impl From<&Resource<DatacenterAttributes>> for DatacenterRow {
    fn from(d: &Resource<DatacenterAttributes>) -> Self {
        Self {
            id: d.id.clone().unwrap_or_default(),
            name: d.attributes.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            provider: d
                .attributes
                .as_ref()
                .map(|a| a.provider.clone())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct RepoRow {
    id: String,
    name: String,
    url: String,
}

impl From<&Resource<RepoAttributes>> for RepoRow {
    fn from(r: &Resource<RepoAttributes>) -> Self {
        Self {
            id: r.id.clone().unwrap_or_default(),
            name: r.attributes.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            url: r.attributes.as_ref().map(|a| a.url.clone()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct BillingMethodRow {
    id: String,
    name: String,
    primary: bool,
}

impl From<&Resource<BillingMethodAttributes>> for BillingMethodRow {
    fn from(m: &Resource<BillingMethodAttributes>) -> Self {
        Self {
            id: m.id.clone().unwrap_or_default(),
            name: m.attributes.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            primary: m.attributes.as_ref().is_some_and(|a| a.primary),
        }
    }
}
