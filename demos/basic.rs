//! Basic example demonstrating the Cycle API client.
//!
//! Run with:
//! ```
//! CYCLE_API_KEY=your-key CYCLE_TEAM_ID=your-team cargo run --example basic
//! ```

use cycleapi::{
    ApiResponse, Containers, CycleClient, Datacenters, List, PageParams, QueryParams,
};

#[tokio::main]
async fn main() -> cycleapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Cycle client...");
    let client = CycleClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // Datacenters are cached for a second; the second call is served locally
    println!("\n--- Datacenters ---");
    let datacenters = Datacenters::list_cached(&client, None).await?.into_result()?;
    let again = Datacenters::list_cached(&client, None).await?.into_result()?;
    println!(
        "Found {} datacenters ({} on the cached call)",
        datacenters.data.len(),
        again.data.len()
    );

    // List first page of running containers
    println!("\n--- Running Containers (first page) ---");
    let query = QueryParams::new().filter("state", "running");
    let page = match Containers::list_page(&client, &query, PageParams::new(1, 10)).await? {
        ApiResponse::Success { document } => document,
        ApiResponse::Failure { errors } => {
            for error in &errors {
                eprintln!("  ! {error}");
            }
            return Ok(());
        }
    };

    for container in &page {
        let name = container.attributes.as_ref().map_or("?", |a| a.name.as_str());
        println!("  - {} ({})", name, container.id.as_deref().unwrap_or("-"));
    }

    // Stop the first one
    if let Some(id) = page.items.first().and_then(|c| c.id.clone()) {
        println!("\n--- Stopping {id} ---");
        match Containers::stop(&client, &id).await? {
            ApiResponse::Success { .. } => println!("Stop task accepted"),
            ApiResponse::Failure { errors } => {
                for error in errors {
                    eprintln!("  ! {error}");
                }
            }
        }
    }

    Ok(())
}
