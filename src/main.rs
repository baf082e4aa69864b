//! BAC Planner
//!
//! An MCP server estimating ethanol loading and maintenance doses.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use bacplan::build_info;
use bacplan::config::PlannerConfig;
use bacplan::mcp::BacPlanService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bacplan=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let config = PlannerConfig::from_env()?;
    tracing::info!(
        default_beta = config.default_beta,
        enforce_bounds = config.enforce_bounds,
        "loaded configuration"
    );

    eprintln!("Starting MCP server on stdio...");
    let service = BacPlanService::new(config);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
