//! BAC Planner MCP Server Implementation
//!
//! Implements the MCP server with all planner tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::PlannerConfig;
use crate::tools::planner::{self, PlanError, PlanRequest};
use crate::tools::status::StatusTracker;

/// BAC Planner MCP Service
#[derive(Clone)]
pub struct BacPlanService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    config: PlannerConfig,
    tool_router: ToolRouter<BacPlanService>,
}

impl BacPlanService {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(config.clone()))),
            config,
            tool_router: Self::tool_router(),
        }
    }
}

fn plan_error(e: PlanError) -> McpError {
    McpError::invalid_params(e.to_string(), None)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParseTargetBacParams {
    /// Target BAC text, e.g. "0.05%", "0.5‰", "0.5permille" or "0.08"
    pub text: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EstimateTbwParams {
    /// "male" or "female"
    pub sex: String,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in whole years
    pub age_years: u32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculatePlanParams {
    /// "male" or "female"
    pub sex: String,
    /// Body weight in kilograms (30-200)
    pub weight_kg: f64,
    /// Height in centimeters (120-220)
    pub height_cm: f64,
    /// Age in whole years (15-100)
    pub age_years: u32,
    /// How long to hold the target, in hours (0.5-24)
    pub duration_hours: f64,
    /// Target BAC text, e.g. "0.05%" or "0.5‰"
    pub target_bac: String,
    /// Elimination rate in g/dL per hour (default 0.015)
    pub beta: Option<f64>,
    /// Output format: json or markdown (default json)
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String { "json".to_string() }

impl From<&CalculatePlanParams> for PlanRequest {
    fn from(p: &CalculatePlanParams) -> Self {
        Self {
            sex: p.sex.clone(),
            weight_kg: p.weight_kg,
            height_cm: p.height_cm,
            age_years: p.age_years,
            duration_hours: p.duration_hours,
            target_bac: p.target_bac.clone(),
            beta: p.beta,
        }
    }
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl BacPlanService {
    // --- Status ---

    #[tool(description = "Get the current status of the BAC planner including build info, configuration, and process information")]
    async fn bac_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let json = to_json(&tracker.get_status())?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for using the BAC planner tools, accepted BAC formats, and input limits. Call this before the first calculation.")]
    fn planner_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::PLANNER_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(PLANNER_INSTRUCTIONS)]))
    }

    // --- Calculator ---

    #[tool(description = "Parse a target BAC string (%, ‰, permille, /1000) into g/dL")]
    fn parse_target_bac(&self, Parameters(p): Parameters<ParseTargetBacParams>) -> Result<CallToolResult, McpError> {
        let result = planner::parse_bac(&p.text).map_err(plan_error)?;
        let json = to_json(&result)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Estimate total body water (Watson formula) in liters and deciliters")]
    fn estimate_tbw(&self, Parameters(p): Parameters<EstimateTbwParams>) -> Result<CallToolResult, McpError> {
        let result = planner::body_water(&p.sex, p.weight_kg, p.height_cm, p.age_years)
            .map_err(plan_error)?;
        let json = to_json(&result)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Calculate the loading dose, hourly maintenance dose, and total ethanol needed to reach and hold a target BAC, with standard drink counts and beverage volumes. Educational only.")]
    async fn calculate_plan(&self, Parameters(p): Parameters<CalculatePlanParams>) -> Result<CallToolResult, McpError> {
        let request = PlanRequest::from(&p);
        let response = planner::calculate_plan(&request, &self.config).map_err(|e| {
            tracing::info!(error = %e, "rejected plan request");
            plan_error(e)
        })?;

        self.status_tracker.lock().await.record_calculation();

        let text = match p.format.to_lowercase().as_str() {
            "markdown" | "md" | "text" => planner::render_plan_markdown(&response.plan),
            "json" => to_json(&response)?,
            other => {
                return Err(McpError::invalid_params(
                    format!("Unknown format {:?}: expected json or markdown", other),
                    None,
                ))
            }
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "List the reference beverages and their alcohol by volume")]
    fn list_beverages(&self) -> Result<CallToolResult, McpError> {
        let json = to_json(&planner::list_beverages())?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for BacPlanService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bacplan".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("BAC Planner".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "BAC Planner - educational estimate of the ethanol needed to reach and hold a \
                 target blood alcohol concentration. Not medical advice. \
                 Call planner_instructions first. \
                 Tools: calculate_plan, parse_target_bac, estimate_tbw, list_beverages, bac_status."
                    .into(),
            ),
        }
    }
}
