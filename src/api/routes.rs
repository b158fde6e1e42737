//! API route configuration.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::state::AppState;
use super::v1::{self, ErrorResponse, HealthResponse, RootResponse};
use crate::mcp::{self, CallToolRequest, CallToolResponse, Content, ToolDescriptor, ToolList};
use crate::tools::blastp::{BlastpService, Hit, SearchResult, StructuredReport, TableReport};
use crate::tools::spider::{PredictionResult, SpiderService};
use crate::tools::{CommandRunner, ToolInfo};

/// Build routes with generic runner type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the CommandRunner trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($R:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$R>));
        )*
        router
    }};
}

/// OpenAPI documentation for the BLASTp server
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BLASTp API",
        description = "RESTful API wrapper for BLASTp: Basic Local Alignment Search Tool",
        license(name = "MIT")
    ),
    paths(
        v1::blastp::root,
        v1::blastp::health,
        v1::blastp::info,
        v1::blastp::search,
        mcp::blastp::list_tools,
        mcp::blastp::call_tool,
    ),
    components(
        schemas(
            RootResponse,
            HealthResponse,
            ErrorResponse,
            ToolInfo,
            v1::blastp::SearchRequest,
            v1::blastp::SearchResponse,
            SearchResult,
            TableReport,
            StructuredReport,
            Hit,
            ToolDescriptor,
            ToolList,
            CallToolRequest,
            CallToolResponse,
            Content,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "blastp", description = "Protein alignment search"),
        (name = "mcp", description = "MCP-like tool discovery and tool calls")
    )
)]
pub struct BlastpApiDoc;

/// OpenAPI documentation for the SPIDER server
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SPIDER API",
        description = "RESTful API wrapper for SPIDER: Stacking-based ensemble learning framework for accurate prediction of druggable proteins",
        license(name = "MIT")
    ),
    paths(
        v1::spider::root,
        v1::spider::health,
        v1::spider::info,
        v1::spider::predict,
        mcp::spider::list_tools,
        mcp::spider::call_tool,
    ),
    components(
        schemas(
            RootResponse,
            HealthResponse,
            ErrorResponse,
            ToolInfo,
            v1::spider::PredictionResponse,
            PredictionResult,
            ToolDescriptor,
            ToolList,
            CallToolRequest,
            CallToolResponse,
            Content,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "spider", description = "Protein druggability prediction"),
        (name = "mcp", description = "MCP-like tool discovery and tool calls")
    )
)]
pub struct SpiderApiDoc;

/// Create the BLASTp router with OpenAPI documentation
pub fn create_blastp_router<R: CommandRunner + 'static>(
    state: AppState<BlastpService<R>>,
) -> Router {
    let rest_routes = routes!(R => {
        get "/" => v1::blastp::root,
        get "/api/v1/blastp/health" => v1::blastp::health,
        get "/api/v1/blastp/info" => v1::blastp::info,
        post "/api/v1/blastp/search" => v1::blastp::search,
    });

    let mcp_routes = Router::new()
        .route("/mcp/tools", get(mcp::blastp::list_tools))
        .merge(routes!(R => {
            post "/mcp/call" => mcp::blastp::call_tool,
        }));

    rest_routes
        .merge(mcp_routes)
        .merge(Scalar::with_url("/docs", BlastpApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create the SPIDER router with OpenAPI documentation
pub fn create_spider_router<R: CommandRunner + 'static>(
    state: AppState<SpiderService<R>>,
) -> Router {
    let rest_routes = routes!(R => {
        get "/" => v1::spider::root,
        get "/api/v1/spider/health" => v1::spider::health,
        get "/api/v1/spider/info" => v1::spider::info,
        post "/api/v1/spider/predict" => v1::spider::predict,
    });

    let mcp_routes = Router::new()
        .route("/mcp/tools", get(mcp::spider::list_tools))
        .merge(routes!(R => {
            post "/mcp/call" => mcp::spider::call_tool,
        }));

    rest_routes
        .merge(mcp_routes)
        .merge(Scalar::with_url("/docs", SpiderApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
