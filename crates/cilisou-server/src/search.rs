//! The search route
//!
//! Validates the inbound query, feeds the core pipeline and maps its
//! typed failures onto transport statuses. Resolution and fetch
//! failures are logged in full here and surfaced to the caller as one
//! generic error.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json,
    extract::{ConnectInfo, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use cilisou_core::{GatewayError, OutputFormat, ResolveBackend, format};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "type")]
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

pub async fn search<B: ResolveBackend + 'static>(
    State(state): State<Arc<AppState<B>>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(params): Query<SearchParams>,
) -> Response {
    let (Some(term), Some(page)) = (params.q, params.page) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing query parameters: q and page",
        );
    };

    let output = OutputFormat::from_param(params.format.as_deref());
    let client_id = addr.ip().to_string();

    match state.gateway().search(&client_id, &term, &page).await {
        Ok(records) => {
            info!(client = %client_id, %term, %page, results = records.len(), "search served");
            match output {
                OutputFormat::Json => Json(format::to_json(&page, &records)).into_response(),
                OutputFormat::Markdown => format::to_markdown(&records).into_response(),
                OutputFormat::Text => format::to_text(&records).into_response(),
            }
        }
        Err(GatewayError::RateLimited { retry_after }) => {
            info!(client = %client_id, ?retry_after, "request inside cooldown window");
            error_response(
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests, please wait 10 seconds.",
            )
        }
        Err(e) => {
            // Full cause stays in the logs; the caller gets a generic body.
            error!(client = %client_id, %term, %page, "search pipeline failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error fetching data")
        }
    }
}
