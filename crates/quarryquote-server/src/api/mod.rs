mod catalog;
mod price_sheet;
mod quote;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use quarryquote_core::{Catalog, Product};
use quarryquote_pricing::{HaulRates, QuoteEngine};
use rust_decimal::Decimal;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

/// Read-only data shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub engine: Arc<QuoteEngine>,
    pub price_sheet: Arc<Vec<Product>>,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Catalog, price_sheet: Vec<Product>, rates: HaulRates) -> Self {
        let engine = QuoteEngine::new(catalog.routes.clone(), rates);
        Self {
            catalog: Arc::new(catalog),
            engine: Arc::new(engine),
            price_sheet: Arc::new(price_sheet),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    materials: usize,
    price_sheet_products: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    pub fn validation(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(request_id, "validation_error", message)
    }

    pub fn not_found(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(request_id, "not_found", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Parses a required, strictly positive tonnage query parameter.
pub(super) fn parse_tons(request_id: &str, raw: Option<&str>) -> Result<Decimal, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation(request_id, "tons is required"))?;

    let tons: Decimal = raw.parse().map_err(|_| {
        ApiError::validation(request_id, format!("tons must be a number, got {raw}"))
    })?;

    if tons <= Decimal::ZERO {
        return Err(ApiError::validation(
            request_id,
            format!("tons must be greater than zero, got {raw}"),
        ));
    }
    Ok(tons)
}

/// Treats blank query values as absent.
pub(super) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/products", get(catalog::list_materials))
        .route("/api/v1/destinations", get(catalog::list_destinations))
        .route("/api/v1/quote", get(quote::get_quote))
        .route("/api/v1/price-sheet", get(price_sheet::list_price_sheet))
        .route(
            "/api/v1/price-sheet/cheapest",
            get(price_sheet::cheapest_product),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            materials: state.catalog.materials.len(),
            price_sheet_products: state.price_sheet.len(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
