use axum::{
    extract::{Query, State},
    Extension, Json,
};
use quarryquote_core::{PriceTier, Quote};
use quarryquote_pricing::{round_money, MaterialSelection, QuoteRequest};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{non_blank, parse_tons, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct QuoteQuery {
    pub destination: Option<String>,
    pub tons: Option<String>,
    /// `AUTO` (default) or a catalog material id.
    pub material_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct QuoteItem {
    destination_id: String,
    material_id: Option<i64>,
    material_name: String,
    rtt_minutes: u32,
    tons: Decimal,
    material_price: Decimal,
    haul_rate_per_ton: Decimal,
    tax_rate: Decimal,
    total_job_price: Decimal,
    breakdown: String,
}

impl QuoteItem {
    fn from_quote(destination_id: String, quote: Quote) -> Self {
        Self {
            destination_id,
            material_id: quote.product.id,
            material_name: quote.product.name,
            rtt_minutes: quote.rtt_minutes,
            tons: quote.tons.normalize(),
            material_price: round_money(quote.material_price),
            haul_rate_per_ton: round_money(quote.haul_rate_per_ton),
            tax_rate: quote.tax_rate,
            total_job_price: round_money(quote.total_job_price),
            breakdown: quote.breakdown,
        }
    }
}

pub(super) async fn get_quote(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<ApiResponse<QuoteItem>>, ApiError> {
    let destination_id = non_blank(query.destination.as_deref())
        .ok_or_else(|| ApiError::validation(req_id.0.clone(), "destination is required"))?
        .to_string();
    let tons = parse_tons(&req_id.0, query.tons.as_deref())?;
    let selection = match non_blank(query.material_id.as_deref()) {
        Some(raw) => raw
            .parse::<MaterialSelection>()
            .map_err(|e| ApiError::validation(req_id.0.clone(), e.to_string()))?,
        None => MaterialSelection::Auto,
    };

    let request = QuoteRequest {
        destination_id,
        tons,
        tier: PriceTier::NonAccount,
        selection,
    };

    let Some(quote) = state.engine.best_quote(&state.catalog.materials, &request) else {
        tracing::info!(
            destination_id = %request.destination_id,
            ?selection,
            "no quote available"
        );
        return Err(ApiError::not_found(
            req_id.0,
            format!("no quote available for destination {}", request.destination_id),
        ));
    };

    tracing::debug!(
        destination_id = %request.destination_id,
        material_id = ?quote.product.id,
        total = %quote.total_job_price,
        "quote computed"
    );

    Ok(Json(ApiResponse {
        data: QuoteItem::from_quote(request.destination_id, quote),
        meta: ResponseMeta::new(req_id.0),
    }))
}
