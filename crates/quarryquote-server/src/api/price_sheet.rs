use axum::{
    extract::{Query, State},
    Extension, Json,
};
use quarryquote_core::{PriceTier, Product};
use quarryquote_pricing::{filter_products, find_cheapest, round_money, LocationFilter};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{non_blank, parse_tons, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct PriceSheetQuery {
    pub location_name: Option<String>,
    pub location_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CheapestQuery {
    pub tons: Option<String>,
    pub location_name: Option<String>,
    pub location_number: Option<String>,
    #[serde(default)]
    pub account_holder: bool,
    #[serde(default)]
    pub include_delivery: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct CheapestItem {
    product: Product,
    tier: PriceTier,
    include_delivery: bool,
    tons: Decimal,
    total_cost: Decimal,
}

fn location_filter<'a>(
    location_name: Option<&'a str>,
    location_number: Option<&'a str>,
) -> LocationFilter<'a> {
    LocationFilter {
        location_name: non_blank(location_name),
        location_number: non_blank(location_number),
    }
}

pub(super) async fn list_price_sheet(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<PriceSheetQuery>,
) -> Json<ApiResponse<Vec<Product>>> {
    let filter = location_filter(
        query.location_name.as_deref(),
        query.location_number.as_deref(),
    );

    Json(ApiResponse {
        data: filter_products(&state.price_sheet, filter),
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn cheapest_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<CheapestQuery>,
) -> Result<Json<ApiResponse<CheapestItem>>, ApiError> {
    let tons = parse_tons(&req_id.0, query.tons.as_deref())?;
    let tier = PriceTier::for_account_holder(query.account_holder);
    let filter = location_filter(
        query.location_name.as_deref(),
        query.location_number.as_deref(),
    );

    let candidates = filter_products(&state.price_sheet, filter);
    let Some((product, total_cost)) =
        find_cheapest(&candidates, tons, tier, query.include_delivery)
    else {
        return Err(ApiError::not_found(
            req_id.0,
            "No suitable product found with the specified criteria.",
        ));
    };

    Ok(Json(ApiResponse {
        data: CheapestItem {
            product: product.clone(),
            tier,
            include_delivery: query.include_delivery,
            tons: tons.normalize(),
            total_cost: round_money(total_cost),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
