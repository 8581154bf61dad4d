use axum::{extract::State, Extension, Json};
use quarryquote_core::CatalogEntry;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct MaterialItem {
    id: i64,
    name: String,
    quarry_id: String,
    price: Decimal,
    tax_rate: Decimal,
}

impl From<&CatalogEntry> for MaterialItem {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            quarry_id: entry.quarry_id.clone(),
            price: quarryquote_pricing::round_money(entry.price),
            tax_rate: entry.tax_rate,
        }
    }
}

pub(super) async fn list_materials(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<MaterialItem>>> {
    let data = state.catalog.materials.iter().map(MaterialItem::from).collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn list_destinations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<String>>> {
    let data = state
        .engine
        .routes()
        .destinations()
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
