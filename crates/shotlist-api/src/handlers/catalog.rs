//! Form options.

use axum::Json;
use serde::Serialize;
use shotlist_models::{ProductCategory, DEFAULT_STYLE};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    pub categories: Vec<&'static str>,
    pub default_category: &'static str,
    pub default_style: &'static str,
}

/// Fixed product category list plus the form defaults.
pub async fn list_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: ProductCategory::ALL.iter().map(|c| c.label()).collect(),
        default_category: ProductCategory::default().label(),
        default_style: DEFAULT_STYLE,
    })
}
