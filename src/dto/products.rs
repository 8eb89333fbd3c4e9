use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::sea_orm_active_enums::{ProductCategory, ProductUnit},
    models::Product,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub category: ProductCategory,
    #[schema(value_type = String, example = "40.00")]
    pub price: Decimal,
    pub unit: ProductUnit,
    #[serde(default)]
    pub stock: i32,
    pub image: Option<String>,
    #[serde(default)]
    pub freshness_tag: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub category: Option<ProductCategory>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub unit: Option<ProductUnit>,
    pub stock: Option<i32>,
    pub image: Option<String>,
    pub freshness_tag: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStockRequest {
    pub stock: i32,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
