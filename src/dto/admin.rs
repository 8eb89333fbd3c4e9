use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    admin_site::{CreatedWithin, ModelAdmin},
    entity::sea_orm_active_enums::{OrderStatus, PickupStatus, ProductCategory, ProductUnit},
    models::{AuditLog, Collector, ScrapPickup, Vendor},
    routes::params::paginated,
};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminIndex {
    pub models: Vec<ModelAdmin>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VendorAdminQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub q: Option<String>,
    pub is_active: Option<bool>,
    pub created: Option<CreatedWithin>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductAdminQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub q: Option<String>,
    pub category: Option<ProductCategory>,
    pub is_active: Option<bool>,
    pub created: Option<CreatedWithin>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderAdminQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub q: Option<String>,
    pub status: Option<OrderStatus>,
    pub created: Option<CreatedWithin>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CollectorAdminQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PickupAdminQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub q: Option<String>,
    pub status: Option<PickupStatus>,
    pub category: Option<String>,
    pub created: Option<CreatedWithin>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AuditLogQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub action: Option<String>,
}

paginated!(
    VendorAdminQuery,
    ProductAdminQuery,
    OrderAdminQuery,
    CollectorAdminQuery,
    PickupAdminQuery,
    AuditLogQuery,
);

/// Change form for a vendor. `rating`, `total_reviews` and `created_at` are readonly.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct VendorChange {
    pub user_id: Option<Uuid>,
    pub shop_name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub photo: Option<Option<String>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    #[schema(value_type = Option<String>)]
    pub opening_time: Option<NaiveTime>,
    #[schema(value_type = Option<String>)]
    pub closing_time: Option<NaiveTime>,
    pub is_active: Option<bool>,
}

/// Change form for a product. `created_at` and `last_stock_update` are readonly.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ProductChange {
    pub vendor_id: Option<Uuid>,
    pub name: Option<String>,
    pub category: Option<ProductCategory>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub unit: Option<ProductUnit>,
    pub stock: Option<i32>,
    pub freshness_tag: Option<String>,
    pub is_active: Option<bool>,
}

/// One changelist row edited in place (`list_editable`).
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ProductRowEdit {
    pub id: Uuid,
    pub stock: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductBulkEdit {
    pub items: Vec<ProductRowEdit>,
}

/// Change form for an order. Line items are readonly inlines.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct OrderChange {
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub customer_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub vendor_id: Option<Option<Uuid>>,
    pub status: Option<OrderStatus>,
    pub delivery_address: Option<String>,
    pub delivery_latitude: Option<f64>,
    pub delivery_longitude: Option<f64>,
    #[schema(value_type = Option<String>)]
    pub total_amount: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub delivery_fee: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CollectorChange {
    pub user_id: Option<Uuid>,
    pub company_name: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub categories: Option<serde_json::Value>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub service_radius: Option<i32>,
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PickupChange {
    pub customer_id: Option<Uuid>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub collector_id: Option<Option<Uuid>>,
    pub category: Option<String>,
    #[schema(value_type = Option<String>)]
    pub estimated_weight: Option<Decimal>,
    pub pickup_address: Option<String>,
    pub pickup_latitude: Option<f64>,
    pub pickup_longitude: Option<f64>,
    pub status: Option<PickupStatus>,
}

#[derive(Serialize, ToSchema)]
pub struct AdminVendorList {
    pub items: Vec<Vendor>,
}

#[derive(Serialize, ToSchema)]
pub struct AdminCollectorList {
    pub items: Vec<Collector>,
}

#[derive(Serialize, ToSchema)]
pub struct AdminPickupList {
    pub items: Vec<ScrapPickup>,
}

#[derive(Serialize, ToSchema)]
pub struct AuditLogList {
    pub items: Vec<AuditLog>,
}
