use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::sea_orm_active_enums::{OrderStatus, PickupStatus, ProductCategory};

#[derive(Debug, Default, Clone, Copy, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1).saturating_mul(per_page);
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortBy {
    CreatedAt,
    Price,
    Name,
}

// Query strings are decoded without `#[serde(flatten)]`: flattened structs lose
// the typed parsing of numbers and booleans in `serde_urlencoded`.

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub q: Option<String>,
    pub vendor_id: Option<Uuid>,
    pub category: Option<ProductCategory>,
    #[schema(value_type = Option<String>)]
    pub min_price: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub max_price: Option<Decimal>,
    pub sort_by: Option<ProductSortBy>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VendorQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CollectorQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<OrderStatus>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PickupListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<PickupStatus>,
    pub sort_order: Option<SortOrder>,
}

macro_rules! paginated {
    ($($query:ty),+ $(,)?) => {
        $(
            impl $query {
                pub fn pagination(&self) -> $crate::routes::params::Pagination {
                    $crate::routes::params::Pagination {
                        page: self.page,
                        per_page: self.per_page,
                    }
                }
            }
        )+
    };
}

pub(crate) use paginated;

paginated!(
    ProductQuery,
    VendorQuery,
    CollectorQuery,
    OrderListQuery,
    PickupListQuery,
);
