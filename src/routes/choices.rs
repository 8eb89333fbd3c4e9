use axum::{Json, Router, routing::get};
use sea_orm::Iterable;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    entity::sea_orm_active_enums::{
        OrderStatus, PickupStatus, ProductCategory, ProductUnit, UserRole,
    },
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

/// Value/label pairs for every enumerated field, for building forms.
#[derive(Debug, Serialize, ToSchema)]
pub struct Choices {
    pub roles: Vec<Choice>,
    pub product_categories: Vec<Choice>,
    pub product_units: Vec<Choice>,
    pub order_statuses: Vec<Choice>,
    pub pickup_statuses: Vec<Choice>,
}

macro_rules! choices_of {
    ($enum:ty) => {
        <$enum>::iter()
            .map(|v| Choice {
                value: v.as_str(),
                label: v.label(),
            })
            .collect()
    };
}

pub fn all() -> Choices {
    Choices {
        roles: choices_of!(UserRole),
        product_categories: choices_of!(ProductCategory),
        product_units: choices_of!(ProductUnit),
        order_statuses: choices_of!(OrderStatus),
        pickup_statuses: choices_of!(PickupStatus),
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_choices))
}

#[utoipa::path(
    get,
    path = "/api/choices",
    responses(
        (status = 200, description = "Choices for enumerated fields", body = ApiResponse<Choices>),
    ),
    tag = "Choices"
)]
pub async fn list_choices() -> Json<ApiResponse<Choices>> {
    Json(ApiResponse::success("Choices", all(), Some(Meta::empty())))
}
