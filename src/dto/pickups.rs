use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::ScrapPickup;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePickupRequest {
    pub collector_id: Option<Uuid>,
    pub category: String,
    #[schema(value_type = String, example = "12.500")]
    pub estimated_weight: Decimal,
    pub pickup_address: String,
    pub pickup_latitude: f64,
    pub pickup_longitude: f64,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct PickupList {
    #[schema(value_type = Vec<ScrapPickup>)]
    pub items: Vec<ScrapPickup>,
}
