use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Vendor;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateVendorRequest {
    pub shop_name: String,
    #[serde(default)]
    pub description: String,
    pub photo: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    #[schema(value_type = String, example = "07:00:00")]
    pub opening_time: NaiveTime,
    #[schema(value_type = String, example = "20:00:00")]
    pub closing_time: NaiveTime,
}

/// Owner edits. Rating aggregates are not writable here.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateVendorRequest {
    pub shop_name: Option<String>,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    #[schema(value_type = Option<String>)]
    pub opening_time: Option<NaiveTime>,
    #[schema(value_type = Option<String>)]
    pub closing_time: Option<NaiveTime>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VendorStatusRequest {
    pub is_active: bool,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct VendorList {
    #[schema(value_type = Vec<Vendor>)]
    pub items: Vec<Vendor>,
}
