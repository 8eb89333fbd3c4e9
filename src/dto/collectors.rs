use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Collector, ScrapRate};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCollectorRequest {
    pub company_name: String,
    #[serde(default)]
    pub categories: Vec<ScrapRate>,
    pub latitude: f64,
    pub longitude: f64,
    pub service_radius: Option<i32>,
    pub phone: String,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CollectorList {
    #[schema(value_type = Vec<Collector>)]
    pub items: Vec<Collector>,
}
