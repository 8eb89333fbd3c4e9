use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod choices;
pub mod collectors;
pub mod doc;
pub mod health;
pub mod orders;
pub mod params;
pub mod pickups;
pub mod products;
pub mod vendors;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/vendors", vendors::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/collectors", collectors::router())
        .nest("/pickups", pickups::router())
        .nest("/choices", choices::router())
        .nest("/admin", admin::router())
}
