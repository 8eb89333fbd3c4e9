use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::pickups::{CreatePickupRequest, PickupList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::ScrapPickup,
    response::ApiResponse,
    routes::params::PickupListQuery,
    services::pickup_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pickups).post(create_pickup))
        .route("/{id}", get(get_pickup))
}

#[utoipa::path(
    get,
    path = "/api/pickups",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "requested, scheduled, completed, cancelled"),
        ("sort_order" = Option<String>, Query, description = "Sort order: asc, desc")
    ),
    responses(
        (status = 200, description = "Pickups requested by or assigned to the caller", body = ApiResponse<PickupList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Pickups"
)]
pub async fn list_pickups(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<PickupListQuery>,
) -> AppResult<Json<ApiResponse<PickupList>>> {
    let resp = pickup_service::list_pickups(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/pickups",
    request_body = CreatePickupRequest,
    responses(
        (status = 200, description = "Pickup requested", body = ApiResponse<ScrapPickup>),
        (status = 400, description = "Invalid field or unknown collector"),
    ),
    security(("bearer_auth" = [])),
    tag = "Pickups"
)]
pub async fn create_pickup(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePickupRequest>,
) -> AppResult<Json<ApiResponse<ScrapPickup>>> {
    let resp = pickup_service::create_pickup(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/pickups/{id}",
    params(("id" = Uuid, Path, description = "Pickup ID")),
    responses(
        (status = 200, description = "Get pickup", body = ApiResponse<ScrapPickup>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Pickups"
)]
pub async fn get_pickup(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ScrapPickup>>> {
    let resp = pickup_service::get_pickup(&state, &user, id).await?;
    Ok(Json(resp))
}
