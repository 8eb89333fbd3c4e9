use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::collectors::{CollectorList, CreateCollectorRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Collector,
    response::ApiResponse,
    routes::params::CollectorQuery,
    services::collector_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_collectors).post(create_collector))
        .route("/{id}", get(get_collector))
}

#[utoipa::path(
    get,
    path = "/api/collectors",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search company name"),
    ),
    responses(
        (status = 200, description = "List collectors", body = ApiResponse<CollectorList>)
    ),
    tag = "Collectors"
)]
pub async fn list_collectors(
    State(state): State<AppState>,
    Query(query): Query<CollectorQuery>,
) -> AppResult<Json<ApiResponse<CollectorList>>> {
    let resp = collector_service::list_collectors(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/collectors/{id}",
    params(("id" = Uuid, Path, description = "Collector ID")),
    responses(
        (status = 200, description = "Get collector", body = ApiResponse<Collector>),
        (status = 404, description = "Collector not found"),
    ),
    tag = "Collectors"
)]
pub async fn get_collector(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Collector>>> {
    let resp = collector_service::get_collector(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/collectors",
    request_body = CreateCollectorRequest,
    responses(
        (status = 200, description = "Create collector profile", body = ApiResponse<Collector>),
        (status = 400, description = "Profile already exists or invalid field"),
        (status = 403, description = "Caller is not a collector"),
    ),
    security(("bearer_auth" = [])),
    tag = "Collectors"
)]
pub async fn create_collector(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCollectorRequest>,
) -> AppResult<Json<ApiResponse<Collector>>> {
    let resp = collector_service::create_collector(&state, &user, payload).await?;
    Ok(Json(resp))
}
