use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::vendors::{CreateVendorRequest, UpdateVendorRequest, VendorList, VendorStatusRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Vendor,
    response::ApiResponse,
    routes::params::VendorQuery,
    services::vendor_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vendors).post(create_vendor))
        .route("/{id}", get(get_vendor).put(update_vendor))
        .route("/{id}/status", patch(set_vendor_status))
}

#[utoipa::path(
    get,
    path = "/api/vendors",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search shop name and address"),
    ),
    responses(
        (status = 200, description = "List active vendors", body = ApiResponse<VendorList>)
    ),
    tag = "Vendors"
)]
pub async fn list_vendors(
    State(state): State<AppState>,
    Query(query): Query<VendorQuery>,
) -> AppResult<Json<ApiResponse<VendorList>>> {
    let resp = vendor_service::list_vendors(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/vendors/{id}",
    params(("id" = Uuid, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Get vendor", body = ApiResponse<Vendor>),
        (status = 404, description = "Vendor not found"),
    ),
    tag = "Vendors"
)]
pub async fn get_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vendor>>> {
    let resp = vendor_service::get_vendor(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/vendors",
    request_body = CreateVendorRequest,
    responses(
        (status = 200, description = "Create vendor profile", body = ApiResponse<Vendor>),
        (status = 400, description = "Profile already exists or invalid field"),
        (status = 403, description = "Caller is not a vendor"),
    ),
    security(("bearer_auth" = [])),
    tag = "Vendors"
)]
pub async fn create_vendor(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateVendorRequest>,
) -> AppResult<Json<ApiResponse<Vendor>>> {
    let resp = vendor_service::create_vendor(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/vendors/{id}",
    params(("id" = Uuid, Path, description = "Vendor ID")),
    request_body = UpdateVendorRequest,
    responses(
        (status = 200, description = "Updated vendor", body = ApiResponse<Vendor>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Vendor not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Vendors"
)]
pub async fn update_vendor(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVendorRequest>,
) -> AppResult<Json<ApiResponse<Vendor>>> {
    let resp = vendor_service::update_vendor(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/vendors/{id}/status",
    params(("id" = Uuid, Path, description = "Vendor ID")),
    request_body = VendorStatusRequest,
    responses(
        (status = 200, description = "Vendor opened or closed", body = ApiResponse<Vendor>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Vendor not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Vendors"
)]
pub async fn set_vendor_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<VendorStatusRequest>,
) -> AppResult<Json<ApiResponse<Vendor>>> {
    let resp = vendor_service::set_vendor_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
