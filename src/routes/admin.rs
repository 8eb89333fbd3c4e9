use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::{
        admin::{
            AdminCollectorList, AdminIndex, AdminPickupList, AdminVendorList, AuditLogList,
            AuditLogQuery, CollectorAdminQuery, CollectorChange, OrderAdminQuery, OrderChange,
            PickupAdminQuery, PickupChange, ProductAdminQuery, ProductBulkEdit, ProductChange,
            VendorAdminQuery, VendorChange,
        },
        orders::{OrderList, OrderWithItems},
        products::ProductList,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Collector, Order, Product, ScrapPickup, Vendor},
    response::ApiResponse,
    services::admin_service,
    state::AppState,
};

type Deleted = Json<ApiResponse<serde_json::Value>>;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/vendors", get(list_vendors))
        .route(
            "/vendors/{id}",
            get(get_vendor).patch(change_vendor).delete(delete_vendor),
        )
        .route("/products", get(list_products).patch(bulk_edit_products))
        .route(
            "/products/{id}",
            get(get_product).patch(change_product).delete(delete_product),
        )
        .route("/orders", get(list_orders))
        .route(
            "/orders/{id}",
            get(get_order).patch(change_order).delete(delete_order),
        )
        .route("/collectors", get(list_collectors))
        .route(
            "/collectors/{id}",
            get(get_collector)
                .patch(change_collector)
                .delete(delete_collector),
        )
        .route("/scrap-pickups", get(list_pickups))
        .route(
            "/scrap-pickups/{id}",
            get(get_pickup).patch(change_pickup).delete(delete_pickup),
        )
        .route("/audit-logs", get(list_audit_logs))
}

#[utoipa::path(
    get,
    path = "/api/admin",
    responses(
        (status = 200, description = "Registered models and their admin configuration", body = ApiResponse<AdminIndex>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn index(user: AuthUser) -> AppResult<Json<ApiResponse<AdminIndex>>> {
    let resp = admin_service::index(&user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/vendors",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search shop name, owner username and address"),
        ("is_active" = Option<bool>, Query, description = "Filter by open/closed"),
        ("created" = Option<String>, Query, description = "today, past_7_days, this_month, this_year"),
    ),
    responses(
        (status = 200, description = "Vendor changelist", body = ApiResponse<AdminVendorList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_vendors(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<VendorAdminQuery>,
) -> AppResult<Json<ApiResponse<AdminVendorList>>> {
    let resp = admin_service::list_vendors(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/vendors/{id}",
    params(("id" = Uuid, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Vendor", body = ApiResponse<Vendor>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_vendor(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vendor>>> {
    let resp = admin_service::get_vendor(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/vendors/{id}",
    params(("id" = Uuid, Path, description = "Vendor ID")),
    request_body = VendorChange,
    responses(
        (status = 200, description = "Vendor changed", body = ApiResponse<Vendor>),
        (status = 400, description = "Invalid value"),
        (status = 422, description = "Readonly or unknown field"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn change_vendor(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<VendorChange>,
) -> AppResult<Json<ApiResponse<Vendor>>> {
    let resp = admin_service::change_vendor(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/vendors/{id}",
    params(("id" = Uuid, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Vendor deleted with its products; orders keep a null vendor"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_vendor(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Deleted> {
    let resp = admin_service::delete_vendor(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search name and vendor shop name"),
        ("category" = Option<String>, Query, description = "Filter by category"),
        ("is_active" = Option<bool>, Query, description = "Filter by active flag"),
        ("created" = Option<String>, Query, description = "today, past_7_days, this_month, this_year"),
    ),
    responses(
        (status = 200, description = "Product changelist", body = ApiResponse<ProductList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_products(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ProductAdminQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = admin_service::list_products(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/products",
    request_body = ProductBulkEdit,
    responses(
        (status = 200, description = "Stock and active flags edited from the changelist", body = ApiResponse<ProductList>),
        (status = 400, description = "Unknown product or negative stock"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn bulk_edit_products(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ProductBulkEdit>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = admin_service::bulk_edit_products(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = ApiResponse<Product>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::get_product(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = ProductChange,
    responses(
        (status = 200, description = "Product changed", body = ApiResponse<Product>),
        (status = 400, description = "Invalid value"),
        (status = 422, description = "Readonly or unknown field"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn change_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductChange>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::change_product(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Deleted> {
    let resp = admin_service::delete_product(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search customer username and vendor shop name"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("created" = Option<String>, Query, description = "today, past_7_days, this_month, this_year"),
    ),
    responses(
        (status = 200, description = "Order changelist", body = ApiResponse<OrderList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderAdminQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = admin_service::list_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with its inline items", body = ApiResponse<OrderWithItems>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = admin_service::get_order(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = OrderChange,
    responses(
        (status = 200, description = "Order changed", body = ApiResponse<Order>),
        (status = 400, description = "Invalid value"),
        (status = 422, description = "Readonly or unknown field"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn change_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrderChange>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = admin_service::change_order(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order deleted with its items"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Deleted> {
    let resp = admin_service::delete_order(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/collectors",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search company name, owner username and phone"),
    ),
    responses(
        (status = 200, description = "Collector changelist", body = ApiResponse<AdminCollectorList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_collectors(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CollectorAdminQuery>,
) -> AppResult<Json<ApiResponse<AdminCollectorList>>> {
    let resp = admin_service::list_collectors(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/collectors/{id}",
    params(("id" = Uuid, Path, description = "Collector ID")),
    responses(
        (status = 200, description = "Collector", body = ApiResponse<Collector>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_collector(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Collector>>> {
    let resp = admin_service::get_collector(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/collectors/{id}",
    params(("id" = Uuid, Path, description = "Collector ID")),
    request_body = CollectorChange,
    responses(
        (status = 200, description = "Collector changed", body = ApiResponse<Collector>),
        (status = 400, description = "Invalid value"),
        (status = 422, description = "Readonly or unknown field"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn change_collector(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CollectorChange>,
) -> AppResult<Json<ApiResponse<Collector>>> {
    let resp = admin_service::change_collector(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/collectors/{id}",
    params(("id" = Uuid, Path, description = "Collector ID")),
    responses(
        (status = 200, description = "Collector deleted; its pickups become unassigned"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_collector(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Deleted> {
    let resp = admin_service::delete_collector(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/scrap-pickups",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search customer username and collector company"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("category" = Option<String>, Query, description = "Filter by scrap category"),
        ("created" = Option<String>, Query, description = "today, past_7_days, this_month, this_year"),
    ),
    responses(
        (status = 200, description = "Scrap pickup changelist", body = ApiResponse<AdminPickupList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_pickups(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<PickupAdminQuery>,
) -> AppResult<Json<ApiResponse<AdminPickupList>>> {
    let resp = admin_service::list_pickups(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/scrap-pickups/{id}",
    params(("id" = Uuid, Path, description = "Pickup ID")),
    responses(
        (status = 200, description = "Scrap pickup", body = ApiResponse<ScrapPickup>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_pickup(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ScrapPickup>>> {
    let resp = admin_service::get_pickup(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/scrap-pickups/{id}",
    params(("id" = Uuid, Path, description = "Pickup ID")),
    request_body = PickupChange,
    responses(
        (status = 200, description = "Scrap pickup changed", body = ApiResponse<ScrapPickup>),
        (status = 400, description = "Invalid value"),
        (status = 422, description = "Readonly or unknown field"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn change_pickup(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PickupChange>,
) -> AppResult<Json<ApiResponse<ScrapPickup>>> {
    let resp = admin_service::change_pickup(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/scrap-pickups/{id}",
    params(("id" = Uuid, Path, description = "Pickup ID")),
    responses(
        (status = 200, description = "Scrap pickup deleted"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_pickup(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Deleted> {
    let resp = admin_service::delete_pickup(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/audit-logs",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("action" = Option<String>, Query, description = "Filter by action, e.g. admin_order_change"),
    ),
    responses(
        (status = 200, description = "Audit trail, newest first", body = ApiResponse<AuditLogList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_audit_logs(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AuditLogQuery>,
) -> AppResult<Json<ApiResponse<AuditLogList>>> {
    let resp = admin_service::list_audit_logs(&state, &user, query).await?;
    Ok(Json(resp))
}
