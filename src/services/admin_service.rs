use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::IntoColumnRef;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    admin_site::{self, CreatedWithin, search_condition},
    audit,
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
    entity::{
        AuditLogs, Collectors, OrderItems, Orders, Products, ScrapPickups, Users, Vendors,
        audit_logs::Column as AuditCol,
        collectors::{self, ActiveModel as CollectorActive, Column as CollectorCol},
        order_items::Column as OrderItemCol,
        orders::{self, ActiveModel as OrderActive, Column as OrderCol},
        products::{self, ActiveModel as ProductActive, Column as ProdCol},
        scrap_pickups::{self, ActiveModel as PickupActive, Column as PickupCol},
        sea_orm_active_enums::UserRole,
        users::Column as UserCol,
        vendors::{self, ActiveModel as VendorActive, Column as VendorCol},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_staff},
    models::{AuditLog, Collector, Order, OrderItem, Product, ScrapPickup, Vendor},
    response::{ApiResponse, Meta},
    state::AppState,
    validation,
};

/// A profile may only be attached to a user holding the matching role.
async fn ensure_owner_role(state: &AppState, user_id: Uuid, role: UserRole) -> AppResult<()> {
    let owner = match Users::find_by_id(user_id).one(&state.orm).await? {
        Some(u) => u,
        None => return Err(AppError::BadRequest("Unknown user".into())),
    };
    if owner.role != role {
        return Err(AppError::BadRequest(format!(
            "user must have role {}",
            role.as_str()
        )));
    }
    Ok(())
}

fn created_filter(created: Option<CreatedWithin>) -> Option<chrono::DateTime<Utc>> {
    created.map(|period| period.since(Utc::now()))
}

async fn record_change(
    state: &AppState,
    user: &AuthUser,
    action: &str,
    resource: &str,
    object_id: Uuid,
) {
    audit::record(
        &state.pool,
        Some(user.user_id),
        action,
        resource,
        serde_json::json!({ "object_id": object_id, "via": "admin" }),
    )
    .await;
}

pub async fn index(user: &AuthUser) -> AppResult<ApiResponse<AdminIndex>> {
    ensure_staff(user)?;
    let models = admin_site::registry().to_vec();
    Ok(ApiResponse::success("Site administration", AdminIndex { models }, None))
}

// Vendors

pub async fn list_vendors(
    state: &AppState,
    user: &AuthUser,
    query: VendorAdminQuery,
) -> AppResult<ApiResponse<AdminVendorList>> {
    ensure_staff(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    let search_fields = [
        (Vendors, VendorCol::ShopName).into_column_ref(),
        (Users, UserCol::Username).into_column_ref(),
        (Vendors, VendorCol::Address).into_column_ref(),
    ];
    if let Some(search) = search_condition(query.q.as_deref(), &search_fields) {
        condition = condition.add(search);
    }
    if let Some(is_active) = query.is_active {
        condition = condition.add(VendorCol::IsActive.eq(is_active));
    }
    if let Some(since) = created_filter(query.created) {
        condition = condition.add(VendorCol::CreatedAt.gte(since));
    }

    let finder = Vendors::find()
        .join(JoinType::LeftJoin, vendors::Relation::Users.def())
        .filter(condition)
        .order_by_desc(VendorCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Vendor::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Vendors", AdminVendorList { items }, Some(meta)))
}

pub async fn get_vendor(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Vendor>> {
    ensure_staff(user)?;
    let vendor = Vendors::find_by_id(id).one(&state.orm).await?;
    match vendor {
        Some(v) => Ok(ApiResponse::success("Vendor", Vendor::from(v), None)),
        None => Err(AppError::NotFound),
    }
}

pub async fn change_vendor(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: VendorChange,
) -> AppResult<ApiResponse<Vendor>> {
    ensure_staff(user)?;
    let existing = match Vendors::find_by_id(id).one(&state.orm).await? {
        Some(v) => v,
        None => return Err(AppError::NotFound),
    };

    let latitude = payload.latitude.unwrap_or(existing.latitude);
    let longitude = payload.longitude.unwrap_or(existing.longitude);
    validation::coordinates(latitude, longitude)?;

    let mut active: VendorActive = existing.into();
    if let Some(user_id) = payload.user_id {
        ensure_owner_role(state, user_id, UserRole::Vendor).await?;
        active.user_id = Set(user_id);
    }
    if let Some(shop_name) = payload.shop_name {
        validation::required("shop_name", &shop_name)?;
        validation::max_len("shop_name", &shop_name, 255)?;
        active.shop_name = Set(shop_name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(photo) = payload.photo {
        active.photo = Set(photo);
    }
    if let Some(address) = payload.address {
        validation::required("address", &address)?;
        active.address = Set(address);
    }
    if let Some(opening_time) = payload.opening_time {
        active.opening_time = Set(opening_time);
    }
    if let Some(closing_time) = payload.closing_time {
        active.closing_time = Set(closing_time);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.latitude = Set(latitude);
    active.longitude = Set(longitude);

    let vendor = active.update(&state.orm).await?;
    record_change(state, user, "admin_vendor_change", "vendors", vendor.id).await;

    Ok(ApiResponse::success(
        "Vendor changed",
        Vendor::from(vendor),
        Some(Meta::empty()),
    ))
}

pub async fn delete_vendor(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let result = Vendors::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    record_change(state, user, "admin_vendor_delete", "vendors", id).await;
    Ok(ApiResponse::deleted(id))
}

// Products

pub async fn list_products(
    state: &AppState,
    user: &AuthUser,
    query: ProductAdminQuery,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_staff(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    let search_fields = [
        (Products, ProdCol::Name).into_column_ref(),
        (Vendors, VendorCol::ShopName).into_column_ref(),
    ];
    if let Some(search) = search_condition(query.q.as_deref(), &search_fields) {
        condition = condition.add(search);
    }
    if let Some(category) = query.category {
        condition = condition.add(ProdCol::Category.eq(category));
    }
    if let Some(is_active) = query.is_active {
        condition = condition.add(ProdCol::IsActive.eq(is_active));
    }
    if let Some(since) = created_filter(query.created) {
        condition = condition.add(ProdCol::CreatedAt.gte(since));
    }

    let finder = Products::find()
        .join(JoinType::LeftJoin, products::Relation::Vendors.def())
        .filter(condition)
        .order_by_desc(ProdCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Product>> {
    ensure_staff(user)?;
    let product = Products::find_by_id(id).one(&state.orm).await?;
    match product {
        Some(p) => Ok(ApiResponse::success("Product", Product::from(p), None)),
        None => Err(AppError::NotFound),
    }
}

pub async fn change_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: ProductChange,
) -> AppResult<ApiResponse<Product>> {
    ensure_staff(user)?;
    let existing = match Products::find_by_id(id).one(&state.orm).await? {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut active: ProductActive = existing.into();
    if let Some(vendor_id) = payload.vendor_id {
        active.vendor_id = Set(vendor_id);
    }
    if let Some(name) = payload.name {
        validation::required("name", &name)?;
        validation::max_len("name", &name, 255)?;
        active.name = Set(name);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(image) = payload.image {
        active.image = Set(image);
    }
    if let Some(price) = payload.price {
        validation::positive("price", price)?;
        validation::fits_numeric("price", price, 10, 2)?;
        active.price = Set(price);
    }
    if let Some(unit) = payload.unit {
        active.unit = Set(unit);
    }
    if let Some(stock) = payload.stock {
        validation::non_negative_int("stock", stock)?;
        active.stock = Set(stock);
    }
    if let Some(freshness_tag) = payload.freshness_tag {
        validation::max_len("freshness_tag", &freshness_tag, 80)?;
        active.freshness_tag = Set(freshness_tag);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.last_stock_update = Set(Utc::now().into());

    let product = active.update(&state.orm).await?;
    record_change(state, user, "admin_product_change", "products", product.id).await;

    Ok(ApiResponse::success(
        "Product changed",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

/// Applies changelist edits to several products at once. All rows are
/// validated and written in one transaction.
pub async fn bulk_edit_products(
    state: &AppState,
    user: &AuthUser,
    payload: ProductBulkEdit,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_staff(user)?;
    if payload.items.is_empty() {
        return Err(AppError::BadRequest("No rows to edit".into()));
    }
    for row in &payload.items {
        if let Some(stock) = row.stock {
            validation::non_negative_int("stock", stock)?;
        }
    }

    let txn = state.orm.begin().await?;
    let mut items = Vec::with_capacity(payload.items.len());
    for row in payload.items {
        let existing = match Products::find_by_id(row.id).one(&txn).await? {
            Some(p) => p,
            None => return Err(AppError::BadRequest(format!("Unknown product {}", row.id))),
        };
        let mut active: ProductActive = existing.into();
        if let Some(stock) = row.stock {
            active.stock = Set(stock);
        }
        if let Some(is_active) = row.is_active {
            active.is_active = Set(is_active);
        }
        active.last_stock_update = Set(Utc::now().into());
        let product = active.update(&txn).await?;
        items.push(Product::from(product));
    }
    txn.commit().await?;

    let ids: Vec<Uuid> = items.iter().map(|p: &Product| p.id).collect();
    tracing::info!(rows = ids.len(), "admin bulk product edit");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "admin_product_bulk_edit",
        "products",
        serde_json::json!({ "product_ids": ids, "via": "admin" }),
    )
    .await;

    Ok(ApiResponse::success(
        "Products changed",
        ProductList { items },
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    record_change(state, user, "admin_product_delete", "products", id).await;
    Ok(ApiResponse::deleted(id))
}

// Orders

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderAdminQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_staff(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    let search_fields = [
        (Users, UserCol::Username).into_column_ref(),
        (Vendors, VendorCol::ShopName).into_column_ref(),
    ];
    if let Some(search) = search_condition(query.q.as_deref(), &search_fields) {
        condition = condition.add(search);
    }
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status));
    }
    if let Some(since) = created_filter(query.created) {
        condition = condition.add(OrderCol::CreatedAt.gte(since));
    }

    let finder = Orders::find()
        .join(JoinType::LeftJoin, orders::Relation::Users.def())
        .join(JoinType::LeftJoin, orders::Relation::Vendors.def())
        .filter(condition)
        .order_by_desc(OrderCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_staff(user)?;
    let order = match Orders::find_by_id(id).one(&state.orm).await? {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();

    Ok(ApiResponse::success(
        "Order found",
        OrderWithItems {
            order: Order::from(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn change_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: OrderChange,
) -> AppResult<ApiResponse<Order>> {
    ensure_staff(user)?;
    let existing = match Orders::find_by_id(id).one(&state.orm).await? {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };
    let previous_status = existing.status;

    let latitude = payload.delivery_latitude.unwrap_or(existing.delivery_latitude);
    let longitude = payload.delivery_longitude.unwrap_or(existing.delivery_longitude);
    validation::coordinates(latitude, longitude)?;

    let mut active: OrderActive = existing.into();
    if let Some(customer_id) = payload.customer_id {
        active.customer_id = Set(customer_id);
    }
    if let Some(vendor_id) = payload.vendor_id {
        active.vendor_id = Set(vendor_id);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(delivery_address) = payload.delivery_address {
        validation::required("delivery_address", &delivery_address)?;
        active.delivery_address = Set(delivery_address);
    }
    if let Some(total_amount) = payload.total_amount {
        validation::fits_numeric("total_amount", total_amount, 12, 2)?;
        active.total_amount = Set(total_amount);
    }
    if let Some(delivery_fee) = payload.delivery_fee {
        validation::non_negative("delivery_fee", delivery_fee)?;
        validation::fits_numeric("delivery_fee", delivery_fee, 8, 2)?;
        active.delivery_fee = Set(delivery_fee);
    }
    active.delivery_latitude = Set(latitude);
    active.delivery_longitude = Set(longitude);
    active.updated_at = Set(Utc::now().into());

    let order = active.update(&state.orm).await?;

    if order.status != previous_status {
        tracing::info!(
            order_id = %order.id,
            from = previous_status.as_str(),
            to = order.status.as_str(),
            "order status changed"
        );
    }
    audit::record(
        &state.pool,
        Some(user.user_id),
        "admin_order_change",
        "orders",
        serde_json::json!({
            "object_id": order.id,
            "status": order.status,
            "via": "admin",
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order changed",
        Order::from(order),
        Some(Meta::empty()),
    ))
}

pub async fn delete_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let result = Orders::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    record_change(state, user, "admin_order_delete", "orders", id).await;
    Ok(ApiResponse::deleted(id))
}

// Collectors

pub async fn list_collectors(
    state: &AppState,
    user: &AuthUser,
    query: CollectorAdminQuery,
) -> AppResult<ApiResponse<AdminCollectorList>> {
    ensure_staff(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    let search_fields = [
        (Collectors, CollectorCol::CompanyName).into_column_ref(),
        (Users, UserCol::Username).into_column_ref(),
        (Collectors, CollectorCol::Phone).into_column_ref(),
    ];
    if let Some(search) = search_condition(query.q.as_deref(), &search_fields) {
        condition = condition.add(search);
    }

    let finder = Collectors::find()
        .join(JoinType::LeftJoin, collectors::Relation::Users.def())
        .filter(condition)
        .order_by_desc(CollectorCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Collector::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Collectors",
        AdminCollectorList { items },
        Some(meta),
    ))
}

pub async fn get_collector(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Collector>> {
    ensure_staff(user)?;
    let collector = Collectors::find_by_id(id).one(&state.orm).await?;
    match collector {
        Some(c) => Ok(ApiResponse::success("Collector", Collector::from(c), None)),
        None => Err(AppError::NotFound),
    }
}

pub async fn change_collector(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: CollectorChange,
) -> AppResult<ApiResponse<Collector>> {
    ensure_staff(user)?;
    let existing = match Collectors::find_by_id(id).one(&state.orm).await? {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let latitude = payload.latitude.unwrap_or(existing.latitude);
    let longitude = payload.longitude.unwrap_or(existing.longitude);
    validation::coordinates(latitude, longitude)?;

    let mut active: CollectorActive = existing.into();
    if let Some(user_id) = payload.user_id {
        ensure_owner_role(state, user_id, UserRole::Collector).await?;
        active.user_id = Set(user_id);
    }
    if let Some(company_name) = payload.company_name {
        validation::required("company_name", &company_name)?;
        validation::max_len("company_name", &company_name, 255)?;
        active.company_name = Set(company_name);
    }
    if let Some(categories) = payload.categories {
        if !categories.is_array() {
            return Err(AppError::BadRequest("categories must be a JSON list".into()));
        }
        active.categories = Set(categories);
    }
    if let Some(service_radius) = payload.service_radius {
        if service_radius <= 0 {
            return Err(AppError::BadRequest(
                "service_radius must be greater than 0".into(),
            ));
        }
        active.service_radius = Set(service_radius);
    }
    if let Some(phone) = payload.phone {
        validation::phone(&phone)?;
        active.phone = Set(phone);
    }
    active.latitude = Set(latitude);
    active.longitude = Set(longitude);

    let collector = active.update(&state.orm).await?;
    record_change(state, user, "admin_collector_change", "collectors", collector.id).await;

    Ok(ApiResponse::success(
        "Collector changed",
        Collector::from(collector),
        Some(Meta::empty()),
    ))
}

pub async fn delete_collector(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let result = Collectors::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    record_change(state, user, "admin_collector_delete", "collectors", id).await;
    Ok(ApiResponse::deleted(id))
}

// Scrap pickups

pub async fn list_pickups(
    state: &AppState,
    user: &AuthUser,
    query: PickupAdminQuery,
) -> AppResult<ApiResponse<AdminPickupList>> {
    ensure_staff(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    let search_fields = [
        (Users, UserCol::Username).into_column_ref(),
        (Collectors, CollectorCol::CompanyName).into_column_ref(),
    ];
    if let Some(search) = search_condition(query.q.as_deref(), &search_fields) {
        condition = condition.add(search);
    }
    if let Some(status) = query.status {
        condition = condition.add(PickupCol::Status.eq(status));
    }
    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        condition = condition.add(PickupCol::Category.eq(category));
    }
    if let Some(since) = created_filter(query.created) {
        condition = condition.add(PickupCol::CreatedAt.gte(since));
    }

    let finder = ScrapPickups::find()
        .join(JoinType::LeftJoin, scrap_pickups::Relation::Users.def())
        .join(JoinType::LeftJoin, scrap_pickups::Relation::Collectors.def())
        .filter(condition)
        .order_by_desc(PickupCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(ScrapPickup::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Scrap pickups", AdminPickupList { items }, Some(meta)))
}

pub async fn get_pickup(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<ScrapPickup>> {
    ensure_staff(user)?;
    let pickup = ScrapPickups::find_by_id(id).one(&state.orm).await?;
    match pickup {
        Some(p) => Ok(ApiResponse::success("Scrap pickup", ScrapPickup::from(p), None)),
        None => Err(AppError::NotFound),
    }
}

pub async fn change_pickup(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: PickupChange,
) -> AppResult<ApiResponse<ScrapPickup>> {
    ensure_staff(user)?;
    let existing = match ScrapPickups::find_by_id(id).one(&state.orm).await? {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let latitude = payload.pickup_latitude.unwrap_or(existing.pickup_latitude);
    let longitude = payload.pickup_longitude.unwrap_or(existing.pickup_longitude);
    validation::coordinates(latitude, longitude)?;

    let mut active: PickupActive = existing.into();
    if let Some(customer_id) = payload.customer_id {
        active.customer_id = Set(customer_id);
    }
    if let Some(collector_id) = payload.collector_id {
        active.collector_id = Set(collector_id);
    }
    if let Some(category) = payload.category {
        let category = category.trim().to_string();
        validation::required("category", &category)?;
        validation::max_len("category", &category, 80)?;
        active.category = Set(category);
    }
    if let Some(estimated_weight) = payload.estimated_weight {
        validation::positive("estimated_weight", estimated_weight)?;
        validation::fits_numeric("estimated_weight", estimated_weight, 10, 3)?;
        active.estimated_weight = Set(estimated_weight);
    }
    if let Some(pickup_address) = payload.pickup_address {
        validation::required("pickup_address", &pickup_address)?;
        active.pickup_address = Set(pickup_address);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    active.pickup_latitude = Set(latitude);
    active.pickup_longitude = Set(longitude);

    let pickup = active.update(&state.orm).await?;
    record_change(state, user, "admin_pickup_change", "scrap_pickups", pickup.id).await;

    Ok(ApiResponse::success(
        "Scrap pickup changed",
        ScrapPickup::from(pickup),
        Some(Meta::empty()),
    ))
}

pub async fn delete_pickup(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let result = ScrapPickups::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    record_change(state, user, "admin_pickup_delete", "scrap_pickups", id).await;
    Ok(ApiResponse::deleted(id))
}

// Audit trail

pub async fn list_audit_logs(
    state: &AppState,
    user: &AuthUser,
    query: AuditLogQuery,
) -> AppResult<ApiResponse<AuditLogList>> {
    ensure_staff(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(action) = query.action.as_deref().filter(|a| !a.is_empty()) {
        condition = condition.add(AuditCol::Action.eq(action));
    }

    let finder = AuditLogs::find()
        .filter(condition)
        .order_by_desc(AuditCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(AuditLog::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Audit log", AuditLogList { items }, Some(meta)))
}
