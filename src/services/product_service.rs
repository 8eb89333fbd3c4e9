use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::IntoColumnRef;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    admin_site::search_condition,
    audit,
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest, UpdateStockRequest},
    entity::{
        Products, Vendors,
        products::{ActiveModel, Column, Model as ProductModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    services::vendor_service,
    state::AppState,
    validation,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all().add(Column::IsActive.eq(true));

    let search_fields = [
        (Products, Column::Name).into_column_ref(),
        (Products, Column::FreshnessTag).into_column_ref(),
    ];
    if let Some(search) = search_condition(query.q.as_deref(), &search_fields) {
        condition = condition.add(search);
    }

    if let Some(vendor_id) = query.vendor_id {
        condition = condition.add(Column::VendorId.eq(vendor_id));
    }

    if let Some(category) = query.category {
        condition = condition.add(Column::Category.eq(category));
    }

    if let Some(min_price) = query.min_price {
        condition = condition.add(Column::Price.gte(min_price));
    }

    if let Some(max_price) = query.max_price {
        condition = condition.add(Column::Price.lte(max_price));
    }

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let sort_col = match sort_by {
        ProductSortBy::CreatedAt => Column::CreatedAt,
        ProductSortBy::Price => Column::Price,
        ProductSortBy::Name => Column::Name,
    };

    let mut finder = Products::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

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
    let data = ProductList { items };
    Ok(ApiResponse::success("Products", data, Some(meta)))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let result = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Product::from);
    let result = match result {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", result, None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let vendor = vendor_service::require_profile(state, user).await?;

    validation::required("name", &payload.name)?;
    validation::max_len("name", &payload.name, 255)?;
    validation::positive("price", payload.price)?;
    validation::fits_numeric("price", payload.price, 10, 2)?;
    validation::non_negative_int("stock", payload.stock)?;
    validation::max_len("freshness_tag", &payload.freshness_tag, 80)?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        vendor_id: Set(vendor.id),
        name: Set(payload.name),
        category: Set(payload.category),
        price: Set(payload.price),
        unit: Set(payload.unit),
        stock: Set(payload.stock),
        image: Set(payload.image),
        freshness_tag: Set(payload.freshness_tag),
        is_active: Set(true),
        created_at: NotSet,
        last_stock_update: NotSet,
    };
    let product = active.insert(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id, "vendor_id": vendor.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

/// Loads a product the caller may write: the owning vendor or staff.
async fn find_owned(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ProductModel> {
    let found = Products::find_by_id(id)
        .find_also_related(Vendors)
        .one(&state.orm)
        .await?;
    let (product, vendor) = match found {
        Some(pair) => pair,
        None => return Err(AppError::NotFound),
    };
    let owned = vendor.is_some_and(|v| v.user_id == user.user_id);
    if !owned && !user.is_staff {
        return Err(AppError::Forbidden);
    }
    Ok(product)
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let existing = find_owned(state, user, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        validation::required("name", &name)?;
        validation::max_len("name", &name, 255)?;
        active.name = Set(name);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
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
    if let Some(image) = payload.image {
        active.image = Set(Some(image));
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

    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_stock(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateStockRequest,
) -> AppResult<ApiResponse<Product>> {
    validation::non_negative_int("stock", payload.stock)?;
    let existing = find_owned(state, user, id).await?;
    let previous = existing.stock;

    let mut active: ActiveModel = existing.into();
    active.stock = Set(payload.stock);
    active.last_stock_update = Set(Utc::now().into());
    let product = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_stock",
        "products",
        serde_json::json!({ "product_id": product.id, "from": previous, "to": product.stock }),
    )
    .await;

    Ok(ApiResponse::success(
        "Stock updated",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    find_owned(state, user, id).await?;
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::deleted(id))
}
