use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use sea_orm::sea_query::IntoColumnRef;
use uuid::Uuid;

use crate::{
    admin_site::search_condition,
    audit,
    dto::vendors::{CreateVendorRequest, UpdateVendorRequest, VendorList, VendorStatusRequest},
    entity::{
        Vendors,
        sea_orm_active_enums::UserRole,
        vendors::{ActiveModel as VendorActive, Column as VendorCol, Model as VendorModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::Vendor,
    response::{ApiResponse, Meta},
    routes::params::VendorQuery,
    state::AppState,
    validation,
};

/// The vendor profile owned by `user_id`, if any.
pub async fn find_profile(state: &AppState, user_id: Uuid) -> AppResult<Option<VendorModel>> {
    let vendor = Vendors::find()
        .filter(VendorCol::UserId.eq(user_id))
        .one(&state.orm)
        .await?;
    Ok(vendor)
}

/// The caller's vendor profile; callers without one are refused.
pub async fn require_profile(state: &AppState, user: &AuthUser) -> AppResult<VendorModel> {
    ensure_role(user, UserRole::Vendor)?;
    match find_profile(state, user.user_id).await? {
        Some(v) => Ok(v),
        None => Err(AppError::BadRequest("Create a vendor profile first".into())),
    }
}

fn ensure_owner(user: &AuthUser, vendor: &VendorModel) -> Result<(), AppError> {
    if vendor.user_id != user.user_id && !user.is_staff {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub async fn list_vendors(
    state: &AppState,
    query: VendorQuery,
) -> AppResult<ApiResponse<VendorList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all().add(VendorCol::IsActive.eq(true));

    let search_fields = [
        (Vendors, VendorCol::ShopName).into_column_ref(),
        (Vendors, VendorCol::Address).into_column_ref(),
    ];
    if let Some(search) = search_condition(query.q.as_deref(), &search_fields) {
        condition = condition.add(search);
    }

    let finder = Vendors::find()
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
    Ok(ApiResponse::success("Vendors", VendorList { items }, Some(meta)))
}

pub async fn get_vendor(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Vendor>> {
    let vendor = Vendors::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Vendor::from);
    let vendor = match vendor {
        Some(v) => v,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Vendor", vendor, None))
}

pub async fn create_vendor(
    state: &AppState,
    user: &AuthUser,
    payload: CreateVendorRequest,
) -> AppResult<ApiResponse<Vendor>> {
    ensure_role(user, UserRole::Vendor)?;
    validation::required("shop_name", &payload.shop_name)?;
    validation::max_len("shop_name", &payload.shop_name, 255)?;
    validation::required("address", &payload.address)?;
    validation::coordinates(payload.latitude, payload.longitude)?;

    if find_profile(state, user.user_id).await?.is_some() {
        return Err(AppError::BadRequest("Vendor profile already exists".into()));
    }

    let vendor = VendorActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        shop_name: Set(payload.shop_name),
        description: Set(payload.description),
        photo: Set(payload.photo),
        latitude: Set(payload.latitude),
        longitude: Set(payload.longitude),
        address: Set(payload.address),
        opening_time: Set(payload.opening_time),
        closing_time: Set(payload.closing_time),
        is_active: Set(true),
        rating: Set(Decimal::ZERO),
        total_reviews: Set(0),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(vendor_id = %vendor.id, user_id = %user.user_id, "vendor profile created");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "vendor_create",
        "vendors",
        serde_json::json!({ "vendor_id": vendor.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Vendor created",
        Vendor::from(vendor),
        Some(Meta::empty()),
    ))
}

pub async fn update_vendor(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateVendorRequest,
) -> AppResult<ApiResponse<Vendor>> {
    let existing = Vendors::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(v) => v,
        None => return Err(AppError::NotFound),
    };
    ensure_owner(user, &existing)?;

    let latitude = payload.latitude.unwrap_or(existing.latitude);
    let longitude = payload.longitude.unwrap_or(existing.longitude);
    validation::coordinates(latitude, longitude)?;

    let mut active: VendorActive = existing.into();
    if let Some(shop_name) = payload.shop_name {
        validation::required("shop_name", &shop_name)?;
        validation::max_len("shop_name", &shop_name, 255)?;
        active.shop_name = Set(shop_name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(photo) = payload.photo {
        active.photo = Set(Some(photo));
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
    active.latitude = Set(latitude);
    active.longitude = Set(longitude);

    let vendor = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "vendor_update",
        "vendors",
        serde_json::json!({ "vendor_id": vendor.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        Vendor::from(vendor),
        Some(Meta::empty()),
    ))
}

pub async fn set_vendor_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: VendorStatusRequest,
) -> AppResult<ApiResponse<Vendor>> {
    let existing = Vendors::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(v) => v,
        None => return Err(AppError::NotFound),
    };
    ensure_owner(user, &existing)?;

    let mut active: VendorActive = existing.into();
    active.is_active = Set(payload.is_active);
    let vendor = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "vendor_status",
        "vendors",
        serde_json::json!({ "vendor_id": vendor.id, "is_active": vendor.is_active }),
    )
    .await;

    Ok(ApiResponse::success(
        "Vendor status updated",
        Vendor::from(vendor),
        Some(Meta::empty()),
    ))
}
