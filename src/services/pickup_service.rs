use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::pickups::{CreatePickupRequest, PickupList},
    entity::{
        Collectors, ScrapPickups,
        scrap_pickups::{ActiveModel as PickupActive, Column as PickupCol},
        sea_orm_active_enums::{PickupStatus, UserRole},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::ScrapPickup,
    response::{ApiResponse, Meta},
    routes::params::{PickupListQuery, SortOrder},
    services::collector_service,
    state::AppState,
    validation,
};

pub async fn create_pickup(
    state: &AppState,
    user: &AuthUser,
    payload: CreatePickupRequest,
) -> AppResult<ApiResponse<ScrapPickup>> {
    let category = payload.category.trim().to_string();
    validation::required("category", &category)?;
    validation::max_len("category", &category, 80)?;
    validation::positive("estimated_weight", payload.estimated_weight)?;
    validation::fits_numeric("estimated_weight", payload.estimated_weight, 10, 3)?;
    validation::required("pickup_address", &payload.pickup_address)?;
    validation::coordinates(payload.pickup_latitude, payload.pickup_longitude)?;

    if let Some(collector_id) = payload.collector_id {
        let exists = Collectors::find_by_id(collector_id).one(&state.orm).await?;
        if exists.is_none() {
            return Err(AppError::BadRequest("Unknown collector".into()));
        }
    }

    let pickup = PickupActive {
        id: Set(Uuid::new_v4()),
        customer_id: Set(user.user_id),
        collector_id: Set(payload.collector_id),
        category: Set(category),
        estimated_weight: Set(payload.estimated_weight),
        pickup_address: Set(payload.pickup_address),
        pickup_latitude: Set(payload.pickup_latitude),
        pickup_longitude: Set(payload.pickup_longitude),
        status: Set(PickupStatus::Requested),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(pickup_id = %pickup.id, customer_id = %user.user_id, "pickup requested");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "pickup_create",
        "scrap_pickups",
        serde_json::json!({ "pickup_id": pickup.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Pickup requested",
        ScrapPickup::from(pickup),
        Some(Meta::empty()),
    ))
}

pub async fn list_pickups(
    state: &AppState,
    user: &AuthUser,
    query: PickupListQuery,
) -> AppResult<ApiResponse<PickupList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = match user.role {
        UserRole::Collector => match collector_service::find_profile(state, user.user_id).await? {
            Some(collector) => Condition::all().add(PickupCol::CollectorId.eq(collector.id)),
            None => return Err(AppError::BadRequest("Create a collector profile first".into())),
        },
        _ => Condition::all().add(PickupCol::CustomerId.eq(user.user_id)),
    };
    if let Some(status) = query.status {
        condition = condition.add(PickupCol::Status.eq(status));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let mut finder = ScrapPickups::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(PickupCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(PickupCol::CreatedAt),
    };

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
    Ok(ApiResponse::success("Pickups", PickupList { items }, Some(meta)))
}

pub async fn get_pickup(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<ScrapPickup>> {
    let found = ScrapPickups::find_by_id(id)
        .find_also_related(Collectors)
        .one(&state.orm)
        .await?;
    let (pickup, collector) = match found {
        Some(pair) => pair,
        None => return Err(AppError::NotFound),
    };

    let assigned = collector.is_some_and(|c| c.user_id == user.user_id);
    if pickup.customer_id != user.user_id && !assigned && !user.is_staff {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::success(
        "Pickup",
        ScrapPickup::from(pickup),
        Some(Meta::empty()),
    ))
}
