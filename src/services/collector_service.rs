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
    dto::collectors::{CollectorList, CreateCollectorRequest},
    entity::{
        Collectors,
        collectors::{ActiveModel as CollectorActive, Column as CollectorCol, Model as CollectorModel},
        sea_orm_active_enums::UserRole,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::Collector,
    response::{ApiResponse, Meta},
    routes::params::CollectorQuery,
    state::AppState,
    validation,
};

const DEFAULT_SERVICE_RADIUS_KM: i32 = 5;

pub async fn find_profile(state: &AppState, user_id: Uuid) -> AppResult<Option<CollectorModel>> {
    let collector = Collectors::find()
        .filter(CollectorCol::UserId.eq(user_id))
        .one(&state.orm)
        .await?;
    Ok(collector)
}

pub async fn list_collectors(
    state: &AppState,
    query: CollectorQuery,
) -> AppResult<ApiResponse<CollectorList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    let search_fields = [(Collectors, CollectorCol::CompanyName).into_column_ref()];
    if let Some(search) = search_condition(query.q.as_deref(), &search_fields) {
        condition = condition.add(search);
    }

    let finder = Collectors::find()
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
        CollectorList { items },
        Some(meta),
    ))
}

pub async fn get_collector(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Collector>> {
    let collector = Collectors::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Collector::from);
    let collector = match collector {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Collector", collector, None))
}

pub async fn create_collector(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCollectorRequest,
) -> AppResult<ApiResponse<Collector>> {
    ensure_role(user, UserRole::Collector)?;
    validation::required("company_name", &payload.company_name)?;
    validation::max_len("company_name", &payload.company_name, 255)?;
    validation::phone(&payload.phone)?;
    validation::coordinates(payload.latitude, payload.longitude)?;
    let service_radius = payload.service_radius.unwrap_or(DEFAULT_SERVICE_RADIUS_KM);
    if service_radius <= 0 {
        return Err(AppError::BadRequest(
            "service_radius must be greater than 0".into(),
        ));
    }

    if find_profile(state, user.user_id).await?.is_some() {
        return Err(AppError::BadRequest("Collector profile already exists".into()));
    }

    let categories = serde_json::to_value(&payload.categories)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    let collector = CollectorActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        company_name: Set(payload.company_name),
        categories: Set(categories),
        latitude: Set(payload.latitude),
        longitude: Set(payload.longitude),
        service_radius: Set(service_radius),
        phone: Set(payload.phone),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(collector_id = %collector.id, user_id = %user.user_id, "collector profile created");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "collector_create",
        "collectors",
        serde_json::json!({ "collector_id": collector.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Collector created",
        Collector::from(collector),
        Some(Meta::empty()),
    ))
}
