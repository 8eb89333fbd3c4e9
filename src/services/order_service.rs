use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{CreateOrderRequest, OrderList, OrderWithItems},
    entity::{
        OrderItems, Orders, Products, Vendors,
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Model as OrderModel},
        products::Column as ProdCol,
        sea_orm_active_enums::{OrderStatus, UserRole},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderItem},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::vendor_service,
    state::AppState,
    validation,
};

/// `unit_price × quantity`, rounded half-up to cents.
pub fn line_subtotal(unit_price: Decimal, quantity: Decimal) -> Decimal {
    (unit_price * quantity).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn order_total<'a>(subtotals: impl IntoIterator<Item = &'a Decimal>) -> Decimal {
    subtotals.into_iter().copied().sum()
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = match user.role {
        UserRole::Vendor => {
            let vendor = vendor_service::require_profile(state, user).await?;
            Condition::all().add(OrderCol::VendorId.eq(vendor.id))
        }
        _ => Condition::all().add(OrderCol::CustomerId.eq(user.user_id)),
    };
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let mut finder = Orders::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: orders },
        Some(meta),
    ))
}

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    if payload.items.is_empty() {
        return Err(AppError::BadRequest("Order has no items".into()));
    }
    validation::required("delivery_address", &payload.delivery_address)?;
    validation::coordinates(payload.delivery_latitude, payload.delivery_longitude)?;
    let delivery_fee = payload.delivery_fee.unwrap_or(Decimal::ZERO);
    validation::non_negative("delivery_fee", delivery_fee)?;
    validation::fits_numeric("delivery_fee", delivery_fee, 8, 2)?;
    for line in &payload.items {
        validation::positive("quantity", line.quantity)?;
        validation::fits_numeric("quantity", line.quantity, 10, 3)?;
    }

    let txn = state.orm.begin().await?;

    let vendor = Vendors::find_by_id(payload.vendor_id).one(&txn).await?;
    let vendor = match vendor {
        Some(v) => v,
        None => return Err(AppError::BadRequest("Unknown vendor".into())),
    };
    if !vendor.is_active {
        return Err(AppError::BadRequest("Vendor is not accepting orders".into()));
    }

    let product_ids: Vec<Uuid> = payload.items.iter().map(|line| line.product_id).collect();
    let products: HashMap<Uuid, _> = Products::find()
        .filter(
            Condition::all()
                .add(ProdCol::Id.is_in(product_ids))
                .add(ProdCol::VendorId.eq(vendor.id))
                .add(ProdCol::IsActive.eq(true)),
        )
        .all(&txn)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let mut lines = Vec::with_capacity(payload.items.len());
    for line in &payload.items {
        let product = match products.get(&line.product_id) {
            Some(p) => p,
            None => {
                return Err(AppError::BadRequest(format!(
                    "Product {} is not available from this vendor",
                    line.product_id
                )));
            }
        };
        let subtotal = line_subtotal(product.price, line.quantity);
        lines.push((product.name.clone(), product.price, line.quantity, subtotal));
    }
    let total_amount = order_total(lines.iter().map(|(_, _, _, subtotal)| subtotal));
    validation::fits_numeric("total_amount", total_amount, 12, 2)?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        customer_id: Set(Some(user.user_id)),
        vendor_id: Set(Some(vendor.id)),
        total_amount: Set(total_amount),
        delivery_fee: Set(delivery_fee),
        status: Set(OrderStatus::Pending),
        delivery_address: Set(payload.delivery_address),
        delivery_latitude: Set(payload.delivery_latitude),
        delivery_longitude: Set(payload.delivery_longitude),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut items: Vec<OrderItem> = Vec::with_capacity(lines.len());
    for (product_name, unit_price, quantity, subtotal) in lines {
        let item = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_name: Set(product_name),
            unit_price: Set(unit_price),
            quantity: Set(quantity),
            subtotal: Set(subtotal),
        }
        .insert(&txn)
        .await?;
        items.push(OrderItem::from(item));
    }

    txn.commit().await?;

    tracing::info!(order_id = %order.id, vendor_id = %vendor.id, total = %order.total_amount, "order placed");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.id, "vendor_id": vendor.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order created",
        OrderWithItems {
            order: Order::from(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

async fn may_view(state: &AppState, user: &AuthUser, order: &OrderModel) -> AppResult<bool> {
    if user.is_staff || order.customer_id == Some(user.user_id) {
        return Ok(true);
    }
    if user.role == UserRole::Vendor {
        if let Some(vendor) = vendor_service::find_profile(state, user.user_id).await? {
            return Ok(order.vendor_id == Some(vendor.id));
        }
    }
    Ok(false)
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };
    // Hide existence from unrelated callers.
    if !may_view(state, user, &order).await? {
        return Err(AppError::NotFound);
    }

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems {
            order: Order::from(order),
            items,
        },
        Some(Meta::empty()),
    ))
}
