mod common;

use std::str::FromStr;

use chrono::NaiveTime;
use greenly_api::{
    dto::{
        collectors::CreateCollectorRequest,
        orders::{CreateOrderRequest, OrderLineRequest},
        pickups::CreatePickupRequest,
        products::CreateProductRequest,
        vendors::CreateVendorRequest,
    },
    entity::{
        Collectors, OrderItems, Orders, Products, ScrapPickups, Vendors,
        order_items::Column as OrderItemCol,
        products::Column as ProdCol,
        sea_orm_active_enums::{ProductCategory, ProductUnit, UserRole},
        users::ActiveModel as UserActive,
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::{Product, ScrapRate},
    services::{collector_service, order_service, pickup_service, product_service, vendor_service},
    state::AppState,
};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, SqlErr};
use uuid::Uuid;

use common::{create_user, test_state, unique, unique_phone};

fn user_with_phone(username: &str, phone: &str) -> UserActive {
    UserActive {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(String::new()),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        password_hash: Set("dummy".into()),
        role: Set(UserRole::Customer),
        phone: Set(Some(phone.to_string())),
        latitude: Set(None),
        longitude: Set(None),
        is_active: Set(true),
        is_staff: Set(false),
        last_login: Set(None),
        created_at: NotSet,
    }
}

async fn open_shop(state: &AppState) -> anyhow::Result<(AuthUser, Uuid, Product)> {
    let owner = create_user(state, &unique("vendor"), UserRole::Vendor, false).await?;
    let vendor = vendor_service::create_vendor(
        state,
        &owner,
        CreateVendorRequest {
            shop_name: unique("shop"),
            description: String::new(),
            photo: None,
            latitude: 12.97,
            longitude: 77.59,
            address: "1 Market Road".into(),
            opening_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            closing_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        },
    )
    .await?
    .data
    .expect("vendor");

    let product = product_service::create_product(
        state,
        &owner,
        CreateProductRequest {
            name: unique("tomatoes"),
            category: ProductCategory::Vegetable,
            price: Decimal::from_str("40.00")?,
            unit: ProductUnit::Kg,
            stock: 50,
            image: None,
            freshness_tag: String::new(),
        },
    )
    .await?
    .data
    .expect("product");

    Ok((owner, vendor.id, product))
}

async fn place_order(
    state: &AppState,
    customer: &AuthUser,
    vendor_id: Uuid,
    product_id: Uuid,
) -> anyhow::Result<Uuid> {
    let placed = order_service::create_order(
        state,
        customer,
        CreateOrderRequest {
            vendor_id,
            delivery_address: "22 Lake View".into(),
            delivery_latitude: 12.96,
            delivery_longitude: 77.60,
            delivery_fee: None,
            items: vec![OrderLineRequest {
                product_id,
                quantity: Decimal::from_str("1.500")?,
            }],
        },
    )
    .await?
    .data
    .expect("order");
    Ok(placed.order.id)
}

#[tokio::test]
async fn duplicate_phone_is_a_uniqueness_violation() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let phone = unique_phone();
    user_with_phone(&unique("first"), &phone)
        .insert(&state.orm)
        .await?;

    let err = user_with_phone(&unique("second"), &phone)
        .insert(&state.orm)
        .await
        .err()
        .expect("second insert must fail");
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));
    assert!(matches!(AppError::from(err), AppError::Conflict(_)));
    Ok(())
}

#[tokio::test]
async fn deleting_vendor_removes_products_and_detaches_orders() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let (_owner, vendor_id, product) = open_shop(&state).await?;
    let customer = create_user(&state, &unique("customer"), UserRole::Customer, false).await?;
    let order_id = place_order(&state, &customer, vendor_id, product.id).await?;

    Vendors::delete_by_id(vendor_id).exec(&state.orm).await?;

    let remaining = Products::find()
        .filter(ProdCol::VendorId.eq(vendor_id))
        .count(&state.orm)
        .await?;
    assert_eq!(remaining, 0);

    let order = Orders::find_by_id(order_id)
        .one(&state.orm)
        .await?
        .expect("order survives vendor deletion");
    assert_eq!(order.vendor_id, None);
    assert_eq!(order.customer_id, Some(customer.user_id));
    Ok(())
}

#[tokio::test]
async fn deleting_order_removes_its_items() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let (_owner, vendor_id, product) = open_shop(&state).await?;
    let customer = create_user(&state, &unique("customer"), UserRole::Customer, false).await?;
    let order_id = place_order(&state, &customer, vendor_id, product.id).await?;

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .count(&state.orm)
        .await?;
    assert_eq!(items, 1);

    Orders::delete_by_id(order_id).exec(&state.orm).await?;

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .count(&state.orm)
        .await?;
    assert_eq!(items, 0);
    Ok(())
}

#[tokio::test]
async fn deleting_collector_unassigns_pickups() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let hauler = create_user(&state, &unique("collector"), UserRole::Collector, false).await?;
    let collector = collector_service::create_collector(
        &state,
        &hauler,
        CreateCollectorRequest {
            company_name: unique("scrap"),
            categories: vec![ScrapRate {
                kind: "paper".into(),
                price_per_kg: 12.0,
            }],
            latitude: 12.95,
            longitude: 77.61,
            service_radius: None,
            phone: unique_phone(),
        },
    )
    .await?
    .data
    .expect("collector");
    assert_eq!(collector.service_radius, 5);

    let customer = create_user(&state, &unique("customer"), UserRole::Customer, false).await?;
    let pickup = pickup_service::create_pickup(
        &state,
        &customer,
        CreatePickupRequest {
            collector_id: Some(collector.id),
            category: "paper".into(),
            estimated_weight: Decimal::from_str("12.500")?,
            pickup_address: "9 Temple Street".into(),
            pickup_latitude: 12.95,
            pickup_longitude: 77.60,
        },
    )
    .await?
    .data
    .expect("pickup");

    Collectors::delete_by_id(collector.id).exec(&state.orm).await?;

    let pickup = ScrapPickups::find_by_id(pickup.id)
        .one(&state.orm)
        .await?
        .expect("pickup survives collector deletion");
    assert_eq!(pickup.collector_id, None);
    assert_eq!(pickup.customer_id, customer.user_id);
    Ok(())
}

#[tokio::test]
async fn storage_rejects_values_outside_enumerations() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let (_owner, vendor_id, product) = open_shop(&state).await?;

    for (category, unit) in [("meat", "kg"), ("fruit", "litre")] {
        let err = sqlx::query(
            "INSERT INTO products (id, vendor_id, name, category, price, unit) \
             VALUES ($1, $2, 'Mystery', $3, 10.00, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(vendor_id)
        .bind(category)
        .bind(unit)
        .execute(&state.pool)
        .await
        .err()
        .expect("enumeration check must fail");
        assert!(matches!(AppError::from(err), AppError::BadRequest(_)));
    }

    let customer = create_user(&state, &unique("customer"), UserRole::Customer, false).await?;
    let order_id = place_order(&state, &customer, vendor_id, product.id).await?;
    let err = sqlx::query("UPDATE orders SET status = 'shipped' WHERE id = $1")
        .bind(order_id)
        .execute(&state.pool)
        .await
        .err()
        .expect("order status check must fail");
    assert!(matches!(AppError::from(err), AppError::BadRequest(_)));

    let err = sqlx::query(
        "INSERT INTO scrap_pickups \
         (id, customer_id, category, estimated_weight, pickup_address, pickup_latitude, pickup_longitude, status) \
         VALUES ($1, $2, 'paper', 1.000, 'Somewhere', 0, 0, 'lost')",
    )
    .bind(Uuid::new_v4())
    .bind(customer.user_id)
    .execute(&state.pool)
    .await
    .err()
    .expect("pickup status check must fail");
    assert!(matches!(AppError::from(err), AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn storage_rejects_negative_stock_and_non_positive_price() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let (_owner, _vendor_id, product) = open_shop(&state).await?;

    let err = sqlx::query("UPDATE products SET stock = -1 WHERE id = $1")
        .bind(product.id)
        .execute(&state.pool)
        .await
        .err()
        .expect("negative stock must fail");
    assert!(matches!(AppError::from(err), AppError::BadRequest(_)));

    let err = sqlx::query("UPDATE products SET price = 0 WHERE id = $1")
        .bind(product.id)
        .execute(&state.pool)
        .await
        .err()
        .expect("zero price must fail");
    assert!(matches!(AppError::from(err), AppError::BadRequest(_)));
    Ok(())
}
