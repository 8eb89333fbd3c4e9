mod common;

use std::str::FromStr;

use chrono::NaiveTime;
use greenly_api::{
    admin_site::CreatedWithin,
    dto::{
        admin::{
            AuditLogQuery, CollectorChange, OrderAdminQuery, OrderChange, PickupAdminQuery,
            PickupChange, ProductAdminQuery, ProductBulkEdit, ProductChange, ProductRowEdit,
            VendorAdminQuery, VendorChange,
        },
        auth::{LoginRequest, RegisterRequest},
        collectors::CreateCollectorRequest,
        orders::{CreateOrderRequest, OrderLineRequest},
        pickups::CreatePickupRequest,
        products::{CreateProductRequest, UpdateStockRequest},
        vendors::CreateVendorRequest,
    },
    entity::sea_orm_active_enums::{OrderStatus, PickupStatus, ProductCategory, ProductUnit, UserRole},
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::{OrderListQuery, PickupListQuery, ProductQuery},
    services::{
        admin_service, auth_service, collector_service, order_service, pickup_service,
        product_service, vendor_service,
    },
    state::AppState,
};
use rust_decimal::Decimal;

use common::{create_user, test_state, unique, unique_phone};

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn shop_request(shop_name: &str) -> CreateVendorRequest {
    CreateVendorRequest {
        shop_name: shop_name.to_string(),
        description: "Fresh every morning".into(),
        photo: None,
        latitude: 12.97,
        longitude: 77.59,
        address: "14 Market Road".into(),
        opening_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        closing_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
    }
}

fn product_request(name: &str, price: &str, unit: ProductUnit) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        category: ProductCategory::Vegetable,
        price: dec(price),
        unit,
        stock: 25,
        image: None,
        freshness_tag: "Harvested today".into(),
    }
}

fn order_request(vendor_id: uuid::Uuid, lines: Vec<(uuid::Uuid, &str)>) -> CreateOrderRequest {
    CreateOrderRequest {
        vendor_id,
        delivery_address: "22 Lake View".into(),
        delivery_latitude: 12.96,
        delivery_longitude: 77.60,
        delivery_fee: Some(dec("15.00")),
        items: lines
            .into_iter()
            .map(|(product_id, quantity)| OrderLineRequest {
                product_id,
                quantity: dec(quantity),
            })
            .collect(),
    }
}

async fn register(state: &AppState, username: &str, role: UserRole) -> anyhow::Result<AuthUser> {
    let user = auth_service::register_user(
        state,
        RegisterRequest {
            username: username.to_string(),
            password: "correct horse".into(),
            email: format!("{username}@example.com"),
            first_name: String::new(),
            last_name: String::new(),
            role,
            phone: Some(unique_phone()),
            latitude: Some(12.97),
            longitude: Some(77.59),
        },
    )
    .await?
    .data
    .expect("user");
    assert_eq!(user.role, role);
    assert!(!user.is_staff);

    Ok(AuthUser {
        user_id: user.id,
        role: user.role,
        is_staff: user.is_staff,
    })
}

#[tokio::test]
async fn registration_and_login() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };
    if std::env::var("JWT_SECRET").is_err() {
        // SAFETY: this is the only test in this binary that reads or writes the variable.
        unsafe { std::env::set_var("JWT_SECRET", "test-secret") };
    }

    let username = unique("asha");
    let phone = unique_phone();
    let request = |username: &str, phone: &str| RegisterRequest {
        username: username.to_string(),
        password: "correct horse".into(),
        email: String::new(),
        first_name: "Asha".into(),
        last_name: String::new(),
        role: UserRole::Customer,
        phone: Some(phone.to_string()),
        latitude: None,
        longitude: None,
    };

    auth_service::register_user(&state, request(&username, &phone)).await?;

    let taken_name = auth_service::register_user(&state, request(&username, &unique_phone()))
        .await
        .err()
        .expect("duplicate username");
    assert!(matches!(taken_name, AppError::BadRequest(_)));

    let taken_phone = auth_service::register_user(&state, request(&unique("other"), &phone))
        .await
        .err()
        .expect("duplicate phone");
    assert!(matches!(taken_phone, AppError::BadRequest(_)));

    let short = RegisterRequest {
        password: "short".into(),
        ..request(&unique("brief"), &unique_phone())
    };
    let err = auth_service::register_user(&state, short).await.err().expect("short password");
    assert!(matches!(err, AppError::BadRequest(_)));

    // length is counted in characters: eight bytes, four characters
    let accented = RegisterRequest {
        password: "éééé".into(),
        ..request(&unique("accent"), &unique_phone())
    };
    let err = auth_service::register_user(&state, accented)
        .await
        .err()
        .expect("four-character password");
    assert!(matches!(err, AppError::BadRequest(_)));

    let login = auth_service::login_user(
        &state,
        LoginRequest {
            username: username.clone(),
            password: "correct horse".into(),
        },
    )
    .await?
    .data
    .expect("token");
    assert!(login.token.starts_with("Bearer "));

    let wrong = auth_service::login_user(
        &state,
        LoginRequest {
            username,
            password: "wrong horse".into(),
        },
    )
    .await
    .err()
    .expect("wrong password");
    assert!(matches!(wrong, AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn vendor_catalogue_and_customer_order() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let owner = register(&state, &unique("ravi"), UserRole::Vendor).await?;
    let customer = register(&state, &unique("asha"), UserRole::Customer).await?;

    // customers cannot open a shop
    let err = vendor_service::create_vendor(&state, &customer, shop_request("Nope"))
        .await
        .err()
        .expect("customer shop");
    assert!(matches!(err, AppError::Forbidden));

    // vendors need a profile before listing products
    let err = product_service::create_product(
        &state,
        &owner,
        product_request("Tomatoes", "40.00", ProductUnit::Kg),
    )
    .await
    .err()
    .expect("no profile yet");
    assert!(matches!(err, AppError::BadRequest(_)));

    let shop_name = unique("Ravi Greens");
    let vendor = vendor_service::create_vendor(&state, &owner, shop_request(&shop_name))
        .await?
        .data
        .expect("vendor");
    assert_eq!(vendor.rating, Decimal::ZERO);
    assert_eq!(vendor.total_reviews, 0);

    let again = vendor_service::create_vendor(&state, &owner, shop_request(&shop_name))
        .await
        .err()
        .expect("second profile");
    assert!(matches!(again, AppError::BadRequest(_)));

    let tomato_name = unique("tomato");
    let tomatoes = product_service::create_product(
        &state,
        &owner,
        product_request(&tomato_name, "40.00", ProductUnit::Kg),
    )
    .await?
    .data
    .expect("tomatoes");
    let spinach = product_service::create_product(
        &state,
        &owner,
        product_request(&unique("spinach"), "25.50", ProductUnit::Bunch),
    )
    .await?
    .data
    .expect("spinach");

    let err = product_service::create_product(
        &state,
        &owner,
        product_request(&unique("free"), "0.00", ProductUnit::Kg),
    )
    .await
    .err()
    .expect("zero price");
    assert!(matches!(err, AppError::BadRequest(_)));

    let found = product_service::list_products(
        &state,
        ProductQuery {
            q: Some(tomato_name.clone()),
            vendor_id: Some(vendor.id),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("products");
    assert_eq!(found.items.len(), 1);
    assert_eq!(found.items[0].id, tomatoes.id);

    // only the owner may restock
    let err = product_service::update_stock(
        &state,
        &customer,
        tomatoes.id,
        UpdateStockRequest { stock: 99 },
    )
    .await
    .err()
    .expect("not the owner");
    assert!(matches!(err, AppError::Forbidden));

    let err = product_service::update_stock(&state, &owner, tomatoes.id, UpdateStockRequest { stock: -1 })
        .await
        .err()
        .expect("negative stock");
    assert!(matches!(err, AppError::BadRequest(_)));

    let placed = order_service::create_order(
        &state,
        &customer,
        order_request(vendor.id, vec![(tomatoes.id, "1.500"), (spinach.id, "2")]),
    )
    .await?
    .data
    .expect("order");
    assert_eq!(placed.order.status, OrderStatus::Pending);
    assert_eq!(placed.order.customer_id, Some(customer.user_id));
    assert_eq!(placed.items.len(), 2);
    assert_eq!(placed.order.total_amount, dec("111.00"));
    assert_eq!(placed.order.delivery_fee, dec("15.00"));
    let tomato_line = placed
        .items
        .iter()
        .find(|item| item.product_name == tomato_name)
        .expect("tomato line");
    assert_eq!(tomato_line.unit_price, dec("40.00"));
    assert_eq!(tomato_line.subtotal, dec("60.00"));

    // stock is left to fulfilment
    let tomatoes_after = product_service::get_product(&state, tomatoes.id)
        .await?
        .data
        .expect("tomatoes");
    assert_eq!(tomatoes_after.stock, 25);

    let err = order_service::create_order(&state, &customer, order_request(vendor.id, vec![]))
        .await
        .err()
        .expect("empty order");
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = order_service::create_order(
        &state,
        &customer,
        order_request(vendor.id, vec![(tomatoes.id, "0")]),
    )
    .await
    .err()
    .expect("zero quantity");
    assert!(matches!(err, AppError::BadRequest(_)));

    // the vendor sees the order, an unrelated customer does not
    let received = order_service::list_orders(&state, &owner, OrderListQuery::default())
        .await?
        .data
        .expect("orders");
    assert!(received.items.iter().any(|o| o.id == placed.order.id));

    let stranger = create_user(&state, &unique("stranger"), UserRole::Customer, false).await?;
    let err = order_service::get_order(&state, &stranger, placed.order.id)
        .await
        .err()
        .expect("hidden order");
    assert!(matches!(err, AppError::NotFound));

    let seen = order_service::get_order(&state, &owner, placed.order.id)
        .await?
        .data
        .expect("order");
    assert_eq!(seen.items.len(), 2);
    Ok(())
}

#[tokio::test]
async fn order_lines_must_come_from_the_chosen_vendor() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let first = create_user(&state, &unique("first"), UserRole::Vendor, false).await?;
    let second = create_user(&state, &unique("second"), UserRole::Vendor, false).await?;
    let customer = create_user(&state, &unique("customer"), UserRole::Customer, false).await?;

    let first_shop = vendor_service::create_vendor(&state, &first, shop_request(&unique("one")))
        .await?
        .data
        .expect("vendor");
    vendor_service::create_vendor(&state, &second, shop_request(&unique("two"))).await?;
    let foreign = product_service::create_product(
        &state,
        &second,
        product_request(&unique("okra"), "30.00", ProductUnit::Kg),
    )
    .await?
    .data
    .expect("product");

    let err = order_service::create_order(
        &state,
        &customer,
        order_request(first_shop.id, vec![(foreign.id, "1")]),
    )
    .await
    .err()
    .expect("foreign product");
    assert!(matches!(err, AppError::BadRequest(_)));

    let mine = order_service::list_orders(&state, &customer, OrderListQuery::default())
        .await?
        .data
        .expect("orders");
    assert!(mine.items.is_empty());
    Ok(())
}

#[tokio::test]
async fn scrap_pickup_requests() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let hauler = register(&state, &unique("kabadi"), UserRole::Collector).await?;
    let customer = register(&state, &unique("asha"), UserRole::Customer).await?;

    let err = collector_service::create_collector(
        &state,
        &customer,
        CreateCollectorRequest {
            company_name: "Nope".into(),
            categories: vec![],
            latitude: 0.0,
            longitude: 0.0,
            service_radius: None,
            phone: unique_phone(),
        },
    )
    .await
    .err()
    .expect("customer collector");
    assert!(matches!(err, AppError::Forbidden));

    let collector = collector_service::create_collector(
        &state,
        &hauler,
        CreateCollectorRequest {
            company_name: unique("Kabadi"),
            categories: vec![],
            latitude: 12.95,
            longitude: 77.61,
            service_radius: Some(10),
            phone: unique_phone(),
        },
    )
    .await?
    .data
    .expect("collector");
    assert_eq!(collector.categories, serde_json::json!([]));

    let pickup_request = |collector_id, weight: &str| CreatePickupRequest {
        collector_id,
        category: "paper".into(),
        estimated_weight: dec(weight),
        pickup_address: "9 Temple Street".into(),
        pickup_latitude: 12.95,
        pickup_longitude: 77.60,
    };

    let err = pickup_service::create_pickup(&state, &customer, pickup_request(None, "0"))
        .await
        .err()
        .expect("zero weight");
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = pickup_service::create_pickup(
        &state,
        &customer,
        pickup_request(Some(uuid::Uuid::new_v4()), "3"),
    )
    .await
    .err()
    .expect("unknown collector");
    assert!(matches!(err, AppError::BadRequest(_)));

    let pickup = pickup_service::create_pickup(
        &state,
        &customer,
        pickup_request(Some(collector.id), "12.500"),
    )
    .await?
    .data
    .expect("pickup");
    assert_eq!(pickup.status, PickupStatus::Requested);

    let assigned = pickup_service::list_pickups(&state, &hauler, PickupListQuery::default())
        .await?
        .data
        .expect("pickups");
    assert_eq!(assigned.items.len(), 1);
    assert_eq!(assigned.items[0].id, pickup.id);

    let seen = pickup_service::get_pickup(&state, &hauler, pickup.id).await?;
    assert!(seen.data.is_some());

    let stranger = create_user(&state, &unique("stranger"), UserRole::Customer, false).await?;
    let err = pickup_service::get_pickup(&state, &stranger, pickup.id)
        .await
        .err()
        .expect("hidden pickup");
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn back_office_changes_are_staff_only_and_audited() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let staff = create_user(&state, &unique("staff"), UserRole::Customer, true).await?;
    let owner = create_user(&state, &unique("owner"), UserRole::Vendor, false).await?;
    let customer_name = unique("meera");
    let customer = create_user(&state, &customer_name, UserRole::Customer, false).await?;

    let err = admin_service::index(&customer).await.err().expect("not staff");
    assert!(matches!(err, AppError::Forbidden));
    let index = admin_service::index(&staff).await?.data.expect("index");
    assert_eq!(index.models.len(), 5);

    let shop_name = unique("Meera Fruits");
    let vendor = vendor_service::create_vendor(&state, &owner, shop_request(&shop_name))
        .await?
        .data
        .expect("vendor");
    let mango = product_service::create_product(
        &state,
        &owner,
        product_request(&unique("mango"), "120.00", ProductUnit::Kg),
    )
    .await?
    .data
    .expect("mango");
    let placed = order_service::create_order(
        &state,
        &customer,
        order_request(vendor.id, vec![(mango.id, "2")]),
    )
    .await?
    .data
    .expect("order");

    // every search term must hit some field
    let hits = admin_service::list_orders(
        &state,
        &staff,
        OrderAdminQuery {
            q: Some(format!("{customer_name} {shop_name}")),
            status: Some(OrderStatus::Pending),
            created: Some(CreatedWithin::Today),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("orders");
    assert_eq!(hits.items.len(), 1);
    assert_eq!(hits.items[0].id, placed.order.id);

    let misses = admin_service::list_orders(
        &state,
        &staff,
        OrderAdminQuery {
            q: Some(format!("{customer_name} {}", unique("nobody"))),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("orders");
    assert!(misses.items.is_empty());

    let vendors = admin_service::list_vendors(
        &state,
        &staff,
        VendorAdminQuery {
            q: Some(shop_name.to_uppercase()),
            is_active: Some(true),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("vendors");
    assert_eq!(vendors.items.len(), 1);

    let changed = admin_service::change_order(
        &state,
        &staff,
        placed.order.id,
        OrderChange {
            status: Some(OrderStatus::Accepted),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(changed.status, OrderStatus::Accepted);
    assert!(changed.updated_at >= placed.order.updated_at);

    let err = admin_service::change_order(
        &state,
        &customer,
        placed.order.id,
        OrderChange {
            status: Some(OrderStatus::Cancelled),
            ..Default::default()
        },
    )
    .await
    .err()
    .expect("not staff");
    assert!(matches!(err, AppError::Forbidden));

    let detail = admin_service::get_order(&state, &staff, placed.order.id)
        .await?
        .data
        .expect("order");
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].subtotal, dec("240.00"));

    let edited = admin_service::bulk_edit_products(
        &state,
        &staff,
        ProductBulkEdit {
            items: vec![ProductRowEdit {
                id: mango.id,
                stock: Some(3),
                is_active: Some(false),
            }],
        },
    )
    .await?
    .data
    .expect("products");
    assert_eq!(edited.items[0].stock, 3);
    assert!(!edited.items[0].is_active);

    let err = admin_service::bulk_edit_products(
        &state,
        &staff,
        ProductBulkEdit {
            items: vec![ProductRowEdit {
                id: mango.id,
                stock: Some(-5),
                is_active: None,
            }],
        },
    )
    .await
    .err()
    .expect("negative stock");
    assert!(matches!(err, AppError::BadRequest(_)));

    let hidden = admin_service::list_products(
        &state,
        &staff,
        ProductAdminQuery {
            q: Some(shop_name.clone()),
            is_active: Some(false),
            category: Some(ProductCategory::Vegetable),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("products");
    assert_eq!(hidden.items.len(), 1);

    // deleting the shop keeps the order but drops the link
    admin_service::delete_vendor(&state, &staff, vendor.id).await?;
    let orphan = admin_service::get_order(&state, &staff, placed.order.id)
        .await?
        .data
        .expect("order");
    assert_eq!(orphan.order.vendor_id, None);
    assert_eq!(orphan.order.customer_id, Some(customer.user_id));

    let err = admin_service::get_vendor(&state, &staff, vendor.id)
        .await
        .err()
        .expect("deleted vendor");
    assert!(matches!(err, AppError::NotFound));

    let trail = admin_service::list_audit_logs(
        &state,
        &staff,
        AuditLogQuery {
            action: Some("admin_order_change".into()),
            per_page: Some(100),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("audit log");
    assert!(trail.items.iter().any(|entry| {
        entry.user_id == Some(staff.user_id)
            && entry
                .metadata
                .as_ref()
                .and_then(|m| m.get("object_id"))
                .and_then(|id| id.as_str())
                == Some(placed.order.id.to_string().as_str())
    }));
    Ok(())
}

#[tokio::test]
async fn back_office_pickup_changes() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let staff = create_user(&state, &unique("staff"), UserRole::Customer, true).await?;
    let hauler = create_user(&state, &unique("hauler"), UserRole::Collector, false).await?;
    let customer_name = unique("ravi");
    let customer = create_user(&state, &customer_name, UserRole::Customer, false).await?;

    let company = unique("Green Haul");
    let collector = collector_service::create_collector(
        &state,
        &hauler,
        CreateCollectorRequest {
            company_name: company.clone(),
            categories: vec![],
            latitude: 12.95,
            longitude: 77.61,
            service_radius: None,
            phone: unique_phone(),
        },
    )
    .await?
    .data
    .expect("collector");

    let category = unique("e-waste");
    let pickup = pickup_service::create_pickup(
        &state,
        &customer,
        CreatePickupRequest {
            collector_id: Some(collector.id),
            category: category.clone(),
            estimated_weight: dec("4.250"),
            pickup_address: "3 Hill Road".into(),
            pickup_latitude: 12.95,
            pickup_longitude: 77.60,
        },
    )
    .await?
    .data
    .expect("pickup");

    let listed = admin_service::list_pickups(
        &state,
        &staff,
        PickupAdminQuery {
            q: Some(format!("\"{company}\" {customer_name}")),
            category: Some(category.clone()),
            status: Some(PickupStatus::Requested),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("pickups");
    assert_eq!(listed.items.len(), 1);

    let scheduled = admin_service::change_pickup(
        &state,
        &staff,
        pickup.id,
        PickupChange {
            status: Some(PickupStatus::Scheduled),
            collector_id: Some(None),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("pickup");
    assert_eq!(scheduled.status, PickupStatus::Scheduled);
    assert_eq!(scheduled.collector_id, None);

    let err = admin_service::change_pickup(
        &state,
        &staff,
        pickup.id,
        PickupChange {
            estimated_weight: Some(dec("-1")),
            ..Default::default()
        },
    )
    .await
    .err()
    .expect("negative weight");
    assert!(matches!(err, AppError::BadRequest(_)));

    admin_service::delete_pickup(&state, &staff, pickup.id).await?;
    let err = admin_service::get_pickup(&state, &staff, pickup.id)
        .await
        .err()
        .expect("deleted pickup");
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn deactivated_products_and_shops_cannot_be_ordered() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let staff = create_user(&state, &unique("staff"), UserRole::Customer, true).await?;
    let owner = create_user(&state, &unique("owner"), UserRole::Vendor, false).await?;
    let customer = create_user(&state, &unique("customer"), UserRole::Customer, false).await?;

    let vendor = vendor_service::create_vendor(&state, &owner, shop_request(&unique("shop")))
        .await?
        .data
        .expect("vendor");
    let okra = product_service::create_product(
        &state,
        &owner,
        product_request(&unique("okra"), "30.00", ProductUnit::Kg),
    )
    .await?
    .data
    .expect("okra");
    let beans = product_service::create_product(
        &state,
        &owner,
        product_request(&unique("beans"), "45.00", ProductUnit::Kg),
    )
    .await?
    .data
    .expect("beans");

    admin_service::change_product(
        &state,
        &staff,
        okra.id,
        ProductChange {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await?;

    let err = order_service::create_order(
        &state,
        &customer,
        order_request(vendor.id, vec![(okra.id, "1")]),
    )
    .await
    .err()
    .expect("inactive product");
    assert!(matches!(err, AppError::BadRequest(_)));

    // active products from the same shop are still orderable
    order_service::create_order(
        &state,
        &customer,
        order_request(vendor.id, vec![(beans.id, "1")]),
    )
    .await?;

    admin_service::change_vendor(
        &state,
        &staff,
        vendor.id,
        VendorChange {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await?;

    let err = order_service::create_order(
        &state,
        &customer,
        order_request(vendor.id, vec![(beans.id, "1")]),
    )
    .await
    .err()
    .expect("inactive shop");
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn back_office_keeps_profiles_with_matching_roles() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let staff = create_user(&state, &unique("staff"), UserRole::Customer, true).await?;
    let owner = create_user(&state, &unique("owner"), UserRole::Vendor, false).await?;
    let hauler = create_user(&state, &unique("hauler"), UserRole::Collector, false).await?;
    let successor = create_user(&state, &unique("successor"), UserRole::Vendor, false).await?;

    let vendor = vendor_service::create_vendor(&state, &owner, shop_request(&unique("shop")))
        .await?
        .data
        .expect("vendor");
    let collector = collector_service::create_collector(
        &state,
        &hauler,
        CreateCollectorRequest {
            company_name: unique("Haulers"),
            categories: vec![],
            latitude: 12.95,
            longitude: 77.61,
            service_radius: None,
            phone: unique_phone(),
        },
    )
    .await?
    .data
    .expect("collector");

    let to_vendor = |user_id| VendorChange {
        user_id: Some(user_id),
        ..Default::default()
    };

    let err = admin_service::change_vendor(&state, &staff, vendor.id, to_vendor(hauler.user_id))
        .await
        .err()
        .expect("collector cannot own a shop");
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = admin_service::change_vendor(&state, &staff, vendor.id, to_vendor(uuid::Uuid::new_v4()))
        .await
        .err()
        .expect("unknown user");
    assert!(matches!(err, AppError::BadRequest(_)));

    // the rejected change left the shop with its owner
    product_service::create_product(
        &state,
        &owner,
        product_request(&unique("kale"), "20.00", ProductUnit::Bunch),
    )
    .await?;

    let err = admin_service::change_collector(
        &state,
        &staff,
        collector.id,
        CollectorChange {
            user_id: Some(owner.user_id),
            ..Default::default()
        },
    )
    .await
    .err()
    .expect("vendor cannot own a collector profile");
    assert!(matches!(err, AppError::BadRequest(_)));

    let moved = admin_service::change_vendor(&state, &staff, vendor.id, to_vendor(successor.user_id))
        .await?
        .data
        .expect("vendor");
    assert_eq!(moved.user_id, successor.user_id);
    Ok(())
}
