use chrono::NaiveTime;
use greenly_api::{
    config::AppConfig,
    db::create_pool,
    entity::{
        Collectors, Products, Users, Vendors,
        collectors::{self, Column as CollectorCol},
        products::{self, Column as ProdCol},
        sea_orm_active_enums::{ProductCategory, ProductUnit, UserRole},
        users::{self, Column as UserCol},
        vendors::{self, Column as VendorCol},
    },
    models::ScrapRate,
    services::auth_service::hash_password,
    state::AppState,
};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;
    let state = AppState::new(pool);

    let password = std::env::var("SEED_PASSWORD").unwrap_or_else(|_| "greenly123".to_string());

    let admin = ensure_user(&state, "admin", &password, UserRole::Customer, true, None).await?;
    let customer = ensure_user(
        &state,
        "asha",
        &password,
        UserRole::Customer,
        false,
        Some("+919800000001"),
    )
    .await?;
    let vendor_user = ensure_user(
        &state,
        "ravi_greens",
        &password,
        UserRole::Vendor,
        false,
        Some("+919800000002"),
    )
    .await?;
    let collector_user = ensure_user(
        &state,
        "kabadi_co",
        &password,
        UserRole::Collector,
        false,
        Some("+919800000003"),
    )
    .await?;

    let vendor_id = ensure_vendor(&state, vendor_user).await?;
    seed_products(&state, vendor_id).await?;
    ensure_collector(&state, collector_user).await?;

    println!("Seed completed. Admin ID: {admin}, Customer ID: {customer}, Vendor ID: {vendor_id}");
    Ok(())
}

async fn ensure_user(
    state: &AppState,
    username: &str,
    password: &str,
    role: UserRole,
    is_staff: bool,
    phone: Option<&str>,
) -> anyhow::Result<Uuid> {
    let existing = Users::find()
        .filter(UserCol::Username.eq(username))
        .one(&state.orm)
        .await?;
    if let Some(user) = existing {
        return Ok(user.id);
    }

    let password_hash =
        hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(format!("{username}@greenly.local")),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        password_hash: Set(password_hash),
        role: Set(role),
        phone: Set(phone.map(str::to_string)),
        latitude: Set(Some(12.9716)),
        longitude: Set(Some(77.5946)),
        is_active: Set(true),
        is_staff: Set(is_staff),
        last_login: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    println!("Ensured user {username} (role={}, staff={is_staff})", role.as_str());
    Ok(user.id)
}

async fn ensure_vendor(state: &AppState, user_id: Uuid) -> anyhow::Result<Uuid> {
    let existing = Vendors::find()
        .filter(VendorCol::UserId.eq(user_id))
        .one(&state.orm)
        .await?;
    if let Some(vendor) = existing {
        return Ok(vendor.id);
    }

    let opening = NaiveTime::from_hms_opt(7, 0, 0).ok_or_else(|| anyhow::anyhow!("bad time"))?;
    let closing = NaiveTime::from_hms_opt(20, 0, 0).ok_or_else(|| anyhow::anyhow!("bad time"))?;
    let vendor = vendors::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        shop_name: Set("Ravi's Fresh Greens".to_string()),
        description: Set("Farm produce delivered the same morning".to_string()),
        photo: Set(None),
        latitude: Set(12.9721),
        longitude: Set(77.5933),
        address: Set("14 Market Road, Bengaluru".to_string()),
        opening_time: Set(opening),
        closing_time: Set(closing),
        is_active: Set(true),
        rating: Set(Decimal::ZERO),
        total_reviews: Set(0),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    println!("Ensured vendor {}", vendor.shop_name);
    Ok(vendor.id)
}

async fn seed_products(state: &AppState, vendor_id: Uuid) -> anyhow::Result<()> {
    let products = vec![
        ("Tomatoes", ProductCategory::Vegetable, Decimal::new(4000, 2), ProductUnit::Kg, 120, "Harvested today"),
        ("Bananas", ProductCategory::Fruit, Decimal::new(6000, 2), ProductUnit::Dozen, 40, ""),
        ("Spinach", ProductCategory::Leafy, Decimal::new(2500, 2), ProductUnit::Bunch, 60, "Organic"),
        ("Coriander", ProductCategory::Herbs, Decimal::new(1000, 2), ProductUnit::Bunch, 80, ""),
        ("Coconut", ProductCategory::Other, Decimal::new(3500, 2), ProductUnit::Piece, 30, ""),
    ];

    for (name, category, price, unit, stock, freshness_tag) in products {
        let existing = Products::find()
            .filter(
                Condition::all()
                    .add(ProdCol::VendorId.eq(vendor_id))
                    .add(ProdCol::Name.eq(name)),
            )
            .one(&state.orm)
            .await?;
        if existing.is_some() {
            continue;
        }

        products::ActiveModel {
            id: Set(Uuid::new_v4()),
            vendor_id: Set(vendor_id),
            name: Set(name.to_string()),
            category: Set(category),
            price: Set(price),
            unit: Set(unit),
            stock: Set(stock),
            image: Set(None),
            freshness_tag: Set(freshness_tag.to_string()),
            is_active: Set(true),
            created_at: NotSet,
            last_stock_update: NotSet,
        }
        .insert(&state.orm)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}

async fn ensure_collector(state: &AppState, user_id: Uuid) -> anyhow::Result<()> {
    let existing = Collectors::find()
        .filter(CollectorCol::UserId.eq(user_id))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let rates = vec![
        ScrapRate {
            kind: "paper".to_string(),
            price_per_kg: 12.0,
        },
        ScrapRate {
            kind: "plastic".to_string(),
            price_per_kg: 8.5,
        },
        ScrapRate {
            kind: "metal".to_string(),
            price_per_kg: 30.0,
        },
    ];

    collectors::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        company_name: Set("Kabadi & Co".to_string()),
        categories: Set(serde_json::to_value(rates)?),
        latitude: Set(12.9650),
        longitude: Set(77.6000),
        service_radius: Set(8),
        phone: Set("+919800000003".to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    println!("Ensured collector");
    Ok(())
}
