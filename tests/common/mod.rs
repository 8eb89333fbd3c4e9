#![allow(dead_code)]

use greenly_api::{
    db::create_pool,
    entity::{sea_orm_active_enums::UserRole, users::ActiveModel as UserActive},
    middleware::auth::AuthUser,
    state::AppState,
};
use sea_orm::ActiveModelTrait;
use sea_orm::ActiveValue::{NotSet, Set};
use uuid::Uuid;

/// Connects and migrates when a database is configured; `None` skips the test.
pub async fn test_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run database tests.");
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(Some(AppState::new(pool)))
}

/// Short random suffix so tests sharing a database do not collide.
pub fn unique(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &id[..12])
}

pub fn unique_phone() -> String {
    let digits: String = Uuid::new_v4()
        .as_u128()
        .to_string()
        .chars()
        .take(12)
        .collect();
    format!("+{digits}")
}

pub async fn create_user(
    state: &AppState,
    username: &str,
    role: UserRole,
    is_staff: bool,
) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(String::new()),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        password_hash: Set("dummy".into()),
        role: Set(role),
        phone: Set(None),
        latitude: Set(None),
        longitude: Set(None),
        is_active: Set(true),
        is_staff: Set(is_staff),
        last_login: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        role,
        is_staff,
    })
}
