use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    audit_logs, collectors, order_items, orders, products, scrap_pickups,
    sea_orm_active_enums::{OrderStatus, PickupStatus, ProductCategory, ProductUnit, UserRole},
    users, vendors,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub is_staff: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Vendor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub shop_name: String,
    pub description: String,
    pub photo: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    #[schema(value_type = String, example = "07:00:00")]
    pub opening_time: NaiveTime,
    #[schema(value_type = String, example = "20:00:00")]
    pub closing_time: NaiveTime,
    pub is_active: bool,
    #[schema(value_type = String, example = "4.50")]
    pub rating: Decimal,
    pub total_reviews: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    pub category: ProductCategory,
    #[schema(value_type = String, example = "40.00")]
    pub price: Decimal,
    pub unit: ProductUnit,
    pub stock: i32,
    pub image: Option<String>,
    pub freshness_tag: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_stock_update: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Option<Uuid>,
    pub vendor_id: Option<Uuid>,
    #[schema(value_type = String, example = "120.00")]
    pub total_amount: Decimal,
    #[schema(value_type = String, example = "10.00")]
    pub delivery_fee: Decimal,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub delivery_latitude: f64,
    pub delivery_longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_name: String,
    #[schema(value_type = String, example = "40.00")]
    pub unit_price: Decimal,
    #[schema(value_type = String, example = "1.500")]
    pub quantity: Decimal,
    #[schema(value_type = String, example = "60.00")]
    pub subtotal: Decimal,
}

/// One accepted scrap category with its buying rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScrapRate {
    #[serde(rename = "type")]
    pub kind: String,
    pub price_per_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Collector {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    #[schema(value_type = Vec<ScrapRate>)]
    pub categories: serde_json::Value,
    pub latitude: f64,
    pub longitude: f64,
    pub service_radius: i32,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScrapPickup {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub collector_id: Option<Uuid>,
    pub category: String,
    #[schema(value_type = String, example = "12.500")]
    pub estimated_weight: Decimal,
    pub pickup_address: String,
    pub pickup_latitude: f64,
    pub pickup_longitude: f64,
    pub status: PickupStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLog {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub resource: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            role: model.role,
            phone: model.phone,
            latitude: model.latitude,
            longitude: model.longitude,
            is_active: model.is_active,
            is_staff: model.is_staff,
            last_login: model.last_login.map(|dt| dt.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<vendors::Model> for Vendor {
    fn from(model: vendors::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            shop_name: model.shop_name,
            description: model.description,
            photo: model.photo,
            latitude: model.latitude,
            longitude: model.longitude,
            address: model.address,
            opening_time: model.opening_time,
            closing_time: model.closing_time,
            is_active: model.is_active,
            rating: model.rating,
            total_reviews: model.total_reviews,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            vendor_id: model.vendor_id,
            name: model.name,
            category: model.category,
            price: model.price,
            unit: model.unit,
            stock: model.stock,
            image: model.image,
            freshness_tag: model.freshness_tag,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
            last_stock_update: model.last_stock_update.with_timezone(&Utc),
        }
    }
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            vendor_id: model.vendor_id,
            total_amount: model.total_amount,
            delivery_fee: model.delivery_fee,
            status: model.status,
            delivery_address: model.delivery_address,
            delivery_latitude: model.delivery_latitude,
            delivery_longitude: model.delivery_longitude,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<order_items::Model> for OrderItem {
    fn from(model: order_items::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            product_name: model.product_name,
            unit_price: model.unit_price,
            quantity: model.quantity,
            subtotal: model.subtotal,
        }
    }
}

impl From<collectors::Model> for Collector {
    fn from(model: collectors::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            company_name: model.company_name,
            categories: model.categories,
            latitude: model.latitude,
            longitude: model.longitude,
            service_radius: model.service_radius,
            phone: model.phone,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<scrap_pickups::Model> for ScrapPickup {
    fn from(model: scrap_pickups::Model) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            collector_id: model.collector_id,
            category: model.category,
            estimated_weight: model.estimated_weight,
            pickup_address: model.pickup_address,
            pickup_latitude: model.pickup_latitude,
            pickup_longitude: model.pickup_longitude,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<audit_logs::Model> for AuditLog {
    fn from(model: audit_logs::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            action: model.action,
            resource: model.resource,
            metadata: model.metadata,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
