use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    #[sea_orm(string_value = "customer")]
    Customer,
    #[sea_orm(string_value = "vendor")]
    Vendor,
    #[sea_orm(string_value = "collector")]
    Collector,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Vendor => "vendor",
            UserRole::Collector => "collector",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Customer => "Customer",
            UserRole::Vendor => "Vendor",
            UserRole::Collector => "Collector",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(80))")]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    #[sea_orm(string_value = "fruit")]
    Fruit,
    #[sea_orm(string_value = "vegetable")]
    Vegetable,
    #[sea_orm(string_value = "leafy")]
    Leafy,
    #[sea_orm(string_value = "herbs")]
    Herbs,
    #[sea_orm(string_value = "other")]
    Other,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Fruit => "fruit",
            ProductCategory::Vegetable => "vegetable",
            ProductCategory::Leafy => "leafy",
            ProductCategory::Herbs => "herbs",
            ProductCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::Fruit => "Fruits",
            ProductCategory::Vegetable => "Vegetables",
            ProductCategory::Leafy => "Leafy Greens",
            ProductCategory::Herbs => "Herbs & Spices",
            ProductCategory::Other => "Other",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum ProductUnit {
    #[sea_orm(string_value = "kg")]
    Kg,
    #[sea_orm(string_value = "g")]
    G,
    #[sea_orm(string_value = "piece")]
    Piece,
    #[sea_orm(string_value = "dozen")]
    Dozen,
    #[sea_orm(string_value = "bunch")]
    Bunch,
}

impl ProductUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductUnit::Kg => "kg",
            ProductUnit::G => "g",
            ProductUnit::Piece => "piece",
            ProductUnit::Dozen => "dozen",
            ProductUnit::Bunch => "bunch",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductUnit::Kg => "Kilogram",
            ProductUnit::G => "Gram",
            ProductUnit::Piece => "Piece",
            ProductUnit::Dozen => "Dozen",
            ProductUnit::Bunch => "Bunch",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(40))")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "preparing")]
    Preparing,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(40))")]
#[serde(rename_all = "snake_case")]
pub enum PickupStatus {
    #[sea_orm(string_value = "requested")]
    Requested,
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl PickupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PickupStatus::Requested => "requested",
            PickupStatus::Scheduled => "scheduled",
            PickupStatus::Completed => "completed",
            PickupStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PickupStatus::Requested => "Requested",
            PickupStatus::Scheduled => "Scheduled",
            PickupStatus::Completed => "Completed",
            PickupStatus::Cancelled => "Cancelled",
        }
    }
}
