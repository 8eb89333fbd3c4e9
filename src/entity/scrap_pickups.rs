use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::PickupStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "scrap_pickups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub collector_id: Option<Uuid>,
    pub category: String,
    #[sea_orm(column_type = "Decimal(Some((10, 3)))")]
    pub estimated_weight: Decimal,
    #[sea_orm(column_type = "Text")]
    pub pickup_address: String,
    pub pickup_latitude: f64,
    pub pickup_longitude: f64,
    pub status: PickupStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CustomerId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::collectors::Entity",
        from = "Column::CollectorId",
        to = "super::collectors::Column::Id",
        on_delete = "SetNull"
    )]
    Collectors,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::collectors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Collectors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
