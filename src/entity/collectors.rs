use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "collectors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub company_name: String,
    /// `[{"type": "plastic", "price_per_kg": 5}]`, stored as-is.
    #[sea_orm(column_type = "JsonBinary")]
    pub categories: Json,
    pub latitude: f64,
    pub longitude: f64,
    /// Kilometres.
    pub service_radius: i32,
    pub phone: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::scrap_pickups::Entity")]
    ScrapPickups,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::scrap_pickups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScrapPickups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
