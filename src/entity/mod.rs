pub mod audit_logs;
pub mod collectors;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod scrap_pickups;
pub mod sea_orm_active_enums;
pub mod users;
pub mod vendors;

pub use audit_logs::Entity as AuditLogs;
pub use collectors::Entity as Collectors;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use scrap_pickups::Entity as ScrapPickups;
pub use users::Entity as Users;
pub use vendors::Entity as Vendors;
