use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    admin_site::{CreatedWithin, Fieldset, InlineAdmin, ModelAdmin},
    dto::{
        admin::{
            AdminCollectorList, AdminIndex, AdminPickupList, AdminVendorList, AuditLogList,
            CollectorChange, OrderChange, PickupChange, ProductBulkEdit, ProductChange,
            ProductRowEdit, VendorChange,
        },
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        collectors::{CollectorList, CreateCollectorRequest},
        orders::{CreateOrderRequest, OrderLineRequest, OrderList, OrderWithItems},
        pickups::{CreatePickupRequest, PickupList},
        products::{CreateProductRequest, ProductList, UpdateProductRequest, UpdateStockRequest},
        vendors::{CreateVendorRequest, UpdateVendorRequest, VendorList, VendorStatusRequest},
    },
    entity::sea_orm_active_enums::{
        OrderStatus, PickupStatus, ProductCategory, ProductUnit, UserRole,
    },
    models::{AuditLog, Collector, Order, OrderItem, Product, ScrapPickup, ScrapRate, User, Vendor},
    response::{ApiResponse, Meta},
    routes::{admin, auth, choices, collectors, health, orders, params, pickups, products, vendors},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::me,
        vendors::list_vendors,
        vendors::get_vendor,
        vendors::create_vendor,
        vendors::update_vendor,
        vendors::set_vendor_status,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::update_stock,
        products::delete_product,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        collectors::list_collectors,
        collectors::get_collector,
        collectors::create_collector,
        pickups::list_pickups,
        pickups::create_pickup,
        pickups::get_pickup,
        choices::list_choices,
        admin::index,
        admin::list_vendors,
        admin::get_vendor,
        admin::change_vendor,
        admin::delete_vendor,
        admin::list_products,
        admin::bulk_edit_products,
        admin::get_product,
        admin::change_product,
        admin::delete_product,
        admin::list_orders,
        admin::get_order,
        admin::change_order,
        admin::delete_order,
        admin::list_collectors,
        admin::get_collector,
        admin::change_collector,
        admin::delete_collector,
        admin::list_pickups,
        admin::get_pickup,
        admin::change_pickup,
        admin::delete_pickup,
        admin::list_audit_logs
    ),
    components(
        schemas(
            User,
            Vendor,
            Product,
            Order,
            OrderItem,
            ScrapRate,
            Collector,
            ScrapPickup,
            AuditLog,
            UserRole,
            ProductCategory,
            ProductUnit,
            OrderStatus,
            PickupStatus,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateVendorRequest,
            UpdateVendorRequest,
            VendorStatusRequest,
            VendorList,
            CreateProductRequest,
            UpdateProductRequest,
            UpdateStockRequest,
            ProductList,
            OrderLineRequest,
            CreateOrderRequest,
            OrderList,
            OrderWithItems,
            CreateCollectorRequest,
            CollectorList,
            CreatePickupRequest,
            PickupList,
            choices::Choice,
            choices::Choices,
            ModelAdmin,
            Fieldset,
            InlineAdmin,
            CreatedWithin,
            AdminIndex,
            VendorChange,
            ProductChange,
            ProductRowEdit,
            ProductBulkEdit,
            OrderChange,
            CollectorChange,
            PickupChange,
            AdminVendorList,
            AdminCollectorList,
            AdminPickupList,
            AuditLogList,
            params::Pagination,
            params::SortOrder,
            params::ProductSortBy,
            Meta,
            ApiResponse<User>,
            ApiResponse<Vendor>,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<Collector>,
            ApiResponse<ScrapPickup>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Vendors", description = "Vendor shop endpoints"),
        (name = "Products", description = "Produce catalogue endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Collectors", description = "Scrap collector endpoints"),
        (name = "Pickups", description = "Scrap pickup request endpoints"),
        (name = "Choices", description = "Enumerated field choices"),
        (name = "Admin", description = "Staff back-office endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
