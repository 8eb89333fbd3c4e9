//! Back-office registrations.
//!
//! Each registered model carries the configuration the admin UI renders
//! (columns, filters, search fields, grouped change form) and the rules the
//! admin services enforce (readonly fields, bulk-editable fields, search
//! semantics).

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use sea_orm::Condition;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{ColumnRef, Expr};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct Fieldset {
    pub name: &'static str,
    #[schema(value_type = Vec<String>)]
    pub fields: &'static [&'static str],
}

/// Child rows rendered inside the parent's change form.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct InlineAdmin {
    pub model: &'static str,
    #[schema(value_type = Vec<String>)]
    pub readonly_fields: &'static [&'static str],
    /// Blank rows offered for new children.
    pub extra: u32,
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct ModelAdmin {
    pub model: &'static str,
    pub path: &'static str,
    pub verbose_name_plural: &'static str,
    #[schema(value_type = Vec<String>)]
    pub list_display: &'static [&'static str],
    #[schema(value_type = Vec<String>)]
    pub list_filter: &'static [&'static str],
    #[schema(value_type = Vec<String>)]
    pub search_fields: &'static [&'static str],
    #[schema(value_type = Vec<String>)]
    pub readonly_fields: &'static [&'static str],
    #[schema(value_type = Vec<String>)]
    pub list_editable: &'static [&'static str],
    #[schema(value_type = Vec<Fieldset>)]
    pub fieldsets: &'static [Fieldset],
    #[schema(value_type = Vec<InlineAdmin>)]
    pub inlines: &'static [InlineAdmin],
    #[schema(value_type = Vec<String>)]
    pub ordering: &'static [&'static str],
}

impl ModelAdmin {
    pub fn is_readonly(&self, field: &str) -> bool {
        self.readonly_fields.contains(&field)
    }

    pub fn is_list_editable(&self, field: &str) -> bool {
        self.list_editable.contains(&field)
    }

    pub fn has_filter(&self, field: &str) -> bool {
        self.list_filter.contains(&field)
    }

    /// Fields shown on the change form that the admin may write.
    pub fn editable_fields(&self) -> Vec<&'static str> {
        self.fieldsets
            .iter()
            .flat_map(|set| set.fields.iter().copied())
            .filter(|field| !self.is_readonly(field))
            .collect()
    }
}

pub const VENDOR_ADMIN: ModelAdmin = ModelAdmin {
    model: "vendor",
    path: "vendors",
    verbose_name_plural: "Vendors",
    list_display: &["shop_name", "user", "is_active", "rating", "created_at"],
    list_filter: &["is_active", "created_at"],
    search_fields: &["shop_name", "user__username", "address"],
    readonly_fields: &["created_at", "rating", "total_reviews"],
    list_editable: &[],
    fieldsets: &[
        Fieldset {
            name: "Basic Info",
            fields: &["user", "shop_name", "description", "photo"],
        },
        Fieldset {
            name: "Location",
            fields: &["latitude", "longitude", "address"],
        },
        Fieldset {
            name: "Operating Hours",
            fields: &["opening_time", "closing_time", "is_active"],
        },
        Fieldset {
            name: "Stats",
            fields: &["rating", "total_reviews", "created_at"],
        },
    ],
    inlines: &[],
    ordering: &["-created_at"],
};

pub const PRODUCT_ADMIN: ModelAdmin = ModelAdmin {
    model: "product",
    path: "products",
    verbose_name_plural: "Products",
    list_display: &[
        "name",
        "vendor",
        "category",
        "price",
        "unit",
        "stock",
        "is_active",
        "created_at",
    ],
    list_filter: &["category", "is_active", "created_at"],
    search_fields: &["name", "vendor__shop_name"],
    readonly_fields: &["created_at", "last_stock_update"],
    list_editable: &["stock", "is_active"],
    fieldsets: &[
        Fieldset {
            name: "Basic Info",
            fields: &["vendor", "name", "category", "image"],
        },
        Fieldset {
            name: "Pricing & Stock",
            fields: &["price", "unit", "stock", "freshness_tag"],
        },
        Fieldset {
            name: "Status",
            fields: &["is_active", "created_at", "last_stock_update"],
        },
    ],
    inlines: &[],
    ordering: &["-created_at"],
};

pub const ORDER_ADMIN: ModelAdmin = ModelAdmin {
    model: "order",
    path: "orders",
    verbose_name_plural: "Orders",
    list_display: &["id", "customer", "vendor", "total_amount", "status", "created_at"],
    list_filter: &["status", "created_at"],
    search_fields: &["customer__username", "vendor__shop_name"],
    readonly_fields: &["created_at", "updated_at"],
    list_editable: &[],
    fieldsets: &[
        Fieldset {
            name: "Order Info",
            fields: &["customer", "vendor", "status"],
        },
        Fieldset {
            name: "Delivery",
            fields: &["delivery_address", "delivery_latitude", "delivery_longitude"],
        },
        Fieldset {
            name: "Pricing",
            fields: &["total_amount", "delivery_fee"],
        },
        Fieldset {
            name: "Timestamps",
            fields: &["created_at", "updated_at"],
        },
    ],
    inlines: &[InlineAdmin {
        model: "order_item",
        readonly_fields: &["product_name", "unit_price", "quantity", "subtotal"],
        extra: 0,
    }],
    ordering: &["-created_at"],
};

pub const COLLECTOR_ADMIN: ModelAdmin = ModelAdmin {
    model: "collector",
    path: "collectors",
    verbose_name_plural: "Collectors",
    list_display: &["company_name", "user", "phone", "service_radius", "created_at"],
    list_filter: &[],
    search_fields: &["company_name", "user__username", "phone"],
    readonly_fields: &["created_at"],
    list_editable: &[],
    fieldsets: &[Fieldset {
        name: "",
        fields: &[
            "user",
            "company_name",
            "categories",
            "latitude",
            "longitude",
            "service_radius",
            "phone",
            "created_at",
        ],
    }],
    inlines: &[],
    ordering: &["-created_at"],
};

pub const SCRAP_PICKUP_ADMIN: ModelAdmin = ModelAdmin {
    model: "scrap_pickup",
    path: "scrap-pickups",
    verbose_name_plural: "Scrap pickups",
    list_display: &["id", "customer", "collector", "category", "status", "created_at"],
    list_filter: &["status", "category", "created_at"],
    search_fields: &["customer__username", "collector__company_name"],
    readonly_fields: &["created_at"],
    list_editable: &[],
    fieldsets: &[Fieldset {
        name: "",
        fields: &[
            "customer",
            "collector",
            "category",
            "estimated_weight",
            "pickup_address",
            "pickup_latitude",
            "pickup_longitude",
            "status",
            "created_at",
        ],
    }],
    inlines: &[],
    ordering: &["-created_at"],
};

static SITE: [ModelAdmin; 5] = [
    VENDOR_ADMIN,
    PRODUCT_ADMIN,
    ORDER_ADMIN,
    COLLECTOR_ADMIN,
    SCRAP_PICKUP_ADMIN,
];

pub fn registry() -> &'static [ModelAdmin] {
    &SITE
}

pub fn lookup(path: &str) -> Option<&'static ModelAdmin> {
    SITE.iter().find(|admin| admin.path == path || admin.model == path)
}

/// `created_at` filter choices offered next to the changelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub enum CreatedWithin {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "past_7_days")]
    Past7Days,
    #[serde(rename = "this_month")]
    ThisMonth,
    #[serde(rename = "this_year")]
    ThisYear,
}

impl CreatedWithin {
    /// Lower bound (inclusive, UTC midnight) of the period containing `now`.
    pub fn since(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive();
        let start = match self {
            CreatedWithin::Today => Some(today),
            CreatedWithin::Past7Days => today.checked_sub_days(Days::new(7)),
            CreatedWithin::ThisMonth => NaiveDate::from_ymd_opt(today.year(), today.month(), 1),
            CreatedWithin::ThisYear => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        };
        start.unwrap_or(today).and_time(NaiveTime::MIN).and_utc()
    }
}

/// Splits a search box value into terms. Double-quoted phrases stay whole.
pub fn search_terms(query: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in query.chars() {
        match ch {
            '"' => {
                if quoted && !current.is_empty() {
                    terms.push(std::mem::take(&mut current));
                }
                quoted = !quoted;
            }
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    terms.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        terms.push(current);
    }
    terms
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Every term must match at least one of `fields` (case-insensitive substring).
pub fn search_condition(query: Option<&str>, fields: &[ColumnRef]) -> Option<Condition> {
    let terms = search_terms(query?);
    if terms.is_empty() || fields.is_empty() {
        return None;
    }

    let mut all = Condition::all();
    for term in terms {
        let pattern = format!("%{}%", escape_like(&term));
        let mut any = Condition::any();
        for field in fields {
            any = any.add(Expr::col(field.clone()).ilike(pattern.clone()));
        }
        all = all.add(any);
    }
    Some(all)
}
