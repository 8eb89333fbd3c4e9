use std::str::FromStr;

use greenly_api::{
    response::{ApiResponse, Meta},
    routes::{choices, params::Pagination},
    services::order_service::{line_subtotal, order_total},
    validation,
};
use rust_decimal::Decimal;

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

#[test]
fn line_subtotal_rounds_half_up_to_cents() {
    assert_eq!(line_subtotal(dec("40.00"), dec("1.500")), dec("60.00"));
    assert_eq!(line_subtotal(dec("33.33"), dec("0.125")), dec("4.17"));
    // 0.005 rounds away from zero
    assert_eq!(line_subtotal(dec("0.01"), dec("0.500")), dec("0.01"));
    assert_eq!(line_subtotal(dec("19.99"), dec("3")), dec("59.97"));
}

#[test]
fn order_total_sums_subtotals_without_fee() {
    let subtotals = [dec("60.00"), dec("4.17"), dec("59.97")];
    assert_eq!(order_total(subtotals.iter()), dec("124.14"));
    assert_eq!(order_total(Vec::<Decimal>::new().iter()), Decimal::ZERO);
}

#[test]
fn pagination_defaults_and_clamps() {
    let (page, per_page, offset) = Pagination::default().normalize();
    assert_eq!((page, per_page, offset), (1, 20, 0));

    let (page, per_page, offset) = Pagination {
        page: Some(3),
        per_page: Some(500),
    }
    .normalize();
    assert_eq!((page, per_page, offset), (3, 100, 200));

    let (page, per_page, _) = Pagination {
        page: Some(0),
        per_page: Some(0),
    }
    .normalize();
    assert_eq!((page, per_page), (1, 1));

    let (page, per_page, offset) = Pagination {
        page: Some(i64::MAX),
        per_page: Some(100),
    }
    .normalize();
    assert_eq!((page, per_page), (i64::MAX, 100));
    assert_eq!(offset, i64::MAX);
}

#[test]
fn numeric_columns_bound_precision_and_scale() {
    assert!(validation::fits_numeric("price", dec("99999999.99"), 10, 2).is_ok());
    assert!(validation::fits_numeric("price", dec("100000000.00"), 10, 2).is_err());
    assert!(validation::fits_numeric("price", dec("1.999"), 10, 2).is_err());
    assert!(validation::fits_numeric("quantity", dec("0.125"), 10, 3).is_ok());
    assert!(validation::fits_numeric("quantity", dec("0.1255"), 10, 3).is_err());
}

#[test]
fn field_checks() {
    assert!(validation::positive("price", dec("0.01")).is_ok());
    assert!(validation::positive("price", Decimal::ZERO).is_err());
    assert!(validation::non_negative("delivery_fee", Decimal::ZERO).is_ok());
    assert!(validation::non_negative("delivery_fee", dec("-1")).is_err());
    assert!(validation::non_negative_int("stock", -1).is_err());
    assert!(validation::rating(dec("5.00")).is_ok());
    assert!(validation::rating(dec("5.01")).is_err());
    assert!(validation::coordinates(12.97, 77.59).is_ok());
    assert!(validation::coordinates(91.0, 0.0).is_err());
    assert!(validation::coordinates(0.0, -181.0).is_err());
    assert!(validation::phone("+919800000001").is_ok());
    assert!(validation::phone("").is_err());
    assert!(validation::phone("+1234567890123456789012").is_err());
    assert!(validation::required("shop_name", "   ").is_err());
    assert!(validation::max_len("category", &"x".repeat(81), 80).is_err());
}

#[test]
fn choices_cover_every_enumerated_value() {
    let all = choices::all();
    let values = |list: &[choices::Choice]| list.iter().map(|c| c.value).collect::<Vec<_>>();

    assert_eq!(values(&all.roles), ["customer", "vendor", "collector"]);
    assert_eq!(
        values(&all.product_categories),
        ["fruit", "vegetable", "leafy", "herbs", "other"]
    );
    assert_eq!(values(&all.product_units), ["kg", "g", "piece", "dozen", "bunch"]);
    assert_eq!(
        values(&all.order_statuses),
        ["pending", "accepted", "preparing", "delivered", "cancelled"]
    );
    assert_eq!(
        values(&all.pickup_statuses),
        ["requested", "scheduled", "completed", "cancelled"]
    );

    let leafy = all
        .product_categories
        .iter()
        .find(|c| c.value == "leafy")
        .unwrap();
    assert_eq!(leafy.label, "Leafy Greens");
}

#[test]
fn meta_counts_pages() {
    assert_eq!(Meta::new(1, 20, 0).total_pages, Some(0));
    assert_eq!(Meta::new(1, 20, 20).total_pages, Some(1));
    assert_eq!(Meta::new(2, 20, 41).total_pages, Some(3));

    let empty = serde_json::to_value(Meta::empty()).unwrap();
    assert_eq!(empty, serde_json::json!({}));
}

#[test]
fn delete_acknowledgement_carries_the_id() {
    let id = uuid::Uuid::new_v4();
    let body = serde_json::to_value(ApiResponse::deleted(id)).unwrap();
    assert_eq!(body["message"], "Deleted");
    assert_eq!(body["data"]["id"], id.to_string());
}
