use chrono::{TimeZone, Utc};
use greenly_api::{
    admin_site::{self, CreatedWithin, search_terms},
    dto::admin::{OrderChange, PickupChange, ProductChange, ProductRowEdit, VendorChange},
};

#[test]
fn list_editable_fields_are_writable_and_displayed() {
    for admin in admin_site::registry() {
        for field in admin.list_editable {
            assert!(
                !admin.is_readonly(field),
                "{}: {field} is both readonly and list_editable",
                admin.model
            );
            assert!(
                admin.list_display.contains(field),
                "{}: {field} is list_editable but not displayed",
                admin.model
            );
        }
    }
}

#[test]
fn readonly_fields_appear_on_change_form() {
    for admin in admin_site::registry() {
        let shown: Vec<&str> = admin
            .fieldsets
            .iter()
            .flat_map(|set| set.fields.iter().copied())
            .collect();
        for field in admin.readonly_fields {
            assert!(shown.contains(field), "{}: {field} missing", admin.model);
        }
    }
}

#[test]
fn registry_lookup_by_path_or_model() {
    assert_eq!(admin_site::registry().len(), 5);

    let pickups = admin_site::lookup("scrap-pickups").expect("pickups registered");
    assert_eq!(pickups.model, "scrap_pickup");
    assert!(pickups.has_filter("category"));

    let orders = admin_site::lookup("order").expect("orders registered");
    assert_eq!(orders.inlines.len(), 1);
    assert_eq!(orders.inlines[0].extra, 0);

    assert!(admin_site::lookup("users").is_none());
}

#[test]
fn product_admin_edits_stock_and_active_flag_in_place() {
    let products = admin_site::lookup("products").expect("products registered");
    assert!(products.is_list_editable("stock"));
    assert!(products.is_list_editable("is_active"));
    assert!(!products.is_list_editable("price"));

    let editable = products.editable_fields();
    assert!(editable.contains(&"price"));
    assert!(!editable.contains(&"last_stock_update"));
}

#[test]
fn vendor_rating_is_readonly() {
    let vendors = admin_site::lookup("vendors").expect("vendors registered");
    assert!(vendors.is_readonly("rating"));
    assert!(vendors.is_readonly("total_reviews"));
    assert!(!vendors.editable_fields().contains(&"rating"));
}

#[test]
fn search_terms_split_on_whitespace_and_keep_quoted_phrases() {
    assert_eq!(search_terms("  fresh   greens "), vec!["fresh", "greens"]);
    assert_eq!(
        search_terms(r#"ravi "market road" 14"#),
        vec!["ravi", "market road", "14"]
    );
    assert!(search_terms("   ").is_empty());
    assert!(search_terms(r#""""#).is_empty());
}

#[test]
fn search_condition_is_absent_for_blank_queries() {
    use greenly_api::entity::{Vendors, vendors::Column};
    use sea_orm::sea_query::IntoColumnRef;

    let fields = [(Vendors, Column::ShopName).into_column_ref()];
    assert!(admin_site::search_condition(None, &fields).is_none());
    assert!(admin_site::search_condition(Some("  "), &fields).is_none());
    assert!(admin_site::search_condition(Some("ravi"), &fields).is_some());
    assert!(admin_site::search_condition(Some("ravi"), &[]).is_none());
}

#[test]
fn created_within_periods_start_at_utc_midnight() {
    let now = Utc.with_ymd_and_hms(2026, 3, 18, 15, 42, 7).unwrap();

    assert_eq!(
        CreatedWithin::Today.since(now),
        Utc.with_ymd_and_hms(2026, 3, 18, 0, 0, 0).unwrap()
    );
    assert_eq!(
        CreatedWithin::Past7Days.since(now),
        Utc.with_ymd_and_hms(2026, 3, 11, 0, 0, 0).unwrap()
    );
    assert_eq!(
        CreatedWithin::ThisMonth.since(now),
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(
        CreatedWithin::ThisYear.since(now),
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    );
}

#[test]
fn created_filter_parses_from_query_values() {
    let period: CreatedWithin = serde_json::from_str(r#""past_7_days""#).unwrap();
    assert_eq!(period, CreatedWithin::Past7Days);
    assert!(serde_json::from_str::<CreatedWithin>(r#""last_decade""#).is_err());
}

#[test]
fn change_forms_reject_readonly_fields() {
    assert!(serde_json::from_str::<VendorChange>(r#"{"rating": "4.50"}"#).is_err());
    assert!(serde_json::from_str::<VendorChange>(r#"{"total_reviews": 3}"#).is_err());
    assert!(serde_json::from_str::<ProductChange>(r#"{"last_stock_update": null}"#).is_err());
    assert!(serde_json::from_str::<OrderChange>(r#"{"created_at": "2026-01-01T00:00:00Z"}"#).is_err());
    assert!(serde_json::from_str::<ProductRowEdit>(
        r#"{"id": "6f1c1d7e-7a44-4a8e-9f7a-2f4a2b7f3f10", "price": "9.99"}"#
    )
    .is_err());
}

#[test]
fn change_forms_distinguish_null_from_absent() {
    let cleared: PickupChange = serde_json::from_str(r#"{"collector_id": null}"#).unwrap();
    assert_eq!(cleared.collector_id, Some(None));

    let untouched: PickupChange = serde_json::from_str(r#"{"status": "scheduled"}"#).unwrap();
    assert_eq!(untouched.collector_id, None);

    let photo: VendorChange = serde_json::from_str(r#"{"photo": null}"#).unwrap();
    assert_eq!(photo.photo, Some(None));
}

#[test]
fn change_forms_reject_values_outside_choices() {
    assert!(serde_json::from_str::<OrderChange>(r#"{"status": "shipped"}"#).is_err());
    assert!(serde_json::from_str::<PickupChange>(r#"{"status": "lost"}"#).is_err());
    assert!(serde_json::from_str::<ProductChange>(r#"{"category": "meat"}"#).is_err());
    assert!(serde_json::from_str::<ProductChange>(r#"{"unit": "litre"}"#).is_err());
}
