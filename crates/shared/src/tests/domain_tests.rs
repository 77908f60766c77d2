use super::*;

#[test]
fn rounds_decimal_prices_to_cents() {
    assert_eq!(Price::from_decimal(32.5).expect("price").cents(), 3250);
    assert_eq!(Price::from_decimal(45.99).expect("price").cents(), 4599);
    assert_eq!(Price::from_decimal(28.50).expect("price").cents(), 2850);
    assert_eq!(Price::from_decimal(0.005).expect("price").cents(), 1);
    assert_eq!(Price::from_decimal(0.0).expect("price"), Price::ZERO);
}

#[test]
fn rounds_half_cents_away_from_zero() {
    assert_eq!(Price::from_decimal(1.005).expect("price").cents(), 101);
    assert_eq!(Price::from_decimal(2.675).expect("price").cents(), 268);
    assert_eq!(Price::from_decimal(0.125).expect("price").cents(), 13);
    assert_eq!(Price::from_decimal(1.004).expect("price").cents(), 100);
    assert_eq!(Price::from_decimal(1e-30).expect("price"), Price::ZERO);
}

#[test]
fn rejects_amounts_beyond_exact_cent_range() {
    assert!(Price::from_decimal(1e20).is_err());
    assert!(Price::from_decimal(1e27).is_err());
}

#[test]
fn rejects_negative_and_non_finite_prices() {
    assert!(Price::from_decimal(-0.01).is_err());
    assert!(Price::from_decimal(f64::NAN).is_err());
    assert!(Price::from_decimal(f64::INFINITY).is_err());
}

#[test]
fn splits_price_into_units_and_cents() {
    let price = Price::from_cents(123_456);
    assert_eq!(price.whole_units(), 1234);
    assert_eq!(price.fractional_cents(), 56);
}

#[test]
fn entry_requires_positive_id_and_name() {
    assert_eq!(
        CatalogEntry::new(0, "Book", 1.0),
        Err(CatalogError::InvalidId { id: 0 })
    );
    assert_eq!(
        CatalogEntry::new(3, "   ", 1.0),
        Err(CatalogError::EmptyName { id: 3 })
    );
    assert!(CatalogEntry::new(3, "Vue Book", 39.99).is_ok());
}

#[test]
fn catalog_validation_rejects_duplicate_ids() {
    let entries = vec![
        CatalogEntry::new(1, "React Book", 32.5).expect("entry"),
        CatalogEntry::new(1, "JS Book", 45.99).expect("entry"),
    ];

    assert_eq!(
        validate_catalog(&entries),
        Err(CatalogError::DuplicateId { id: 1 })
    );
    assert_eq!(validate_catalog(&entries[..1]), Ok(()));
    assert_eq!(validate_catalog(&[]), Ok(()));
}

#[test]
fn price_serializes_as_json_number() {
    let entry = CatalogEntry::new(8, "Django Book", 28.5).expect("entry");
    let json = serde_json::to_value(&entry).expect("serialize");
    assert_eq!(json["price"], serde_json::json!(28.5));
    assert_eq!(json["id"], serde_json::json!(8));
}
