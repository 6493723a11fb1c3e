//! Custom Test Assertions
//!
//! Provides assertion helpers for priced components that name the
//! offending component rather than dumping two whole structs.

use domain_pricing::{FixedAndScalablePrice, PriceComponent, PriceComponents};
use rust_decimal::Decimal;

/// Asserts that two component sets match amount for amount
///
/// # Panics
///
/// Panics on the first component that differs, or on a currency mismatch
pub fn assert_components_eq(actual: &PriceComponents, expected: &PriceComponents) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    for &component in PriceComponent::ALL {
        assert_eq!(
            actual.get(component),
            expected.get(component),
            "Component {} differs",
            component.label()
        );
    }
}

/// Asserts that fixed and scalable parts add back up to the total
///
/// # Panics
///
/// Panics if any component is not conserved or a component appears on
/// the wrong side of the filter
pub fn assert_conserved(price: &FixedAndScalablePrice) {
    for &component in PriceComponent::ALL {
        let total = price.total().get(component);
        let fixed = price.fixed().get(component);
        let scalable = price.scalable().get(component);

        assert_eq!(
            fixed + scalable,
            total,
            "Component {} not conserved: fixed={}, scalable={}, total={}",
            component.label(),
            fixed,
            scalable,
            total
        );

        if price.filter().is_fixed(component) {
            assert_eq!(scalable, Decimal::ZERO, "Fixed component {} leaked into scalable", component.label());
        } else {
            assert_eq!(fixed, Decimal::ZERO, "Scalable component {} leaked into fixed", component.label());
        }
    }
}

/// Asserts that every component carries no more decimal places than the
/// currency allows
pub fn assert_currency_precision(components: &PriceComponents) {
    let currency = components.currency();
    for (component, amount) in components.iter() {
        assert_eq!(
            currency.round(amount),
            amount,
            "Component {} is not at {} precision: {}",
            component.label(),
            currency,
            amount
        );
    }
}
