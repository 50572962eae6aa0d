// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetit::currency::CurrencyBook;
use budgetit::models::Currency;
use rust_decimal::Decimal;

fn ccy(code: &str, rate: Decimal, primary: bool) -> Currency {
    Currency {
        code: code.to_string(),
        name: code.to_string(),
        symbol: format!("{}$", code),
        exchange_rate: rate,
        is_primary: primary,
        is_visible: primary,
    }
}

fn book() -> CurrencyBook {
    CurrencyBook::new(vec![
        ccy("ARS", Decimal::ONE, true),
        ccy("USD", Decimal::new(11, 4), false), // 0.0011
        ccy("EUR", Decimal::new(10, 4), false), // 0.0010
    ])
}

#[test]
fn identity_conversion_returns_amount() {
    let b = book();
    let amount = Decimal::new(12345, 2);
    assert_eq!(b.convert(amount, "ARS", "ARS"), amount);
    assert_eq!(b.convert(amount, "USD", "USD"), amount);
}

#[test]
fn conversion_uses_rate_ratio() {
    let b = book();
    // USD -> EUR: amount * (0.0011 / 0.0010) = amount * 1.1
    let res = b.convert(Decimal::from(100), "USD", "EUR");
    assert_eq!(res.round_dp(4), Decimal::new(1100000, 4));
}

#[test]
fn unknown_code_is_a_noop() {
    let b = book();
    let amount = Decimal::from(42);
    assert_eq!(b.convert(amount, "XXX", "ARS"), amount);
    assert_eq!(b.convert(amount, "ARS", "XXX"), amount);
}

#[test]
fn rebase_pins_new_primary_to_one() {
    let mut b = book();
    b.set_primary_and_recalculate("USD").unwrap();
    let usd = b.get("USD").unwrap();
    assert!(usd.is_primary);
    assert_eq!(usd.exchange_rate, Decimal::ONE);
    assert_eq!(b.iter().filter(|c| c.is_primary).count(), 1);
}

#[test]
fn rebase_preserves_cross_ratios() {
    let mut b = book();
    let before = b.get("EUR").unwrap().exchange_rate / b.get("USD").unwrap().exchange_rate;
    b.set_primary_and_recalculate("USD").unwrap();
    let after = b.get("EUR").unwrap().exchange_rate / b.get("USD").unwrap().exchange_rate;
    assert_eq!(before.round_dp(12), after.round_dp(12));

    // ARS is now quoted against USD: 1 / 0.0011
    let ars = b.get("ARS").unwrap();
    assert!(!ars.is_primary);
    assert_eq!(
        ars.exchange_rate.round_dp(4),
        (Decimal::ONE / Decimal::new(11, 4)).round_dp(4)
    );
}

#[test]
fn rebase_unknown_code_errors() {
    let mut b = book();
    assert!(b.set_primary_and_recalculate("XXX").is_err());
}

#[test]
fn visible_set_is_capped_with_primary_always_included() {
    let mut b = book();
    b.set_visible(&["USD".to_string()]).unwrap();
    let visible: Vec<&str> = b.visible().iter().map(|c| c.code.as_str()).collect();
    assert!(visible.contains(&"ARS")); // primary stays visible
    assert!(visible.contains(&"USD"));
    assert_eq!(visible.len(), 2);

    // Two non-primary codes plus the implicit primary would exceed the cap
    assert!(b
        .set_visible(&["USD".to_string(), "EUR".to_string()])
        .is_err());
    // Unknown codes are rejected
    assert!(b.set_visible(&["XXX".to_string()]).is_err());
}

#[test]
fn upsert_beyond_visible_cap_lands_hidden() {
    let mut b = book();
    b.set_visible(&["USD".to_string()]).unwrap();

    // ARS and USD already fill the visible set; a third visible entry
    // is accepted but stored hidden
    let mut gbp = ccy("GBP", Decimal::new(9, 4), false);
    gbp.is_visible = true;
    b.upsert(gbp).unwrap();

    let gbp = b.get("GBP").unwrap();
    assert!(!gbp.is_visible);
    assert_eq!(b.visible().len(), 2);

    // Re-upserting an already-visible code keeps it visible
    let usd = b.get("USD").unwrap().clone();
    b.upsert(usd).unwrap();
    assert!(b.get("USD").unwrap().is_visible);
    assert_eq!(b.visible().len(), 2);
}

#[test]
fn rebase_onto_hidden_currency_keeps_visible_cap() {
    let mut b = book();
    b.set_visible(&["USD".to_string()]).unwrap();
    assert!(!b.get("EUR").unwrap().is_visible);

    // EUR becomes primary and therefore visible; the set must not grow
    // past the cap
    b.set_primary_and_recalculate("EUR").unwrap();
    let visible: Vec<&str> = b.visible().iter().map(|c| c.code.as_str()).collect();
    assert!(visible.contains(&"EUR"));
    assert_eq!(visible.len(), 2);
}

#[test]
fn format_amount_uses_symbol_and_primary_default() {
    let b = book();
    let amount = Decimal::new(123456, 2);
    assert_eq!(b.format_amount(amount, None), "ARS$1234.56");
    assert_eq!(b.format_amount(amount, Some("USD")), "USD$1234.56");
    assert_eq!(b.format_amount(amount, Some("XXX")), "1234.56");
}
