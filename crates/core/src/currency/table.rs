//! Exchange rate composition over a base-currency table.
//!
//! External rate sources return, for one base currency, a map of
//! `currency -> units of currency per 1 base`. Any cross rate is derived
//! from that single table by triangulating through the base, so the
//! resolver never issues more than one external call per computation.

use std::collections::HashMap;

use rust_decimal::Decimal;

/// Composes the rate for `1 unit of from = ? units of to` from a table keyed
/// by `base`.
///
/// `table[c]` must mean "1 base = table[c] units of c". The base currency
/// itself does not need an entry. Returns `None` when a required entry is
/// missing or would force a division by zero.
#[must_use]
pub fn cross_rate(
    table: &HashMap<String, Decimal>,
    base: &str,
    from: &str,
    to: &str,
) -> Option<Decimal> {
    if from == to {
        return Some(Decimal::ONE);
    }

    let units_of = |currency: &str| -> Option<Decimal> {
        if currency == base {
            Some(Decimal::ONE)
        } else {
            table.get(currency).copied()
        }
    };

    let from_units = units_of(from)?;
    let to_units = units_of(to)?;

    if from_units.is_zero() {
        return None;
    }

    // rate(from -> to) = rate(base -> to) / rate(base -> from)
    Some(to_units / from_units)
}
