//! Nightly-rate pricing for a stay.
//!
//! Base price is the sum of per-night rates (a date's price override
//! when one exists, else the property's base nightly price; the
//! repository layer resolves that and hands this module the final
//! per-night list). Cleaning and service fees apply once per stay;
//! taxes are a configured percentage of base + fees.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Money;

/// Itemized price for a stay. All amounts in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: Money,
    pub cleaning_fee: Money,
    pub service_fee: Money,
    pub taxes: Money,
    pub total_amount: Money,
}

/// Compute the price of a stay from resolved per-night rates.
///
/// `nightly_rates` must contain one entry per occupied night, in any
/// order. An empty slice is a validation error (zero-night ranges are
/// rejected upstream by range validation, so this only fires on a
/// programming error), as is any negative amount or tax rate; there is
/// no silent fallback to zero.
pub fn quote(
    nightly_rates: &[Money],
    cleaning_fee: Money,
    service_fee: Money,
    tax_rate: f64,
) -> Result<PriceBreakdown, CoreError> {
    if nightly_rates.is_empty() {
        return Err(CoreError::Validation(
            "cannot price a stay with zero nights".into(),
        ));
    }
    if nightly_rates.iter().any(|rate| *rate < 0) || cleaning_fee < 0 || service_fee < 0 {
        return Err(CoreError::Validation(
            "nightly rates and fees must be non-negative".into(),
        ));
    }
    if !(0.0..=1.0).contains(&tax_rate) {
        return Err(CoreError::Validation(format!(
            "tax rate {tax_rate} must be between 0 and 1"
        )));
    }

    let base_price: Money = nightly_rates.iter().sum();
    let taxable = base_price + cleaning_fee + service_fee;
    let taxes = (taxable as f64 * tax_rate).round() as Money;

    Ok(PriceBreakdown {
        base_price,
        cleaning_fee,
        service_fee,
        taxes,
        total_amount: taxable + taxes,
    })
}
