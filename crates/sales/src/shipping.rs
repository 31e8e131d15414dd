//! Shipping cost strategies.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const STANDARD_RATE: Decimal = dec!(0.05);
const EXPRESS_RATE: Decimal = dec!(0.10);
const EXPRESS_HANDLING_FEE: Decimal = dec!(15.00);
const INSTANT_PREMIUM_FLAT: Decimal = dec!(50.00);

/// How an order is shipped. Each variant maps the adjusted order value to a
/// shipping cost; none of them can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingStrategy {
    /// 5% of the order value.
    Standard,
    /// 10% of the order value plus a fixed handling fee.
    Express,
    /// Flat premium rate, independent of the order value.
    InstantPremium,
}

impl ShippingStrategy {
    pub fn calculate(self, value: Decimal) -> Decimal {
        match self {
            ShippingStrategy::Standard => value * STANDARD_RATE,
            ShippingStrategy::Express => value * EXPRESS_RATE + EXPRESS_HANDLING_FEE,
            ShippingStrategy::InstantPremium => INSTANT_PREMIUM_FLAT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShippingStrategy::Standard => "standard",
            ShippingStrategy::Express => "express",
            ShippingStrategy::InstantPremium => "instant_premium",
        }
    }
}

impl core::fmt::Display for ShippingStrategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
