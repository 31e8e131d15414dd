//! Payment methods and their authorization rules.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Credit card payments at or above this amount are declined.
pub const CREDIT_CARD_LIMIT: Decimal = dec!(1000);

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Approved strictly below [`CREDIT_CARD_LIMIT`].
    CreditCard,
    /// Instant bank transfer (PIX). Always approved.
    InstantTransfer,
    /// Alternate transfer rail. Always approved.
    AlternateTransfer,
}

/// Why a payment was declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DeclineReason {
    CreditLimitExceeded { limit: Decimal },
}

impl core::fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DeclineReason::CreditLimitExceeded { limit } => {
                write!(f, "credit limit of {limit} exceeded")
            }
        }
    }
}

/// Outcome of an authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Authorization {
    Approved,
    Declined { reason: DeclineReason },
}

impl Authorization {
    pub fn is_approved(&self) -> bool {
        matches!(self, Authorization::Approved)
    }
}

impl PaymentMethod {
    /// Decide whether `amount` can be charged with this method.
    ///
    /// Has no side effects: it neither touches the order nor notifies anyone.
    pub fn authorize(self, amount: Decimal) -> Authorization {
        match self {
            PaymentMethod::CreditCard if amount < CREDIT_CARD_LIMIT => Authorization::Approved,
            PaymentMethod::CreditCard => Authorization::Declined {
                reason: DeclineReason::CreditLimitExceeded {
                    limit: CREDIT_CARD_LIMIT,
                },
            },
            PaymentMethod::InstantTransfer | PaymentMethod::AlternateTransfer => {
                Authorization::Approved
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::InstantTransfer => "instant_transfer",
            PaymentMethod::AlternateTransfer => "alternate_transfer",
        }
    }
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
