//! Price-adjustment chain.
//!
//! An order's payable value is computed by a chain of adjustment nodes, each
//! wrapping either another node or the terminal [`Order`]:
//!
//! ```ignore
//! // gift wrap on top of a bulk discount on top of the order
//! let chain = order.with_bulk_discount().with_gift_wrap();
//! let value = chain.evaluate()?;
//! ```
//!
//! Evaluation recurses inner-first: a node asks its inner component for a
//! value, then applies its own rule to that value. Nodes are read-only views
//! over an immutable order, so evaluating the same chain twice yields the same
//! result. Order of nodes matters: `BulkDiscount` tests its threshold against
//! whatever value reaches it, not against the order's base value.
//!
//! Every node also exposes the terminal order's non-price fields
//! (`payment_method`, `shipping_strategy`, `gift_wrap`) so callers can treat a
//! bare order and a decorated one the same way.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use flexorder_core::{DomainError, DomainResult};

use crate::order::Order;
use crate::payment::PaymentMethod;
use crate::shipping::ShippingStrategy;

/// Multiplier applied by [`PixDiscount`] (a flat 5% reduction).
pub const PIX_DISCOUNT_RATE: Decimal = dec!(0.95);

/// [`BulkDiscount`] only applies strictly above this value.
pub const BULK_DISCOUNT_THRESHOLD: Decimal = dec!(500);

/// Multiplier applied by [`BulkDiscount`] (a 10% reduction).
pub const BULK_DISCOUNT_RATE: Decimal = dec!(0.90);

/// Fixed gift-wrap fee.
pub const GIFT_WRAP_FEE: Decimal = dec!(5.00);

/// The kind of an adjustment node, as reported by [`PriceComponent::adjustments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    PixDiscount,
    BulkDiscount,
    GiftWrapSurcharge,
}

impl AdjustmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AdjustmentKind::PixDiscount => "pix_discount",
            AdjustmentKind::BulkDiscount => "bulk_discount",
            AdjustmentKind::GiftWrapSurcharge => "gift_wrap_surcharge",
        }
    }
}

impl core::fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can be priced: the bare order or an adjustment wrapping it.
pub trait PriceComponent {
    /// Value after every adjustment in this (sub)chain. Recomputed on each call.
    ///
    /// Fails with an invariant violation if the value leaves the `Decimal`
    /// range.
    fn evaluate(&self) -> DomainResult<Decimal>;

    /// The terminal order of the chain, regardless of depth.
    fn order(&self) -> &Order;

    /// Adjustment kinds in this chain, innermost first. Empty for a bare order.
    fn adjustments(&self) -> Vec<AdjustmentKind>;

    fn payment_method(&self) -> PaymentMethod {
        self.order().payment_method()
    }

    fn shipping_strategy(&self) -> ShippingStrategy {
        self.order().shipping_strategy()
    }

    fn gift_wrap(&self) -> bool {
        self.order().gift_wrap()
    }

    /// Whether the chain contains a [`GiftWrapSurcharge`] node.
    ///
    /// When true, nobody outside the chain may charge the fee again.
    fn applies_gift_wrap(&self) -> bool;

    /// True for a bare order with no adjustment node around it.
    fn is_raw(&self) -> bool {
        false
    }
}

impl PriceComponent for Order {
    fn evaluate(&self) -> DomainResult<Decimal> {
        Ok(self.base_value())
    }

    fn order(&self) -> &Order {
        self
    }

    fn adjustments(&self) -> Vec<AdjustmentKind> {
        Vec::new()
    }

    fn applies_gift_wrap(&self) -> bool {
        false
    }

    fn is_raw(&self) -> bool {
        true
    }
}

impl<C: PriceComponent + ?Sized> PriceComponent for &C {
    fn evaluate(&self) -> DomainResult<Decimal> {
        (**self).evaluate()
    }

    fn order(&self) -> &Order {
        (**self).order()
    }

    fn adjustments(&self) -> Vec<AdjustmentKind> {
        (**self).adjustments()
    }

    fn applies_gift_wrap(&self) -> bool {
        (**self).applies_gift_wrap()
    }

    fn is_raw(&self) -> bool {
        (**self).is_raw()
    }
}

impl<C: PriceComponent + ?Sized> PriceComponent for Box<C> {
    fn evaluate(&self) -> DomainResult<Decimal> {
        (**self).evaluate()
    }

    fn order(&self) -> &Order {
        (**self).order()
    }

    fn adjustments(&self) -> Vec<AdjustmentKind> {
        (**self).adjustments()
    }

    fn applies_gift_wrap(&self) -> bool {
        (**self).applies_gift_wrap()
    }

    fn is_raw(&self) -> bool {
        (**self).is_raw()
    }
}

fn push_adjustment(inner: &impl PriceComponent, kind: AdjustmentKind) -> Vec<AdjustmentKind> {
    let mut kinds = inner.adjustments();
    kinds.push(kind);
    kinds
}

fn out_of_range(kind: AdjustmentKind, value: Decimal) -> DomainError {
    DomainError::invariant(format!("{kind} overflowed the decimal range at {value}"))
}

/// Unconditional 5% discount for instant-transfer payments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixDiscount<C> {
    inner: C,
}

impl<C: PriceComponent> PixDiscount<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: PriceComponent> PriceComponent for PixDiscount<C> {
    fn evaluate(&self) -> DomainResult<Decimal> {
        let value = self.inner.evaluate()?;
        value
            .checked_mul(PIX_DISCOUNT_RATE)
            .ok_or_else(|| out_of_range(AdjustmentKind::PixDiscount, value))
    }

    fn order(&self) -> &Order {
        self.inner.order()
    }

    fn adjustments(&self) -> Vec<AdjustmentKind> {
        push_adjustment(&self.inner, AdjustmentKind::PixDiscount)
    }

    fn applies_gift_wrap(&self) -> bool {
        self.inner.applies_gift_wrap()
    }
}

/// 10% discount when the value reaching this node exceeds
/// [`BULK_DISCOUNT_THRESHOLD`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkDiscount<C> {
    inner: C,
}

impl<C: PriceComponent> BulkDiscount<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: PriceComponent> PriceComponent for BulkDiscount<C> {
    fn evaluate(&self) -> DomainResult<Decimal> {
        let value = self.inner.evaluate()?;
        if value > BULK_DISCOUNT_THRESHOLD {
            value
                .checked_mul(BULK_DISCOUNT_RATE)
                .ok_or_else(|| out_of_range(AdjustmentKind::BulkDiscount, value))
        } else {
            Ok(value)
        }
    }

    fn order(&self) -> &Order {
        self.inner.order()
    }

    fn adjustments(&self) -> Vec<AdjustmentKind> {
        push_adjustment(&self.inner, AdjustmentKind::BulkDiscount)
    }

    fn applies_gift_wrap(&self) -> bool {
        self.inner.applies_gift_wrap()
    }
}

/// Adds [`GIFT_WRAP_FEE`] when the terminal order asks for gift wrap.
///
/// Stacking several of these charges the fee once: a node only charges it if
/// no inner node already did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftWrapSurcharge<C> {
    inner: C,
}

impl<C: PriceComponent> GiftWrapSurcharge<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: PriceComponent> PriceComponent for GiftWrapSurcharge<C> {
    fn evaluate(&self) -> DomainResult<Decimal> {
        let value = self.inner.evaluate()?;
        if self.inner.gift_wrap() && !self.inner.applies_gift_wrap() {
            value
                .checked_add(GIFT_WRAP_FEE)
                .ok_or_else(|| out_of_range(AdjustmentKind::GiftWrapSurcharge, value))
        } else {
            Ok(value)
        }
    }

    fn order(&self) -> &Order {
        self.inner.order()
    }

    fn adjustments(&self) -> Vec<AdjustmentKind> {
        push_adjustment(&self.inner, AdjustmentKind::GiftWrapSurcharge)
    }

    fn applies_gift_wrap(&self) -> bool {
        true
    }
}

/// Fluent chain construction, available on every [`PriceComponent`].
pub trait Adjust: PriceComponent + Sized {
    fn with_pix_discount(self) -> PixDiscount<Self> {
        PixDiscount::new(self)
    }

    fn with_bulk_discount(self) -> BulkDiscount<Self> {
        BulkDiscount::new(self)
    }

    fn with_gift_wrap(self) -> GiftWrapSurcharge<Self> {
        GiftWrapSurcharge::new(self)
    }
}

impl<C: PriceComponent> Adjust for C {}

/// Declarative selection of adjustments, applied in a fixed order:
/// PIX discount, then bulk discount, then gift wrap.
///
/// Useful when the set of adjustments comes from data (a form, a request body)
/// rather than from code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountPlan {
    pub pix: bool,
    pub bulk: bool,
    pub gift_wrap: bool,
}

impl DiscountPlan {
    /// Plan matching the order's own settings: PIX discount for instant
    /// transfers, bulk discount always considered, gift wrap if requested.
    pub fn for_order(order: &Order) -> Self {
        Self {
            pix: order.payment_method() == PaymentMethod::InstantTransfer,
            bulk: true,
            gift_wrap: order.gift_wrap(),
        }
    }

    pub fn apply(self, order: Order) -> Box<dyn PriceComponent> {
        let mut chain: Box<dyn PriceComponent> = Box::new(order);
        if self.pix {
            chain = Box::new(PixDiscount::new(chain));
        }
        if self.bulk {
            chain = Box::new(BulkDiscount::new(chain));
        }
        if self.gift_wrap {
            chain = Box::new(GiftWrapSurcharge::new(chain));
        }
        chain
    }
}
