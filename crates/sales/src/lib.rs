//! Sales domain module: orders, shipping and payment strategies, and the
//! price-adjustment chain.
//!
//! Pure, deterministic domain logic (no IO, no logging, no storage).

pub mod order;
pub mod payment;
pub mod pricing;
pub mod shipping;

pub use order::{LineItem, Order};
pub use payment::{Authorization, CREDIT_CARD_LIMIT, DeclineReason, PaymentMethod};
pub use pricing::{
    Adjust, AdjustmentKind, BULK_DISCOUNT_RATE, BULK_DISCOUNT_THRESHOLD, BulkDiscount,
    DiscountPlan, GIFT_WRAP_FEE, GiftWrapSurcharge, PIX_DISCOUNT_RATE, PixDiscount,
    PriceComponent,
};
pub use shipping::ShippingStrategy;
