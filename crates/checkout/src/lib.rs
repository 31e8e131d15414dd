//! Checkout orchestration.
//!
//! [`CheckoutFacade`] drives one order through pricing, shipping, payment
//! authorization and, when the payment is approved, the inventory and
//! invoicing collaborators. Every step is reported to an injected observer as
//! a [`CheckoutEvent`].

pub mod error;
pub mod event;
pub mod facade;
pub mod outcome;

pub use error::CheckoutError;
pub use event::{CheckoutEvent, CheckoutStage};
pub use facade::CheckoutFacade;
pub use outcome::{CheckoutOutcome, Declined, Quote, Receipt};
