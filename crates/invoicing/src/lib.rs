//! Invoicing collaborator.
//!
//! Issues the fiscal invoice for an order once its payment has been approved.

pub mod invoice;

pub use invoice::{InMemoryInvoicing, Invoice, InvoiceLine, Invoicing};
