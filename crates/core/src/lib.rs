//! `flexorder-core`: shared building blocks for the checkout domain.
//!
//! Pure types only: errors, identifiers and the entity/value-object markers.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{InvoiceId, OrderId};
pub use value_object::ValueObject;
