//! Inventory collaborator.
//!
//! Checkout only needs one thing from inventory: to be told about an order
//! once its payment is approved. Stock checks are not part of this contract.

pub mod register;

pub use register::{InMemoryInventory, Inventory, RegisteredOrder};
