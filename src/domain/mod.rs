//! Domain layer types and invariants.

pub mod affiliates;
pub mod author;
pub mod error;
pub mod image;
pub mod integrations;
pub mod site;
pub mod store;
mod validation;
