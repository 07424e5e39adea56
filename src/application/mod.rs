//! Application services: the metadata projection and the contracts it depends on.

pub mod data_layer;
pub mod error;
pub mod images;
pub mod metadata;
