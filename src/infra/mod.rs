//! Infrastructure adapters and runtime bootstrap.

pub mod data_layer;
pub mod error;
pub mod images;
pub mod store_file;
pub mod telemetry;
