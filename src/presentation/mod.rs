//! View models consumed by presentational components.

pub mod views;
