//! Site metadata for a personal blog: a configuration store defined once and a
//! projection that regroups it for presentational consumers.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
