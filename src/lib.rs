//! Vetrina library crate: application services, domain model, and
//! infrastructure adapters behind the `vetrina` binary.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
