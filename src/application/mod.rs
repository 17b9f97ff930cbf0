//! Application services layer scaffolding.

pub mod access;
pub mod admin;
pub mod carousel;
pub mod error;
pub mod nonce;
pub mod repos;
pub mod showcase;
