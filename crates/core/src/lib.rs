//! Core types and contracts for the recipes storage layer.
//!
//! This crate is the functional core: domain types, pure operations, the
//! repository and cache contracts, and the request context every storage call
//! runs under. Concrete backends live in the `recipes` crate.

pub mod cache;
pub mod context;
pub mod recipe;
pub mod serde;
pub mod storage;
