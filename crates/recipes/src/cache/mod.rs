//! Cache backend implementations.
//!
//! - `memory`: in-process cache with TTL expiry
//! - `redis_impl`: Redis cache (requires the `redis` feature)

pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;
