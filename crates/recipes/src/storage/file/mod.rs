//! File-backed storage backend.
//!
//! Keeps every recipe in memory and writes the full set through to a JSON file
//! on each mutation.

mod persistence;
mod repository;

pub use repository::FileRepository;
