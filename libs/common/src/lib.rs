//! Common library for the pet store backend
//!
//! This crate provides shared infrastructure used by the API service:
//! PostgreSQL connection pooling, database configuration, and the
//! database error type.

pub mod database;
pub mod error;
