//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST transport over the dialog manager (axum)
//! - `postgres` - PostgreSQL conversation store (sqlx)
//! - `recognizer` - Language understanding (CLU over reqwest, keyword rules, mock)
//! - `storage` - In-memory and YAML file conversation stores

pub mod http;
pub mod postgres;
pub mod recognizer;
pub mod storage;
