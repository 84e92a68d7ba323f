//! Database module: recipient sources and receipt storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `source.rs`: allow-listed recipient source tables
//! - `store.rs`: pool setup and queries

pub mod models;
pub mod schema;
pub mod source;
pub mod store;

pub use models::DbSmsReceipt;
pub use schema::SQLITE_INIT;
pub use source::SourceTable;
