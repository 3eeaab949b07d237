//! Database module: page copy and admin credentials in SQLite.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database
//! - `seed.rs`: default page copy and the bootstrap admin
//! - `sqlite.rs`: the `ContentStore` handle

pub mod models;
pub mod schema;
pub mod seed;
pub mod sqlite;

pub use models::{AdminCredential, ContentEntry, InitReport, UpsertOutcome};
pub use schema::SQLITE_INIT;
pub use sqlite::{ContentStore, SqlitePool};
