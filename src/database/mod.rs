//! tilmarks storage layer.
//!
//! Provides SQLite connection management, schema migrations, and the
//! [`KeyValueStore`] trait the persistence codec and draft cache write through.
//!
//! # Usage
//!
//! ```no_run
//! use tilmarks::database::{Database, KeyValueStore};
//!
//! // Open a persistent database
//! let db = Database::open("tilmarks.db").expect("failed to open database");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//!
//! db.set("greeting", "hello").expect("write failed");
//! assert_eq!(db.get("greeting").unwrap().as_deref(), Some("hello"));
//! ```

pub mod connection;
pub mod kv_store;
pub mod migrations;

pub use connection::Database;
pub use kv_store::KeyValueStore;
