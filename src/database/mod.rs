//! SQLite database layer backing the `sqlite` store.
//!
//! Provides connection management and schema migrations.
//!
//! # Usage
//!
//! ```no_run
//! use aibrowser::database::Database;
//!
//! let db = Database::open("browser-data.db").expect("failed to open database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
