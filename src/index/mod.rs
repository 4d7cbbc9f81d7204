//! Index structures.
//!
//! - [`btree`] - In-memory B+ tree over unique integer keys

pub mod btree;
