//! Interface definitions for the index administration backend.
//!
//! This module defines the abstract `IndexAdmin` trait that allows for
//! dependency injection and swappable search backend implementations.

mod index_admin;

pub use index_admin::IndexAdmin;
