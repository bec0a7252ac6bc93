//! Storage Engine Module
//!
//! This module provides the dictionary behind the REPL: a mapping from keys to
//! sets of unique members, guarded by a single lock.
//!
//! ## Invariants
//!
//! - A key exists if and only if its member set is non-empty
//! - Members are unique within a key
//! - Failing operations leave the dictionary untouched
//!
//! ## Example
//!
//! ```
//! use mvdict::storage::{InMemoryStorage, Storage};
//!
//! let storage = InMemoryStorage::new();
//! storage.add("colour".to_string(), "red".to_string()).unwrap();
//! assert!(storage.key_exists(&"colour".to_string()));
//!
//! // Removing the last member deletes the key
//! storage.remove(&"colour".to_string(), &"red".to_string()).unwrap();
//! assert!(!storage.key_exists(&"colour".to_string()));
//! ```

pub mod engine;

pub use engine::{InMemoryStorage, Storage, StorageError, StorageResult, StorageStats};
