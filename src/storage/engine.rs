//! In-Memory Multi-Value Storage Engine
//!
//! This module implements the storage engine behind the dictionary: a mapping
//! from keys to sets of unique members.
//!
//! ## Design Decisions
//!
//! 1. **Empty keys never exist**: a key is present if and only if it has at
//!    least one member. Removing the last member deletes the key.
//! 2. **One lock**: the whole dictionary sits behind a single `RwLock`, so every
//!    operation (including add-or-create) is one guarded step.
//! 3. **Insertion order**: keys iterate in the order they were first added and
//!    members in the order they were added to their key.
//! 4. **Materialised queries**: query methods return a `Vec` snapshot taken
//!    under one read guard.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 InMemoryStorage                      │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │ RwLock<Dictionary>                             │  │
//! │  │   entries: HashMap<K, MemberSet<V>>            │  │
//! │  │   order:   Vec<K>         (key order)          │  │
//! │  └────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```

use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Errors raised when an operation would violate a dictionary invariant.
///
/// A failing operation leaves the dictionary exactly as it was.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The key has no members (and therefore does not exist)
    #[error("key does not exist")]
    KeyNotFound,

    /// The key exists but the member is not in its set
    #[error("member does not exist")]
    MemberNotFound,

    /// The member is already in the key's set
    #[error("member already exists for key")]
    DuplicateMember,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Interface for a multi-value dictionary.
///
/// All methods take `&self`; implementations are responsible for their own
/// synchronisation so they can be shared behind an `Arc`.
pub trait Storage<K, V> {
    /// Adds a member to the set for `key`, creating the key if needed.
    fn add(&self, key: K, value: V) -> StorageResult<()>;

    /// Returns every key, each exactly once.
    fn keys(&self) -> Vec<K>;

    /// Returns the members of `key`.
    fn members(&self, key: &K) -> StorageResult<Vec<V>>;

    /// Removes one member from `key`. The key is deleted once its set is empty.
    fn remove(&self, key: &K, value: &V) -> StorageResult<()>;

    /// Deletes `key` and all of its members.
    fn remove_all(&self, key: &K) -> StorageResult<()>;

    /// Empties the dictionary.
    fn clear(&self);

    /// Whether `key` has at least one member.
    fn key_exists(&self, key: &K) -> bool;

    /// Whether `value` is a member of `key`. Fails if the key does not exist.
    fn member_exists(&self, key: &K, value: &V) -> StorageResult<bool>;

    /// Returns one `(key, member)` pair per stored member, ordered by key and
    /// then by member insertion order.
    fn items(&self) -> Vec<(K, V)>;

    /// Returns every member across all keys. A value stored under N keys
    /// appears N times.
    fn all_members(&self) -> Vec<V> {
        self.items().into_iter().map(|(_, value)| value).collect()
    }
}

/// An insertion-ordered set of members for one key.
#[derive(Debug, Clone)]
struct MemberSet<V> {
    ordered: Vec<V>,
    index: HashSet<V>,
}

impl<V: Clone + Eq + Hash> MemberSet<V> {
    fn with_member(value: V) -> Self {
        let mut set = Self {
            ordered: Vec::new(),
            index: HashSet::new(),
        };
        set.insert(value);
        set
    }

    /// Returns `false` if the value was already present.
    fn insert(&mut self, value: V) -> bool {
        if !self.index.insert(value.clone()) {
            return false;
        }
        self.ordered.push(value);
        true
    }

    /// Returns `false` if the value was not present.
    fn remove(&mut self, value: &V) -> bool {
        if !self.index.remove(value) {
            return false;
        }
        // Linear in the set size; the order of the other members is kept
        if let Some(pos) = self.ordered.iter().position(|member| member == value) {
            self.ordered.remove(pos);
        }
        true
    }

    #[inline]
    fn contains(&self, value: &V) -> bool {
        self.index.contains(value)
    }

    #[inline]
    fn len(&self) -> usize {
        self.ordered.len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = &V> {
        self.ordered.iter()
    }
}

/// The unguarded dictionary state.
#[derive(Debug)]
struct Dictionary<K, V> {
    entries: HashMap<K, MemberSet<V>>,
    order: Vec<K>,
}

impl<K, V> Dictionary<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Eq + Hash,
{
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Gets the existing set for `key` or creates it holding `value`.
    fn add(&mut self, key: K, value: V) -> StorageResult<()> {
        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if occupied.get_mut().insert(value) {
                    Ok(())
                } else {
                    Err(StorageError::DuplicateMember)
                }
            }
            Entry::Vacant(vacant) => {
                self.order.push(vacant.key().clone());
                vacant.insert(MemberSet::with_member(value));
                Ok(())
            }
        }
    }

    fn set(&self, key: &K) -> StorageResult<&MemberSet<V>> {
        self.entries.get(key).ok_or(StorageError::KeyNotFound)
    }

    fn remove(&mut self, key: &K, value: &V) -> StorageResult<()> {
        let set = self
            .entries
            .get_mut(key)
            .ok_or(StorageError::KeyNotFound)?;

        if !set.remove(value) {
            return Err(StorageError::MemberNotFound);
        }

        if set.is_empty() {
            self.delete_key(key);
        }
        Ok(())
    }

    /// Returns `false` if the key did not exist.
    fn delete_key(&mut self, key: &K) -> bool {
        if self.entries.remove(key).is_none() {
            return false;
        }
        // Linear in the number of keys
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        true
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Walks `(key, set)` pairs in key order.
    fn iter(&self) -> impl Iterator<Item = (&K, &MemberSet<V>)> {
        self.order
            .iter()
            .filter_map(move |key| self.entries.get(key).map(|set| (key, set)))
    }
}

/// Point-in-time statistics for a storage engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of keys currently stored
    pub keys: usize,
    /// Number of (key, member) pairs currently stored
    pub members: usize,
    /// Total successful ADD operations
    pub add_ops: u64,
    /// Total successful REMOVE / REMOVEALL / CLEAR operations
    pub remove_ops: u64,
}

/// The in-memory dictionary engine.
///
/// This struct is designed to be wrapped in an `Arc` and handed to the command
/// handler. All operations serialise on one lock, so concurrent callers never
/// observe a key with an empty set.
///
/// # Example
///
/// ```
/// use mvdict::storage::{InMemoryStorage, Storage, StorageError};
///
/// let storage = InMemoryStorage::new();
/// storage.add("fruit".to_string(), "apple".to_string()).unwrap();
/// storage.add("fruit".to_string(), "pear".to_string()).unwrap();
///
/// assert_eq!(
///     storage.members(&"fruit".to_string()).unwrap(),
///     vec!["apple".to_string(), "pear".to_string()]
/// );
/// assert_eq!(
///     storage.add("fruit".to_string(), "apple".to_string()),
///     Err(StorageError::DuplicateMember)
/// );
/// ```
pub struct InMemoryStorage<K, V> {
    inner: RwLock<Dictionary<K, V>>,

    /// Statistics: total successful adds
    add_count: AtomicU64,

    /// Statistics: total successful removals
    remove_count: AtomicU64,
}

impl<K, V> std::fmt::Debug for InMemoryStorage<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dict = self.inner.read();
        f.debug_struct("InMemoryStorage")
            .field("keys", &dict.order.len())
            .field("add_count", &self.add_count.load(Ordering::Relaxed))
            .field("remove_count", &self.remove_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl<K, V> Default for InMemoryStorage<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> InMemoryStorage<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Eq + Hash,
{
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Dictionary::new()),
            add_count: AtomicU64::new(0),
            remove_count: AtomicU64::new(0),
        }
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.inner.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns storage statistics.
    pub fn stats(&self) -> StorageStats {
        let dict = self.inner.read();
        StorageStats {
            keys: dict.order.len(),
            members: dict.entries.values().map(MemberSet::len).sum(),
            add_ops: self.add_count.load(Ordering::Relaxed),
            remove_ops: self.remove_count.load(Ordering::Relaxed),
        }
    }

    #[inline]
    fn record_removal(&self) {
        self.remove_count.fetch_add(1, Ordering::Relaxed);
    }
}

impl<K, V> Storage<K, V> for InMemoryStorage<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Eq + Hash,
{
    fn add(&self, key: K, value: V) -> StorageResult<()> {
        self.inner.write().add(key, value)?;
        self.add_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn keys(&self) -> Vec<K> {
        self.inner.read().order.clone()
    }

    fn members(&self, key: &K) -> StorageResult<Vec<V>> {
        let dict = self.inner.read();
        Ok(dict.set(key)?.iter().cloned().collect())
    }

    fn remove(&self, key: &K, value: &V) -> StorageResult<()> {
        self.inner.write().remove(key, value)?;
        self.record_removal();
        Ok(())
    }

    fn remove_all(&self, key: &K) -> StorageResult<()> {
        if !self.inner.write().delete_key(key) {
            return Err(StorageError::KeyNotFound);
        }
        self.record_removal();
        Ok(())
    }

    fn clear(&self) {
        self.inner.write().clear();
        self.record_removal();
    }

    fn key_exists(&self, key: &K) -> bool {
        self.inner.read().entries.contains_key(key)
    }

    fn member_exists(&self, key: &K, value: &V) -> StorageResult<bool> {
        let dict = self.inner.read();
        Ok(dict.set(key)?.contains(value))
    }

    fn items(&self) -> Vec<(K, V)> {
        let dict = self.inner.read();
        dict.iter()
            .flat_map(|(key, set)| set.iter().map(move |value| (key.clone(), value.clone())))
            .collect()
    }
}
