//! Contact Resolver
//!
//! Reverse phone-number lookup against the contacts provider: display
//! name, a stable lookup locator, and a photo thumbnail locator. A blank
//! number short-circuits to the empty result without touching the store,
//! and a miss is an all-`None` result, never an error.
//!
//! Resolution runs once per conversation per refresh and once per inbound
//! message, so hits are kept in a bounded positive-result cache keyed by
//! the normalized number. Misses are not cached; the store is asked again
//! next time. The owner invalidates the cache on a contacts-changed
//! notification.

use crate::error::Result;
use crate::model::ContactInfo;
use crate::provider::{ContactRow, ContactStore};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Reduce a phone number to its comparable form: digits plus a leading `+`.
pub fn normalize_number(number: &str) -> String {
    let mut out = String::with_capacity(number.len());
    for (i, c) in number.chars().enumerate() {
        if c.is_ascii_digit() || (c == '+' && i == 0) {
            out.push(c);
        }
    }
    out
}

#[derive(Default)]
struct Cache {
    entries: HashMap<String, ContactInfo>,
    order: VecDeque<String>,
}

impl Cache {
    fn get(&self, key: &str) -> Option<ContactInfo> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: String, info: ContactInfo, capacity: usize) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key, info);
            return;
        }
        while self.entries.len() >= capacity {
            match self.order.pop_front() {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                }
                None => break,
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, info);
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Contact lookup with a bounded positive cache.
pub struct ContactResolver {
    store: Arc<dyn ContactStore>,
    cache: Mutex<Cache>,
    capacity: usize,
}

impl ContactResolver {
    /// Default cache capacity; enough for a typical conversation list.
    pub const DEFAULT_CACHE_CAPACITY: usize = 256;

    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self::with_capacity(store, Self::DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(store: Arc<dyn ContactStore>, capacity: usize) -> Self {
        Self {
            store,
            cache: Mutex::new(Cache::default()),
            capacity: capacity.max(1),
        }
    }

    /// Resolve a phone number to contact info.
    pub async fn resolve(&self, phone_number: &str) -> Result<ContactInfo> {
        if phone_number.trim().is_empty() {
            return Ok(ContactInfo::empty());
        }

        let key = normalize_number(phone_number);
        if let Some(hit) = self.cache.lock().await.get(&key) {
            return Ok(hit);
        }

        let info = match self.store.lookup_by_number(phone_number).await? {
            Some(row) => contact_info_from_row(row),
            None => ContactInfo::empty(),
        };

        if info.name.is_some() || info.lookup_uri.is_some() || info.photo_uri.is_some() {
            self.cache.lock().await.put(key, info.clone(), self.capacity);
        }
        Ok(info)
    }

    /// Drop every cached entry. Called on a contacts-changed notification.
    pub async fn invalidate(&self) {
        self.cache.lock().await.clear();
        debug!("Contact cache invalidated");
    }
}

fn contact_info_from_row(row: ContactRow) -> ContactInfo {
    // The lookup locator pairs the durable lookup key with the row id, so
    // it survives contact-database renumbering.
    let lookup_uri = match (&row.lookup_key, row.id) {
        (Some(key), Some(id)) => Some(format!("content://contacts/lookup/{key}/{id}")),
        _ => None,
    };
    ContactInfo {
        name: row.display_name,
        lookup_uri,
        photo_uri: row.photo_thumbnail_uri,
    }
}
