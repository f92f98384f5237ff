//! Client-side page cache for order listings

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::core::order::StatusFilter;
use crate::core::query::OrdersPage;

/// Cache of fetched order pages, keyed by `(status filter, page)`.
///
/// All entries live under the single "orders" namespace, so any mutation
/// invalidates the whole cache and forces a refetch of the viewed page. The
/// cache is an explicit object injected into the client rather than ambient
/// global state.
#[derive(Clone, Default)]
pub struct OrdersCache {
    pages: Arc<RwLock<HashMap<(StatusFilter, i64), OrdersPage>>>,
}

impl OrdersCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached page
    pub fn get(&self, filter: StatusFilter, page: i64) -> Option<OrdersPage> {
        self.pages
            .read()
            .ok()
            .and_then(|pages| pages.get(&(filter, page)).cloned())
    }

    /// Store a fetched page
    pub fn insert(&self, filter: StatusFilter, page: i64, data: OrdersPage) {
        if let Ok(mut pages) = self.pages.write() {
            pages.insert((filter, page), data);
        }
    }

    /// Drop every cached orders entry
    pub fn invalidate_all(&self) {
        if let Ok(mut pages) = self.pages.write() {
            pages.clear();
        }
    }

    /// Whether a page is currently cached
    pub fn contains(&self, filter: StatusFilter, page: i64) -> bool {
        self.pages
            .read()
            .map(|pages| pages.contains_key(&(filter, page)))
            .unwrap_or(false)
    }

    /// Number of cached pages
    pub fn len(&self) -> usize {
        self.pages.read().map(|pages| pages.len()).unwrap_or(0)
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
