//! Shared engine handle
//!
//! An explicitly constructed, cloneable handle for using one engine from
//! several threads in the same process. Every call takes the lock for its
//! whole duration, so operations are serialized exactly as on a bare engine.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::document::{Document, Patch, Query};
use crate::engine::Engine;
use crate::error::Result;

/// Cloneable `Arc<Mutex<Engine>>`
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        let mut engine = self.inner.lock();
        f(&mut engine)
    }

    pub fn insert(&self, collection: &str, document: Document) -> Result<String> {
        self.with(|engine| engine.insert(collection, document))
    }

    pub fn find(&self, collection: &str, query: Option<&Query>) -> Vec<Document> {
        self.with(|engine| engine.find(collection, query))
    }

    pub fn find_one(&self, collection: &str, query: &Query) -> Option<Document> {
        self.with(|engine| engine.find_one(collection, query))
    }

    pub fn update(&self, collection: &str, query: &Query, patch: &Patch) -> Result<usize> {
        self.with(|engine| engine.update(collection, query, patch))
    }

    pub fn delete(&self, collection: &str, query: &Query) -> Result<usize> {
        self.with(|engine| engine.delete(collection, query))
    }

    pub fn count(&self, collection: &str, query: Option<&Query>) -> usize {
        self.with(|engine| engine.count(collection, query))
    }
}
