//! Cart persistence
//!
//! The cart survives page reloads through a small key-value store.
//! `RedbCartStore` is the durable implementation; `MemoryCartStore`
//! backs tests and contexts without a writable work directory.

use crate::cart::{Cart, CartKey};
use crate::error::CartResult;
use redb::{Database, ReadableDatabase, TableDefinition};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

const CARTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("carts");

/// Key-value persistence for cart state, scoped by [`CartKey`]
pub trait CartStore: Send + Sync {
    fn load(&self, key: &CartKey) -> CartResult<Option<Cart>>;
    fn save(&self, key: &CartKey, cart: &Cart) -> CartResult<()>;
    fn remove(&self, key: &CartKey) -> CartResult<()>;
}

/// Durable cart store backed by redb
pub struct RedbCartStore {
    db: Database,
}

impl RedbCartStore {
    /// Open (or create) the cart database at the given path
    pub fn open(path: impl AsRef<Path>) -> CartResult<Self> {
        let db = Database::create(path)?;
        // Ensure the table exists so first reads do not fail
        let txn = db.begin_write()?;
        txn.open_table(CARTS_TABLE)?;
        txn.commit()?;
        Ok(Self { db })
    }
}

impl CartStore for RedbCartStore {
    fn load(&self, key: &CartKey) -> CartResult<Option<Cart>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(CARTS_TABLE)?;
        let storage_key = key.storage_key();
        match table.get(storage_key.as_str())? {
            Some(bytes) => {
                let cart = serde_json::from_slice(bytes.value())?;
                Ok(Some(cart))
            }
            None => Ok(None),
        }
    }

    fn save(&self, key: &CartKey, cart: &Cart) -> CartResult<()> {
        let bytes = serde_json::to_vec(cart)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CARTS_TABLE)?;
            table.insert(key.storage_key().as_str(), bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &CartKey) -> CartResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CARTS_TABLE)?;
            table.remove(key.storage_key().as_str())?;
        }
        txn.commit()?;
        Ok(())
    }
}

/// In-memory cart store for tests
#[derive(Default)]
pub struct MemoryCartStore {
    carts: Mutex<HashMap<String, Cart>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self, key: &CartKey) -> CartResult<Option<Cart>> {
        let carts = self.carts.lock().expect("cart store poisoned");
        Ok(carts.get(&key.storage_key()).cloned())
    }

    fn save(&self, key: &CartKey, cart: &Cart) -> CartResult<()> {
        let mut carts = self.carts.lock().expect("cart store poisoned");
        carts.insert(key.storage_key(), cart.clone());
        Ok(())
    }

    fn remove(&self, key: &CartKey) -> CartResult<()> {
        let mut carts = self.carts.lock().expect("cart store poisoned");
        carts.remove(&key.storage_key());
        Ok(())
    }
}
