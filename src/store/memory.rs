//! In-memory stand-in for the platform certificate store.
//!
//! The fake treats an imported blob as the raw DER certificate itself and
//! checks the password against a configured value. It keeps just enough
//! behavior to exercise the command paths without a Windows host.

use crate::store::{CertStore, Identity, StoreLocation, StoreProvider};
use crate::utils::errors::{CertMgrError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

type Entries = Rc<RefCell<Vec<Vec<u8>>>>;

pub struct MemoryStore {
    entries: Entries,
    required_password: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(Vec::new())),
            required_password: None,
        }
    }

    pub fn with_password(password: &str) -> Self {
        Self {
            required_password: Some(password.to_string()),
            ..Self::new()
        }
    }

    /// Seed the store with pre-existing certificates.
    pub fn with_certs(certs: Vec<Vec<u8>>) -> Self {
        Self {
            entries: Rc::new(RefCell::new(certs)),
            required_password: None,
        }
    }

    pub fn certs(&self) -> Vec<Vec<u8>> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn shared(entries: Entries, required_password: Option<String>) -> Self {
        Self {
            entries,
            required_password,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CertStore for MemoryStore {
    fn import(&mut self, pfx: &[u8], password: &str) -> Result<()> {
        if let Some(required) = &self.required_password {
            if required != password {
                return Err(CertMgrError::Store(
                    "the specified password is not correct".to_string(),
                ));
            }
        }
        self.entries.borrow_mut().push(pfx.to_vec());
        Ok(())
    }

    fn identities(&mut self) -> Result<Vec<Box<dyn Identity + '_>>> {
        let identities: Vec<Box<dyn Identity>> = self
            .entries
            .borrow()
            .iter()
            .map(|der| {
                Box::new(MemoryIdentity {
                    entries: Rc::clone(&self.entries),
                    der: der.clone(),
                }) as Box<dyn Identity>
            })
            .collect();
        Ok(identities)
    }
}

struct MemoryIdentity {
    entries: Entries,
    der: Vec<u8>,
}

impl Identity for MemoryIdentity {
    fn encoded(&self) -> Result<Vec<u8>> {
        Ok(self.der.clone())
    }

    fn delete(self: Box<Self>) -> Result<()> {
        let mut entries = self.entries.borrow_mut();
        match entries.iter().position(|e| *e == self.der) {
            Some(idx) => {
                entries.remove(idx);
                Ok(())
            }
            None => Err(CertMgrError::Store(
                "certificate no longer present in store".to_string(),
            )),
        }
    }
}

/// Provider handing out [`MemoryStore`] handles that share contents per
/// (name, location) pair, so repeated opens within a run see the same store.
pub struct MemoryProvider {
    stores: RefCell<HashMap<String, Entries>>,
    required_password: Option<String>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self {
            stores: RefCell::new(HashMap::new()),
            required_password: None,
        }
    }

    pub fn with_password(password: &str) -> Self {
        Self {
            required_password: Some(password.to_string()),
            ..Self::new()
        }
    }

    /// Snapshot of the certificates currently held in a store.
    pub fn certs(&self, name: &str, location: StoreLocation) -> Vec<Vec<u8>> {
        self.stores
            .borrow()
            .get(&store_key(name, location))
            .map(|entries| entries.borrow().clone())
            .unwrap_or_default()
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreProvider for MemoryProvider {
    fn open(&self, name: &str, location: StoreLocation) -> Result<Box<dyn CertStore>> {
        let entries = Rc::clone(
            self.stores
                .borrow_mut()
                .entry(store_key(name, location))
                .or_default(),
        );
        Ok(Box::new(MemoryStore::shared(
            entries,
            self.required_password.clone(),
        )))
    }
}

fn store_key(name: &str, location: StoreLocation) -> String {
    format!("{location}/{name}")
}
