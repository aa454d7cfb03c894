pub mod memory;
#[cfg(windows)]
pub mod windows;

use crate::utils::errors::{CertMgrError, Result};
use std::fmt;
use std::str::FromStr;

/// Location of a platform certificate store.
///
/// Only the two locations the tool supports are representable; anything
/// else is rejected when the flag is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreLocation {
    /// Per-user store, no elevation required.
    CurrentUser,
    /// System-wide store, requires admin privileges for write operations.
    LocalMachine,
}

impl FromStr for StoreLocation {
    type Err = CertMgrError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "current-user" => Ok(Self::CurrentUser),
            "local-machine" => Ok(Self::LocalMachine),
            other => Err(CertMgrError::UnsupportedStore(other.to_string())),
        }
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentUser => write!(f, "current-user"),
            Self::LocalMachine => write!(f, "local-machine"),
        }
    }
}

/// One certificate-plus-private-key entry inside an open store.
///
/// Handles are only valid for the lifetime of the enumeration that
/// produced them.
pub trait Identity {
    /// Raw DER bytes of the entry's certificate.
    fn encoded(&self) -> Result<Vec<u8>>;

    /// Delete this entry from its store. Consumes the handle.
    fn delete(self: Box<Self>) -> Result<()>;
}

/// An open handle to a named certificate collection.
pub trait CertStore {
    /// Import a PFX blob (certificate + private key) into the store.
    fn import(&mut self, pfx: &[u8], password: &str) -> Result<()>;

    /// Enumerate all identities in the store, in store order.
    fn identities(&mut self) -> Result<Vec<Box<dyn Identity + '_>>>;
}

/// Resolves a (name, location) pair into an open store handle.
///
/// The platform store is injected through this trait so commands can run
/// against an in-memory fake in tests.
pub trait StoreProvider {
    fn open(&self, name: &str, location: StoreLocation) -> Result<Box<dyn CertStore>>;
}

/// Provider backed by the operating system's certificate store.
pub struct PlatformProvider;

impl StoreProvider for PlatformProvider {
    #[cfg(windows)]
    fn open(&self, name: &str, location: StoreLocation) -> Result<Box<dyn CertStore>> {
        Ok(Box::new(windows::WindowsStore::open(name, location)?))
    }

    #[cfg(not(windows))]
    fn open(&self, _name: &str, _location: StoreLocation) -> Result<Box<dyn CertStore>> {
        Err(CertMgrError::Store(
            "certificate store operations require Windows OS".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_location_parse_valid() {
        assert_eq!(
            "current-user".parse::<StoreLocation>().unwrap(),
            StoreLocation::CurrentUser
        );
        assert_eq!(
            "local-machine".parse::<StoreLocation>().unwrap(),
            StoreLocation::LocalMachine
        );
    }

    #[test]
    fn test_store_location_parse_unsupported() {
        let err = "remote".parse::<StoreLocation>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported store remote");

        // Recognized values are exact, not case-folded
        assert!("Current-User".parse::<StoreLocation>().is_err());
    }

    #[test]
    fn test_store_location_display_round_trip() {
        for loc in [StoreLocation::CurrentUser, StoreLocation::LocalMachine] {
            assert_eq!(loc.to_string().parse::<StoreLocation>().unwrap(), loc);
        }
    }
}
