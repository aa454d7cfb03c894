pub mod cert;
pub mod cli;
pub mod store;
pub mod utils;

// Re-export specific items to avoid conflicts
pub use cert::{ListEntry, ParsedCert, RemoveOutcome};
pub use cli::{args, commands};
pub use store::{CertStore, Identity, PlatformProvider, StoreLocation, StoreProvider};
pub use utils::errors;
