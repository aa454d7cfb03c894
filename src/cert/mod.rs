pub mod import;
pub mod listing;
pub mod parser;
pub mod remove;

pub use import::import_pfx_file;
pub use listing::{collect_entries, ListEntry};
pub use parser::ParsedCert;
pub use remove::{remove_by_thumbprint, RemoveOutcome};
