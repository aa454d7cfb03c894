use thiserror::Error;

#[derive(Error, Debug)]
pub enum CertMgrError {
    #[error("unsupported store {0}")]
    UnsupportedStore(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Certificate parsing error: {0}")]
    CertParsing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CertMgrError>;
