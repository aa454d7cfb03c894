use crate::cert::ParsedCert;
use crate::store::CertStore;
use crate::utils::errors::Result;

/// What a removal scan ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The matching identity was deleted.
    Removed,
    /// No identity matched the thumbprint. Not a hard error.
    NotFound,
}

/// Delete the first identity whose SHA-1 fingerprint matches `thumbprint`.
///
/// Matching is case-insensitive. The scan stops at the first match, so at
/// most one identity is deleted per call even when duplicates exist.
/// Certificates that fail to parse are logged and skipped, same as `ls`.
pub fn remove_by_thumbprint(store: &mut dyn CertStore, thumbprint: &str) -> Result<RemoveOutcome> {
    let thumbprint = thumbprint.to_lowercase();

    for identity in store.identities()? {
        let cert = match identity.encoded().and_then(|der| ParsedCert::from_der(&der)) {
            Ok(cert) => cert,
            Err(e) => {
                tracing::warn!("error : {e}");
                continue;
            }
        };

        if cert.fingerprint() == thumbprint {
            identity.delete()?;
            return Ok(RemoveOutcome::Removed);
        }
    }

    Ok(RemoveOutcome::NotFound)
}
