use crate::cert::ParsedCert;
use crate::store::CertStore;
use crate::utils::errors::Result;

/// One `ls` output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub fingerprint: String,
    pub common_name: String,
}

/// Enumerate a store into display rows, in store order.
///
/// A certificate that fails to parse is logged and skipped; it never
/// aborts the enumeration.
pub fn collect_entries(store: &mut dyn CertStore) -> Result<Vec<ListEntry>> {
    let mut entries = Vec::new();

    for identity in store.identities()? {
        let cert = match identity.encoded().and_then(|der| ParsedCert::from_der(&der)) {
            Ok(cert) => cert,
            Err(e) => {
                tracing::warn!("error : {e}");
                continue;
            }
        };

        entries.push(ListEntry {
            fingerprint: cert.fingerprint(),
            common_name: cert.common_name().to_string(),
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::testutil::self_signed_der;
    use crate::store::memory::MemoryStore;
    use sha1::{Digest, Sha1};

    #[test]
    fn test_collect_entries_in_store_order() {
        let der_a = self_signed_der("a.example.com");
        let der_b = self_signed_der("b.example.com");
        let mut store = MemoryStore::with_certs(vec![der_a.clone(), der_b.clone()]);

        let entries = collect_entries(&mut store).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].common_name, "a.example.com");
        assert_eq!(entries[0].fingerprint, hex::encode(Sha1::digest(&der_a)));
        assert_eq!(entries[1].common_name, "b.example.com");
        assert_eq!(entries[1].fingerprint, hex::encode(Sha1::digest(&der_b)));
    }

    #[test]
    fn test_collect_entries_skips_unparseable() {
        let der = self_signed_der("valid.example.com");
        let mut store =
            MemoryStore::with_certs(vec![b"garbage".to_vec(), der, b"more garbage".to_vec()]);

        let entries = collect_entries(&mut store).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].common_name, "valid.example.com");
    }

    #[test]
    fn test_listing_is_idempotent() {
        let mut store = MemoryStore::with_certs(vec![
            self_signed_der("one.example.com"),
            self_signed_der("two.example.com"),
        ]);

        let first = collect_entries(&mut store).unwrap();
        let second = collect_entries(&mut store).unwrap();
        assert_eq!(first, second);
    }
}
