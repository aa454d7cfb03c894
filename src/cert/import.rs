use crate::store::CertStore;
use crate::utils::errors::Result;
use std::fs;
use std::path::Path;

/// Read a PFX file fully into memory and import it into the store.
///
/// I/O failures and import rejections (wrong password, malformed PFX)
/// propagate to the caller verbatim.
pub fn import_pfx_file(store: &mut dyn CertStore, path: &Path, password: &str) -> Result<()> {
    let pfx = fs::read(path)?;
    store.import(&pfx, password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::utils::errors::CertMgrError;
    use std::fs;

    #[test]
    fn test_import_reads_file_into_store() {
        let path = std::env::temp_dir().join("certmgr-import-test.pfx");
        fs::write(&path, b"pfx bytes").unwrap();

        let mut store = MemoryStore::new();
        import_pfx_file(&mut store, &path, "").unwrap();
        assert_eq!(store.certs(), vec![b"pfx bytes".to_vec()]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_import_surfaces_io_error() {
        let mut store = MemoryStore::new();
        let err = import_pfx_file(
            &mut store,
            Path::new("/nonexistent/certmgr-test.pfx"),
            "",
        )
        .unwrap_err();
        assert!(matches!(err, CertMgrError::Io(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_import_surfaces_store_rejection() {
        let path = std::env::temp_dir().join("certmgr-import-reject-test.pfx");
        fs::write(&path, b"pfx bytes").unwrap();

        let mut store = MemoryStore::with_password("secret");
        let err = import_pfx_file(&mut store, &path, "wrong").unwrap_err();
        assert!(matches!(err, CertMgrError::Store(_)));
        assert!(store.is_empty());

        fs::remove_file(&path).unwrap();
    }
}
