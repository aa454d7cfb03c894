//! Windows certificate store backend.
//!
//! Wraps the CryptoAPI system-store functions: stores are opened with
//! `CertOpenStore`, PFX blobs go through `PFXImportCertStore` into a
//! temporary store and are then copied into the target store, and
//! enumeration hands out duplicated `CERT_CONTEXT`s so each identity can
//! be deleted independently.

use crate::store::{CertStore, Identity, StoreLocation};
use crate::utils::errors::{CertMgrError, Result};
use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;

use windows::core::PCWSTR;
use windows::Win32::Foundation::GetLastError;
use windows::Win32::Security::Cryptography::{
    CertAddCertificateContextToStore, CertCloseStore, CertDeleteCertificateFromStore,
    CertDuplicateCertificateContext, CertEnumCertificatesInStore, CertFreeCertificateContext,
    CertOpenStore, CERT_CONTEXT, CERT_OPEN_STORE_FLAGS, CERT_QUERY_ENCODING_TYPE,
    CERT_STORE_ADD_REPLACE_EXISTING, CERT_STORE_PROV_SYSTEM_W, CERT_SYSTEM_STORE_CURRENT_USER,
    CERT_SYSTEM_STORE_LOCAL_MACHINE, CRYPT_EXPORTABLE, CRYPT_INTEGER_BLOB, CRYPT_MACHINE_KEYSET,
    CRYPT_USER_KEYSET, HCERTSTORE, PFXImportCertStore,
};

impl StoreLocation {
    fn to_flags(self) -> u32 {
        match self {
            Self::CurrentUser => CERT_SYSTEM_STORE_CURRENT_USER,
            Self::LocalMachine => CERT_SYSTEM_STORE_LOCAL_MACHINE,
        }
    }
}

fn to_wide(s: &str) -> Vec<u16> {
    OsStr::new(s).encode_wide().chain(std::iter::once(0)).collect()
}

fn last_error(what: &str) -> CertMgrError {
    let code = unsafe { GetLastError() };
    CertMgrError::Store(format!("{what}: Windows error 0x{:08X}", code.0))
}

/// Handle to an open system certificate store. Closed on drop.
pub struct WindowsStore {
    handle: HCERTSTORE,
    location: StoreLocation,
}

impl WindowsStore {
    pub fn open(name: &str, location: StoreLocation) -> Result<Self> {
        let wide_name = to_wide(name);

        let handle = unsafe {
            CertOpenStore(
                CERT_STORE_PROV_SYSTEM_W,
                CERT_QUERY_ENCODING_TYPE(0),
                None,
                CERT_OPEN_STORE_FLAGS(location.to_flags()),
                Some(wide_name.as_ptr() as *const _),
            )
        };

        match handle {
            Ok(h) if !h.is_invalid() => Ok(Self {
                handle: h,
                location,
            }),
            _ => Err(last_error(&format!(
                "failed to open certificate store {location}\\{name}"
            ))),
        }
    }
}

impl CertStore for WindowsStore {
    fn import(&mut self, pfx: &[u8], password: &str) -> Result<()> {
        let blob = CRYPT_INTEGER_BLOB {
            cbData: pfx.len() as u32,
            pbData: pfx.as_ptr() as *mut _,
        };
        let wide_password = to_wide(password);

        // Private keys land in the keyset matching the target store location.
        let keyset = match self.location {
            StoreLocation::CurrentUser => CRYPT_USER_KEYSET,
            StoreLocation::LocalMachine => CRYPT_MACHINE_KEYSET,
        };

        let pfx_store = unsafe {
            PFXImportCertStore(
                &blob,
                PCWSTR(wide_password.as_ptr()),
                CRYPT_EXPORTABLE | keyset,
            )
        };

        let pfx_store = match pfx_store {
            Ok(h) if !h.is_invalid() => h,
            _ => return Err(last_error("failed to import PFX")),
        };

        // Copy every certificate from the PFX's temporary store into ours.
        let mut result = Ok(());
        let mut context: *const CERT_CONTEXT = std::ptr::null();
        loop {
            context = unsafe { CertEnumCertificatesInStore(pfx_store, Some(context)) };
            if context.is_null() {
                break;
            }

            let added = unsafe {
                CertAddCertificateContextToStore(
                    self.handle,
                    context,
                    CERT_STORE_ADD_REPLACE_EXISTING,
                    None,
                )
            };
            if added.is_err() {
                result = Err(last_error("failed to add certificate to store"));
                break;
            }
        }

        unsafe {
            let _ = CertCloseStore(pfx_store, 0);
        }

        result
    }

    fn identities(&mut self) -> Result<Vec<Box<dyn Identity + '_>>> {
        let mut identities: Vec<Box<dyn Identity>> = Vec::new();
        let mut context: *const CERT_CONTEXT = std::ptr::null();

        loop {
            context = unsafe { CertEnumCertificatesInStore(self.handle, Some(context)) };
            if context.is_null() {
                break;
            }

            // The enumerator frees the previous context on each step, so
            // every identity holds its own duplicate.
            let duplicate = unsafe { CertDuplicateCertificateContext(Some(context)) };
            if duplicate.is_null() {
                return Err(last_error("failed to duplicate certificate context"));
            }
            identities.push(Box::new(WindowsIdentity {
                context: Some(duplicate as *const CERT_CONTEXT),
            }));
        }

        Ok(identities)
    }
}

impl Drop for WindowsStore {
    fn drop(&mut self) {
        unsafe {
            let _ = CertCloseStore(self.handle, 0);
        }
    }
}

struct WindowsIdentity {
    context: Option<*const CERT_CONTEXT>,
}

impl Identity for WindowsIdentity {
    fn encoded(&self) -> Result<Vec<u8>> {
        let context = self.context.ok_or_else(|| {
            CertMgrError::Store("certificate context already released".to_string())
        })?;
        let der = unsafe {
            let ctx = &*context;
            std::slice::from_raw_parts(ctx.pbCertEncoded, ctx.cbCertEncoded as usize).to_vec()
        };
        Ok(der)
    }

    fn delete(mut self: Box<Self>) -> Result<()> {
        let context = self.context.take().ok_or_else(|| {
            CertMgrError::Store("certificate context already released".to_string())
        })?;

        // Deleting frees the context on success or failure.
        let result = unsafe { CertDeleteCertificateFromStore(context) };
        if result.is_err() {
            return Err(last_error("failed to delete certificate from store"));
        }
        Ok(())
    }
}

impl Drop for WindowsIdentity {
    fn drop(&mut self) {
        if let Some(context) = self.context.take() {
            unsafe {
                let _ = CertFreeCertificateContext(Some(context));
            }
        }
    }
}
