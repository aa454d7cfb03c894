use crate::utils::errors::{CertMgrError, Result};
use sha1::{Digest, Sha1};
use x509_parser::prelude::*;

/// Decoded certificate fields needed for display and matching.
#[derive(Debug, Clone)]
pub struct ParsedCert {
    der: Vec<u8>,
    common_name: String,
}

impl ParsedCert {
    /// Parse a DER-encoded certificate, keeping the raw bytes alongside the
    /// subject common name.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let (_, cert) = X509Certificate::from_der(der)
            .map_err(|e| CertMgrError::CertParsing(format!("DER parsing error: {e}")))?;

        let common_name = cert
            .subject()
            .iter_common_name()
            .next()
            .and_then(|cn| cn.as_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            der: der.to_vec(),
            common_name,
        })
    }

    pub fn common_name(&self) -> &str {
        &self.common_name
    }

    /// Lowercase hex SHA-1 of the raw DER bytes.
    ///
    /// Both `ls` and `rm` go through here, so a thumbprint printed by one
    /// is always matchable by the other.
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha1::digest(&self.der))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::testutil::self_signed_der;

    #[test]
    fn test_parse_extracts_common_name() {
        let der = self_signed_der("test.example.com");
        let cert = ParsedCert::from_der(&der).unwrap();
        assert_eq!(cert.common_name(), "test.example.com");
    }

    #[test]
    fn test_fingerprint_is_sha1_of_der() {
        let der = self_signed_der("fingerprint.example.com");
        let cert = ParsedCert::from_der(&der).unwrap();

        let expected = hex::encode(Sha1::digest(&der));
        assert_eq!(cert.fingerprint(), expected);
        assert_eq!(cert.fingerprint().len(), 40);
        assert_eq!(cert.fingerprint(), cert.fingerprint().to_lowercase());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = ParsedCert::from_der(b"not a certificate").unwrap_err();
        assert!(matches!(err, CertMgrError::CertParsing(_)));
    }
}
