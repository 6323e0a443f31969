//! TLS configuration with a pinned CA root certificate.
//!
//! When `ORDERTAB_CA_CERT` points at a PEM file, the HTTP client trusts
//! only the certificates in that file. This is how a self-hosted order
//! service with a private CA is reached.

use std::path::Path;

use rustls::ClientConfig;

use crate::Result;

/// Builds a [`ClientConfig`] whose root store contains only the CA
/// certificates found in the PEM file at `path`.
///
/// # Errors
///
/// Returns [`OrdertabError::Tls`](crate::OrdertabError::Tls) if the file
/// cannot be read, cannot be parsed, or contains no certificate.
pub fn build_tls_config(path: &Path) -> Result<ClientConfig> {
    let pem = std::fs::read(path)
        .map_err(|e| crate::OrdertabError::Tls(format!("failed to read {}: {e}", path.display())))?;

    let certs: Vec<_> = rustls_pemfile::certs(&mut &pem[..])
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| crate::OrdertabError::Tls(format!("failed to parse CA PEM: {e}")))?;

    if certs.is_empty() {
        return Err(crate::OrdertabError::Tls(format!(
            "no certificate found in {}",
            path.display()
        )));
    }

    let mut root_store = rustls::RootCertStore::empty();
    root_store.add_parsable_certificates(certs);

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_is_tls_error() {
        let err = build_tls_config(Path::new("/nonexistent/ca.pem")).unwrap_err();
        assert!(matches!(err, crate::OrdertabError::Tls(_)));
    }

    #[test]
    fn file_without_certificates_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not a certificate").unwrap();

        let err = build_tls_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("no certificate found"));
    }
}
