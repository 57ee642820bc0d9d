// src/sct.rs
//! Signed Certificate Timestamp serialization and signature verification
//! per RFC 6962. Only ECDSA P-256 with SHA-256 is supported; that is what
//! every production CT log signs with.

use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, VerifyingKey};
use thiserror::Error;

// RFC 6962 constants for the signed data structure
const SIGNATURE_TYPE_CERTIFICATE_TIMESTAMP: u8 = 0;
const LOG_ENTRY_TYPE_X509_ENTRY: [u8; 2] = [0, 0];

// DigitallySigned algorithm bytes: SHA-256 hash, ECDSA signature
const HASH_ALGO_SHA256: u8 = 4;
const SIG_ALGO_ECDSA: u8 = 3;

#[derive(Error, Debug)]
pub enum SctError {
    #[error("input too large for CT length prefix: {0} bytes")]
    InputTooLarge(usize),

    #[error("SCT signature is truncated")]
    SignatureTruncated,

    #[error("unsupported SCT signature algorithm: hash={0} signature={1}")]
    UnsupportedSignatureAlgorithm(u8, u8),

    #[error("SCT signature is not a DER ECDSA-Sig-Value")]
    MalformedDsa,

    #[error("SCT signature verification failed")]
    SignatureInvalid,
}

/// A Signed Certificate Timestamp as submitted to the Storage Authority.
///
/// `log_id` is the base64 of the SHA-256 hash over the log's public key
/// (DER SubjectPublicKeyInfo). `timestamp` is milliseconds since the Unix
/// epoch. `signature` holds the full DigitallySigned blob as returned by
/// the log, including the 4-byte algorithm/length prefix.
#[derive(Debug, Clone)]
pub struct SignedCertificateTimestamp {
    pub version: u8,
    pub log_id: String,
    pub timestamp: u64,
    pub extensions: Vec<u8>,
    pub signature: Vec<u8>,
    /// Serial (lowercase hex) of the certificate this SCT covers.
    pub certificate_serial: String,
}

impl SignedCertificateTimestamp {
    /// Builds the byte sequence the log signed over for an `x509_entry`
    /// certificate-timestamp, per RFC 6962 section 3.2:
    ///
    /// ```text
    /// version          u8
    /// signature_type   u8   (0 = certificate_timestamp)
    /// timestamp        u64  big-endian
    /// entry_type       u16  (0 = x509_entry)
    /// cert_length      u24
    /// cert             cert_length bytes
    /// extensions_len   u16
    /// extensions       extensions_len bytes
    /// ```
    ///
    /// The certificate length field is three bytes; anything at or above
    /// 2^24 cannot be represented and is rejected, as are extensions at or
    /// above 2^16.
    pub fn signed_input(&self, leaf_der: &[u8]) -> Result<Vec<u8>, SctError> {
        let cert_len = leaf_der.len();
        if cert_len >= 1 << 24 {
            return Err(SctError::InputTooLarge(cert_len));
        }
        let ext_len = self.extensions.len();
        if ext_len >= 1 << 16 {
            return Err(SctError::InputTooLarge(ext_len));
        }

        let cert_len_bytes = [
            (cert_len >> 16) as u8,
            (cert_len >> 8) as u8,
            cert_len as u8,
        ];
        let ext_len_bytes = [(ext_len >> 8) as u8, ext_len as u8];

        let mut data = Vec::with_capacity(2 + 8 + 2 + 3 + cert_len + 2 + ext_len);
        data.push(self.version);
        data.push(SIGNATURE_TYPE_CERTIFICATE_TIMESTAMP);
        data.extend_from_slice(&self.timestamp.to_be_bytes());
        data.extend_from_slice(&LOG_ENTRY_TYPE_X509_ENTRY);
        data.extend_from_slice(&cert_len_bytes);
        data.extend_from_slice(leaf_der);
        data.extend_from_slice(&ext_len_bytes);
        data.extend_from_slice(&self.extensions);
        Ok(data)
    }

    /// Verifies this SCT's signature over `leaf_der` under the log's key.
    ///
    /// The signature field must carry the DigitallySigned envelope
    /// `{4, 3, len_hi, len_lo}` followed by exactly `len` bytes of DER
    /// `ECDSA-Sig-Value{r, s}`.
    pub fn verify_signature(
        &self,
        leaf_der: &[u8],
        key: &VerifyingKey,
    ) -> Result<(), SctError> {
        let der = parse_signature_envelope(&self.signature)?;
        let signature = Signature::from_der(der).map_err(|_| SctError::MalformedDsa)?;
        let signed = self.signed_input(leaf_der)?;
        key.verify(&signed, &signature)
            .map_err(|_| SctError::SignatureInvalid)
    }
}

/// Splits the DigitallySigned envelope off an SCT signature blob and
/// returns the inner DER signature bytes. Every length is checked before
/// the corresponding read; generic ASN.1 decoding never sees a truncated
/// envelope.
fn parse_signature_envelope(signature: &[u8]) -> Result<&[u8], SctError> {
    if signature.len() < 4 {
        return Err(SctError::SignatureTruncated);
    }
    if signature[0] != HASH_ALGO_SHA256 || signature[1] != SIG_ALGO_ECDSA {
        return Err(SctError::UnsupportedSignatureAlgorithm(
            signature[0],
            signature[1],
        ));
    }
    let declared = u16::from_be_bytes([signature[2], signature[3]]) as usize;
    let inner = &signature[4..];
    if declared > inner.len() {
        return Err(SctError::SignatureTruncated);
    }
    // Trailing bytes past the declared length are not a valid envelope
    if declared < inner.len() {
        return Err(SctError::MalformedDsa);
    }
    Ok(inner)
}
