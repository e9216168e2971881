//! PKCS#1 v1.5 signature encoding (EMSA-PKCS1-v1_5, RFC 8017 §9.2).
//!
//! The encoded message is `0x00 0x01 PS 0x00 DigestInfo` where `PS` is a
//! run of `0xFF` bytes filling the message up to the modulus length and
//! `DigestInfo` is the DER structure
//!
//! ```text
//! DigestInfo ::= SEQUENCE {
//!     digestAlgorithm AlgorithmIdentifier,
//!     digest OCTET STRING
//! }
//! ```
//!
//! The DigestInfo is assembled from generic DER primitives so any digest
//! OID can be encoded, with or without the explicit NULL parameters.

use crate::error::{CertError, CertResult};
use const_oid::ObjectIdentifier;
use der::asn1::{AnyRef, OctetStringRef};
use der::{Encode, Sequence};
use x509_cert::spki::AlgorithmIdentifierRef;

/// Fixed bytes around the DigestInfo: `0x00 0x01`, 8 bytes of minimum padding, `0x00`.
pub const MIN_PADDING_OVERHEAD: usize = 11;

/// ASN.1 `DigestInfo` naming a hash algorithm and carrying its output.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct DigestInfo<'a> {
    /// Hash algorithm identifier.
    pub digest_algorithm: AlgorithmIdentifierRef<'a>,
    /// Raw digest bytes.
    pub digest: OctetStringRef<'a>,
}

impl<'a> DigestInfo<'a> {
    /// Builds a DigestInfo for `digest` produced by the algorithm `oid`.
    ///
    /// With `with_hash_params` the algorithm identifier carries an explicit
    /// NULL parameter, which is the form most verifiers expect.
    pub fn new(oid: ObjectIdentifier, digest: &'a [u8], with_hash_params: bool) -> CertResult<Self> {
        Ok(Self {
            digest_algorithm: AlgorithmIdentifierRef {
                oid,
                parameters: with_hash_params.then_some(AnyRef::NULL),
            },
            digest: OctetStringRef::new(digest)?,
        })
    }
}

/// Encodes `digest` into a PKCS#1 v1.5 message of exactly `em_len` bytes.
///
/// # Errors
///
/// Returns [`CertError::EncodingTooShort`] when `em_len` is smaller than the
/// DER DigestInfo plus [`MIN_PADDING_OVERHEAD`].
pub fn pkcs1v15_encode(
    digest_alg: ObjectIdentifier,
    digest: &[u8],
    em_len: usize,
    with_hash_params: bool,
) -> CertResult<Vec<u8>> {
    let digest_info = DigestInfo::new(digest_alg, digest, with_hash_params)?.to_der()?;

    let required = digest_info.len() + MIN_PADDING_OVERHEAD;
    if em_len < required {
        return Err(CertError::EncodingTooShort { em_len, required });
    }

    let mut em = Vec::with_capacity(em_len);
    em.extend_from_slice(&[0x00, 0x01]);
    em.resize(em_len - digest_info.len() - 1, 0xFF);
    em.push(0x00);
    em.extend_from_slice(&digest_info);

    debug_assert_eq!(em.len(), em_len);
    Ok(em)
}

#[cfg(test)]
mod tests {
    use super::*;
    use const_oid::db::rfc5912::{ID_SHA_1, ID_SHA_256};

    const SHA256_PREFIX: [u8; 19] = [
        0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01,
        0x05, 0x00, 0x04, 0x20,
    ];

    #[test]
    fn sha256_digest_info_matches_rfc_prefix() {
        let digest = [0xabu8; 32];
        let der = DigestInfo::new(ID_SHA_256, &digest, true).unwrap().to_der().unwrap();
        assert_eq!(&der[..19], &SHA256_PREFIX);
        assert_eq!(&der[19..], &digest);
    }

    #[test]
    fn sha256_without_params_omits_null() {
        let digest = [0u8; 32];
        let der = DigestInfo::new(ID_SHA_256, &digest, false).unwrap().to_der().unwrap();
        assert_eq!(&der[..4], &[0x30, 0x2f, 0x30, 0x0b]);
        assert_eq!(der.len(), 49);
    }

    #[test]
    fn sha1_digest_info_length() {
        let digest = [1u8; 20];
        let der = DigestInfo::new(ID_SHA_1, &digest, true).unwrap().to_der().unwrap();
        assert_eq!(der.len(), 35);
    }

    #[test]
    fn minimum_length_is_accepted() {
        let digest = [7u8; 32];
        let em = pkcs1v15_encode(ID_SHA_256, &digest, 51 + 11, true).unwrap();
        assert_eq!(em.len(), 62);
        assert_eq!(&em[2..10], &[0xFF; 8]);
        assert_eq!(em[10], 0x00);
    }

    #[test]
    fn one_byte_short_is_rejected() {
        let digest = [7u8; 32];
        let err = pkcs1v15_encode(ID_SHA_256, &digest, 61, true).unwrap_err();
        assert!(matches!(
            err,
            CertError::EncodingTooShort { em_len: 61, required: 62 }
        ));
    }
}
