//! threshold signature verification for channel closure
//!
//! partial-signature aggregation happens off-protocol. the core only checks
//! the final aggregated signature: it recovers a signer from the signature,
//! derives its identity, and compares against the identity registered at
//! channel open. identity derivation is a pure function of the group key, so
//! any verifier reproduces the same signer id.

pub mod error;

pub use error::{Result, ThresholdError};

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::{EncodedPoint, FieldBytes};
use scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

const SIGNER_DOMAIN: &[u8] = b"threshold-sig:signer:v1";

/// group public key registered at channel open, as affine coordinates
#[derive(Clone, Copy, Debug, Encode, Decode, TypeInfo, PartialEq, Eq)]
pub struct GroupPublicKey {
    pub x: [u8; 32],
    pub y: [u8; 32],
}

impl GroupPublicKey {
    pub fn new(x: [u8; 32], y: [u8; 32]) -> Self {
        Self { x, y }
    }

    /// parse from a sec1 uncompressed point (0x04 tag + x + y)
    pub fn from_uncompressed(bytes: &[u8; 65]) -> Result<Self> {
        if bytes[0] != 0x04 {
            return Err(ThresholdError::InvalidGroupKey);
        }
        let mut x = [0u8; 32];
        let mut y = [0u8; 32];
        x.copy_from_slice(&bytes[1..33]);
        y.copy_from_slice(&bytes[33..65]);
        Ok(Self { x, y })
    }
}

/// identity a signature must resolve to
#[derive(Clone, Copy, Debug, Encode, Decode, TypeInfo, PartialEq, Eq, Default, Hash)]
pub struct SignerId(pub [u8; 32]);

/// final aggregated signature: 64 signature bytes plus a recovery id
#[derive(Clone, Copy, Debug, Encode, Decode, TypeInfo, PartialEq, Eq)]
pub struct ThresholdSignature(pub [u8; 65]);

impl Default for ThresholdSignature {
    fn default() -> Self {
        Self([0u8; 65])
    }
}

impl ThresholdSignature {
    pub fn from_raw(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }

    pub fn from_parts(signature: &Signature, recovery: RecoveryId) -> Self {
        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(&signature.to_bytes());
        bytes[64] = recovery.to_byte();
        Self(bytes)
    }
}

fn signer_id_of(key: &VerifyingKey) -> SignerId {
    let point = key.to_encoded_point(false);
    let mut hasher = blake3::Hasher::new();
    hasher.update(SIGNER_DOMAIN);
    // drop the sec1 tag byte, hash the raw coordinates
    hasher.update(&point.as_bytes()[1..]);
    SignerId(*hasher.finalize().as_bytes())
}

/// derive the signer identity for a group public key
///
/// computed once at channel open and stored on the channel record.
pub fn derive_signer(key: &GroupPublicKey) -> Result<SignerId> {
    let point = EncodedPoint::from_affine_coordinates(
        &FieldBytes::from(key.x),
        &FieldBytes::from(key.y),
        false,
    );
    let verifying_key =
        VerifyingKey::from_encoded_point(&point).map_err(|_| ThresholdError::InvalidGroupKey)?;
    Ok(signer_id_of(&verifying_key))
}

/// recover the signer identity from an aggregated signature over `digest`
pub fn recover_signer(digest: &[u8; 32], signature: &ThresholdSignature) -> Result<SignerId> {
    let recovery = RecoveryId::try_from(signature.0[64])
        .map_err(|_| ThresholdError::MalformedSignature)?;
    let parsed = Signature::from_slice(&signature.0[..64])
        .map_err(|_| ThresholdError::MalformedSignature)?;
    let verifying_key = VerifyingKey::recover_from_prehash(digest, &parsed, recovery)
        .map_err(|_| ThresholdError::RecoveryFailed)?;
    Ok(signer_id_of(&verifying_key))
}

/// check an aggregated signature against the registered signer identity
pub fn verify(digest: &[u8; 32], signature: &ThresholdSignature, expected: &SignerId) -> Result<()> {
    let recovered = recover_signer(digest, signature)?;
    if recovered != *expected {
        return Err(ThresholdError::SignerMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::SigningKey;

    fn mock_group_key(signing_key: &SigningKey) -> GroupPublicKey {
        let point = signing_key.verifying_key().to_encoded_point(false);
        let bytes: [u8; 65] = point.as_bytes().try_into().unwrap();
        GroupPublicKey::from_uncompressed(&bytes).unwrap()
    }

    fn mock_signature(signing_key: &SigningKey, digest: &[u8; 32]) -> ThresholdSignature {
        let (signature, recovery) = signing_key.sign_prehash_recoverable(digest).unwrap();
        ThresholdSignature::from_parts(&signature, recovery)
    }

    #[test]
    fn test_derive_matches_recover() {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let group_key = mock_group_key(&signing_key);
        let signer = derive_signer(&group_key).unwrap();

        let digest = *blake3::hash(b"closure commitment").as_bytes();
        let signature = mock_signature(&signing_key, &digest);

        assert_eq!(recover_signer(&digest, &signature).unwrap(), signer);
        assert!(verify(&digest, &signature, &signer).is_ok());
    }

    #[test]
    fn test_wrong_key_mismatches() {
        let honest = SigningKey::random(&mut rand::thread_rng());
        let rogue = SigningKey::random(&mut rand::thread_rng());
        let signer = derive_signer(&mock_group_key(&honest)).unwrap();

        let digest = *blake3::hash(b"closure commitment").as_bytes();
        let signature = mock_signature(&rogue, &digest);

        assert_eq!(
            verify(&digest, &signature, &signer).unwrap_err(),
            ThresholdError::SignerMismatch
        );
    }

    #[test]
    fn test_wrong_digest_mismatches() {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let signer = derive_signer(&mock_group_key(&signing_key)).unwrap();

        let digest = *blake3::hash(b"signed message").as_bytes();
        let other = *blake3::hash(b"different message").as_bytes();
        let signature = mock_signature(&signing_key, &digest);

        // recovery over the wrong digest yields some other key, never the signer
        assert!(verify(&other, &signature, &signer).is_err());
    }

    #[test]
    fn test_malformed_signature_rejected() {
        let digest = [1u8; 32];
        let mut bytes = [0u8; 65];
        bytes[64] = 9; // recovery id out of range
        assert_eq!(
            recover_signer(&digest, &ThresholdSignature::from_raw(bytes)).unwrap_err(),
            ThresholdError::MalformedSignature
        );
    }

    #[test]
    fn test_invalid_group_key_rejected() {
        let key = GroupPublicKey::new([1u8; 32], [2u8; 32]);
        assert_eq!(derive_signer(&key).unwrap_err(), ThresholdError::InvalidGroupKey);
    }

    #[test]
    fn test_uncompressed_requires_sec1_tag() {
        let bytes = [0u8; 65];
        assert_eq!(
            GroupPublicKey::from_uncompressed(&bytes).unwrap_err(),
            ThresholdError::InvalidGroupKey
        );
    }
}
