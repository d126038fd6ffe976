//! Block signing

use crate::{PrivateKey, PublicKey, Signature};
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};

/// Signing primitive used for block signatures. Key and signature lengths
/// are fixed by [`crate::KEY_LENGTH`] and [`crate::SIGNATURE_LENGTH`].
pub trait SignatureProvider {
    /// Public key matching a private key
    fn public_key(&self, key: &PrivateKey) -> PublicKey;

    /// Sign a message
    fn sign(&self, key: &PrivateKey, message: &[u8]) -> Signature;

    /// Verify a signature. Malformed keys or signatures verify as `false`.
    fn verify(&self, signature: &Signature, message: &[u8], public_key: &PublicKey) -> bool;
}

/// Ed25519 signatures (32-byte keys, 64-byte signatures)
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Provider;

impl SignatureProvider for Ed25519Provider {
    fn public_key(&self, key: &PrivateKey) -> PublicKey {
        let signing_key = SigningKey::from_bytes(key.as_bytes());
        PublicKey::new(signing_key.verifying_key().to_bytes())
    }

    fn sign(&self, key: &PrivateKey, message: &[u8]) -> Signature {
        let signing_key = SigningKey::from_bytes(key.as_bytes());
        Signature::new(signing_key.sign(message).to_bytes())
    }

    fn verify(&self, signature: &Signature, message: &[u8], public_key: &PublicKey) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(public_key.as_bytes()) else {
            return false;
        };
        let signature = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
        verifying_key.verify(message, &signature).is_ok()
    }
}

/// Generate a random key pair
pub fn generate_keypair() -> (PrivateKey, PublicKey) {
    let key = PrivateKey::new(rand::random());
    let public_key = Ed25519Provider.public_key(&key);
    (key, public_key)
}
