//! Basic block types

use std::fmt;

/// Length in bytes of a block signature, and therefore of a block id
pub const SIGNATURE_LENGTH: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// Length in bytes of a generator public key
pub const KEY_LENGTH: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;

/// Length in bytes of a private key seed
pub const PRIVATE_KEY_LENGTH: usize = ed25519_dalek::SECRET_KEY_LENGTH;

/// Timestamp in milliseconds since Unix epoch
pub type Timestamp = i64;

/// Fee amount in the smallest currency unit
pub type Amount = u64;

/// Fixed-length byte newtypes used on the wire.
macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Create from a byte array
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Create from a slice, `None` if the length is wrong
            pub fn from_slice(slice: &[u8]) -> Option<Self> {
                <[u8; $len]>::try_from(slice).ok().map(Self)
            }

            /// All bytes zero
            pub const fn zero() -> Self {
                Self([0u8; $len])
            }

            /// Check whether all bytes are zero
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }

            /// Get the underlying byte array
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Convert to hex string
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            /// Create from hex string
            pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
                let bytes = hex::decode(hex)?;
                Self::from_slice(&bytes).ok_or(hex::FromHexError::InvalidStringLength)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", self.to_hex())
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

fixed_bytes!(
    /// Block identifier. A block is identified by its signature, so ids and
    /// references share the signature length.
    BlockId,
    SIGNATURE_LENGTH
);

fixed_bytes!(
    /// Generator signature over the unsigned block encoding
    Signature,
    SIGNATURE_LENGTH
);

fixed_bytes!(
    /// Generator public key
    PublicKey,
    KEY_LENGTH
);

impl From<Signature> for BlockId {
    fn from(signature: Signature) -> Self {
        Self(signature.0)
    }
}

/// Private key seed. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey([u8; PRIVATE_KEY_LENGTH]);

impl PrivateKey {
    /// Create from seed bytes
    pub fn new(seed: [u8; PRIVATE_KEY_LENGTH]) -> Self {
        Self(seed)
    }

    /// Get the seed bytes
    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths() {
        assert_eq!(SIGNATURE_LENGTH, 64);
        assert_eq!(KEY_LENGTH, 32);
        assert_eq!(BlockId::zero().as_bytes().len(), SIGNATURE_LENGTH);
        assert_eq!(PublicKey::zero().as_bytes().len(), KEY_LENGTH);
    }

    #[test]
    fn test_from_slice_checks_length() {
        assert!(PublicKey::from_slice(&[1u8; KEY_LENGTH]).is_some());
        assert!(PublicKey::from_slice(&[1u8; KEY_LENGTH - 1]).is_none());
        assert!(Signature::from_slice(&[1u8; SIGNATURE_LENGTH + 1]).is_none());
    }

    #[test]
    fn test_hex_round_trip() {
        let id = BlockId::new([0xab; SIGNATURE_LENGTH]);
        let hex = id.to_hex();
        assert_eq!(hex.len(), SIGNATURE_LENGTH * 2);
        assert_eq!(BlockId::from_hex(&hex).unwrap(), id);
        assert!(BlockId::from_hex("abcd").is_err());
    }

    #[test]
    fn test_zero() {
        assert!(Signature::zero().is_zero());
        assert!(!Signature::new([1u8; SIGNATURE_LENGTH]).is_zero());
        assert_eq!(PublicKey::default(), PublicKey::zero());
    }

    #[test]
    fn test_signature_becomes_id() {
        let signature = Signature::new([7u8; SIGNATURE_LENGTH]);
        let id = BlockId::from(signature);
        assert_eq!(id.as_bytes(), signature.as_bytes());
    }

    #[test]
    fn test_private_key_debug_is_redacted() {
        let key = PrivateKey::new([9u8; PRIVATE_KEY_LENGTH]);
        assert_eq!(format!("{:?}", key), "PrivateKey(..)");
    }
}
