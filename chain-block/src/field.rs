//! Typed block fields
//!
//! Every block attribute is wrapped in a field that knows its label, its byte
//! encoding and its JSON projection. Consensus and transaction payloads
//! implement [`BlockField`] themselves; the fixed-size attributes use
//! [`Field`].

use crate::{BlockId, ParseError, PublicKey, Signature, Timestamp, KEY_LENGTH, SIGNATURE_LENGTH};
use serde_json::{Map, Value};

/// A block attribute that can render itself as bytes and as JSON.
pub trait BlockField {
    /// Label used for diagnostics and as the JSON key
    fn name(&self) -> &str;

    /// Byte encoding of the value
    fn bytes(&self) -> Vec<u8>;

    /// Structured projection. Objects are merged key by key into the block
    /// projection; any other value is stored under [`BlockField::name`].
    fn json(&self) -> Value;
}

/// Inverse of [`BlockField::bytes`] for the fixed-size field kinds.
pub trait DecodeField: Sized {
    fn decode(name: &'static str, bytes: &[u8]) -> Result<Self, ParseError>;
}

/// Labelled block field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<T> {
    name: &'static str,
    value: T,
}

impl<T> Field<T> {
    pub fn new(name: &'static str, value: T) -> Self {
        Self { name, value }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Generator public key and signature. An unsigned block carries no
/// signature and encodes to the public key alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerData {
    pub generator: PublicKey,
    pub signature: Option<Signature>,
}

impl SignerData {
    pub fn new(generator: PublicKey, signature: Option<Signature>) -> Self {
        Self {
            generator,
            signature,
        }
    }

    /// Signature bytes, empty when unsigned
    pub fn signature_bytes(&self) -> &[u8] {
        match &self.signature {
            Some(signature) => &signature.as_bytes()[..],
            None => &[],
        }
    }
}

fn keyed(name: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(name.to_string(), value);
    Value::Object(map)
}

fn expect_len(name: &'static str, bytes: &[u8], expected: usize) -> Result<(), ParseError> {
    if bytes.len() != expected {
        return Err(ParseError::FieldLength {
            field: name,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

impl BlockField for Field<u8> {
    fn name(&self) -> &str {
        self.name
    }

    fn bytes(&self) -> Vec<u8> {
        vec![self.value]
    }

    fn json(&self) -> Value {
        keyed(self.name, Value::from(self.value))
    }
}

impl DecodeField for Field<u8> {
    fn decode(name: &'static str, bytes: &[u8]) -> Result<Self, ParseError> {
        expect_len(name, bytes, 1)?;
        Ok(Self::new(name, bytes[0]))
    }
}

impl BlockField for Field<Timestamp> {
    fn name(&self) -> &str {
        self.name
    }

    fn bytes(&self) -> Vec<u8> {
        self.value.to_be_bytes().to_vec()
    }

    fn json(&self) -> Value {
        keyed(self.name, Value::from(self.value))
    }
}

impl DecodeField for Field<Timestamp> {
    fn decode(name: &'static str, bytes: &[u8]) -> Result<Self, ParseError> {
        let raw = <[u8; 8]>::try_from(bytes).map_err(|_| ParseError::FieldLength {
            field: name,
            expected: 8,
            actual: bytes.len(),
        })?;
        Ok(Self::new(name, Timestamp::from_be_bytes(raw)))
    }
}

impl BlockField for Field<BlockId> {
    fn name(&self) -> &str {
        self.name
    }

    fn bytes(&self) -> Vec<u8> {
        self.value.as_bytes().to_vec()
    }

    fn json(&self) -> Value {
        keyed(self.name, Value::from(self.value.to_hex()))
    }
}

impl DecodeField for Field<BlockId> {
    fn decode(name: &'static str, bytes: &[u8]) -> Result<Self, ParseError> {
        let id = BlockId::from_slice(bytes).ok_or(ParseError::FieldLength {
            field: name,
            expected: SIGNATURE_LENGTH,
            actual: bytes.len(),
        })?;
        Ok(Self::new(name, id))
    }
}

impl BlockField for Field<SignerData> {
    fn name(&self) -> &str {
        self.name
    }

    fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(KEY_LENGTH + SIGNATURE_LENGTH);
        out.extend_from_slice(self.value.generator.as_bytes());
        out.extend_from_slice(self.value.signature_bytes());
        out
    }

    fn json(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "generator".to_string(),
            Value::from(self.value.generator.to_hex()),
        );
        map.insert(
            "signature".to_string(),
            Value::from(hex::encode(self.value.signature_bytes())),
        );
        Value::Object(map)
    }
}

impl DecodeField for Field<SignerData> {
    /// Accepts a public key alone (unsigned) or a public key followed by a
    /// full signature.
    fn decode(name: &'static str, bytes: &[u8]) -> Result<Self, ParseError> {
        if bytes.len() != KEY_LENGTH && bytes.len() != KEY_LENGTH + SIGNATURE_LENGTH {
            return Err(ParseError::FieldLength {
                field: name,
                expected: KEY_LENGTH + SIGNATURE_LENGTH,
                actual: bytes.len(),
            });
        }

        let (key, signature) = bytes.split_at(KEY_LENGTH);
        let generator = PublicKey::from_slice(key).ok_or(ParseError::FieldLength {
            field: name,
            expected: KEY_LENGTH,
            actual: key.len(),
        })?;
        let signature = if signature.is_empty() {
            None
        } else {
            Signature::from_slice(signature)
        };

        Ok(Self::new(name, SignerData::new(generator, signature)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_byte_field() {
        let field = Field::new("version", 7u8);
        assert_eq!(field.bytes(), vec![7]);
        assert_eq!(field.json(), json!({ "version": 7 }));
        assert_eq!(Field::<u8>::decode("version", &field.bytes()).unwrap(), field);
        assert!(Field::<u8>::decode("version", &[]).is_err());
    }

    #[test]
    fn test_timestamp_field_is_big_endian() {
        let field = Field::new("timestamp", 0x0102_0304_0506_0708i64);
        assert_eq!(field.bytes(), vec![1, 2, 3, 4, 5, 6, 7, 8]);

        let negative = Field::new("timestamp", -2i64);
        let decoded = Field::<Timestamp>::decode("timestamp", &negative.bytes()).unwrap();
        assert_eq!(*decoded.value(), -2);
    }

    #[test]
    fn test_block_id_field() {
        let field = Field::new("reference", BlockId::new([3u8; SIGNATURE_LENGTH]));
        assert_eq!(field.bytes().len(), SIGNATURE_LENGTH);
        assert_eq!(
            field.json(),
            json!({ "reference": hex::encode([3u8; SIGNATURE_LENGTH]) })
        );
        assert_eq!(Field::<BlockId>::decode("reference", &field.bytes()).unwrap(), field);

        match Field::<BlockId>::decode("reference", &[0u8; 10]) {
            Err(ParseError::FieldLength {
                expected, actual, ..
            }) => {
                assert_eq!(expected, SIGNATURE_LENGTH);
                assert_eq!(actual, 10);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_signer_field_signed() {
        let signer = SignerData::new(
            PublicKey::new([1u8; KEY_LENGTH]),
            Some(Signature::new([2u8; SIGNATURE_LENGTH])),
        );
        let field = Field::new("signer", signer);
        let bytes = field.bytes();
        assert_eq!(bytes.len(), KEY_LENGTH + SIGNATURE_LENGTH);
        assert_eq!(&bytes[..KEY_LENGTH], &[1u8; KEY_LENGTH]);
        assert_eq!(Field::<SignerData>::decode("signer", &bytes).unwrap(), field);
    }

    #[test]
    fn test_signer_field_unsigned_encodes_key_only() {
        let field = Field::new("signer", SignerData::new(PublicKey::new([1u8; KEY_LENGTH]), None));
        assert_eq!(field.bytes().len(), KEY_LENGTH);
        assert_eq!(field.json()["signature"], json!(""));
        assert_eq!(Field::<SignerData>::decode("signer", &field.bytes()).unwrap(), field);
        assert!(Field::<SignerData>::decode("signer", &[0u8; KEY_LENGTH + 1]).is_err());
    }
}
