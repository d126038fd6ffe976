//! Block data structure and operations

use crate::field::{DecodeField, Field, SignerData};
use crate::layout::{Decoder, Encoder, LENGTH_PREFIX};
use crate::{
    Amount, BlockField, BlockId, ConsensusModule, CoreResult, GenesisConfig, ParseError,
    PrivateKey, PublicKey, Signature, SignatureProvider, Timestamp, TransactionModule,
    KEY_LENGTH, SIGNATURE_LENGTH,
};
use serde_json::{Map, Value};
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// Current block format version
pub const BLOCK_VERSION: u8 = 1;

const VERSION: &str = "version";
const TIMESTAMP: &str = "timestamp";
const REFERENCE: &str = "reference";
const CONSENSUS_DATA: &str = "consensus data";
const TRANSACTION_DATA: &str = "transaction data";
const SIGNER: &str = "signature";

/// Immutable block.
///
/// `CD` is the consensus payload and `TD` the transaction payload; both are
/// encoded opaquely by their own modules. The wire encoding is computed once
/// at construction. Blocks are identified, compared and hashed by their
/// signature alone.
#[derive(Debug, Clone)]
pub struct Block<CD, TD> {
    version: Field<u8>,
    timestamp: Field<Timestamp>,
    reference: Field<BlockId>,
    consensus_data: CD,
    transaction_data: TD,
    signer: Field<SignerData>,
    encoded: Vec<u8>,
}

impl<CD: BlockField, TD: BlockField> Block<CD, TD> {
    /// Assemble a block from its parts. A `None` signature builds an unsigned
    /// block whose encoding ends right after the generator key.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        version: u8,
        timestamp: Timestamp,
        reference: BlockId,
        consensus_data: CD,
        transaction_data: TD,
        generator: PublicKey,
        signature: Option<Signature>,
    ) -> CoreResult<Self> {
        Self::assemble(
            Field::new(VERSION, version),
            Field::new(TIMESTAMP, timestamp),
            Field::new(REFERENCE, reference),
            consensus_data,
            transaction_data,
            Field::new(SIGNER, SignerData::new(generator, signature)),
        )
    }

    /// Build an unsigned block, sign its encoding and return the signed block.
    #[allow(clippy::too_many_arguments)]
    pub fn build_and_sign<S: SignatureProvider>(
        version: u8,
        timestamp: Timestamp,
        reference: BlockId,
        consensus_data: CD,
        transaction_data: TD,
        key: &PrivateKey,
        provider: &S,
    ) -> CoreResult<Self> {
        let unsigned = Self::build(
            version,
            timestamp,
            reference,
            consensus_data,
            transaction_data,
            provider.public_key(key),
            None,
        )?;
        let signature = provider.sign(key, unsigned.bytes());
        debug!(
            "Signed block {} with reference {}",
            signature, unsigned.reference.value()
        );
        unsigned.with_signature(signature)
    }

    /// Genesis block: zero reference, zero generator key, zero signature and
    /// the modules' genesis payloads.
    pub fn genesis<C, T>(config: &GenesisConfig, consensus: &C, transactions: &T) -> CoreResult<Self>
    where
        C: ConsensusModule<CD, TD>,
        T: TransactionModule<CD, TD>,
    {
        Self::build(
            config.version,
            config.timestamp,
            BlockId::zero(),
            consensus.genesis_data(),
            transactions.genesis_data(),
            PublicKey::zero(),
            Some(Signature::zero()),
        )
    }

    /// Decode a block received from the network or read from storage.
    /// The payloads are handed to their modules as opaque byte slices.
    pub fn parse<C, T>(bytes: &[u8], consensus: &C, transactions: &T) -> CoreResult<Self>
    where
        C: ConsensusModule<CD, TD>,
        T: TransactionModule<CD, TD>,
    {
        let block = Self::decode(bytes, consensus, transactions).map_err(|e| {
            debug!("Failed to parse block of {} bytes: {}", bytes.len(), e);
            e
        })?;
        debug!("Parsed block {}", block.encoded_id());
        Self::assemble(
            block.version,
            block.timestamp,
            block.reference,
            block.consensus_data,
            block.transaction_data,
            block.signer,
        )
    }

    fn decode<C, T>(
        bytes: &[u8],
        consensus: &C,
        transactions: &T,
    ) -> Result<Decoded<CD, TD>, ParseError>
    where
        C: ConsensusModule<CD, TD>,
        T: TransactionModule<CD, TD>,
    {
        let mut decoder = Decoder::new(bytes);

        let version = Field::<u8>::decode(VERSION, decoder.fixed(VERSION, 1)?)?;
        let timestamp = Field::<Timestamp>::decode(TIMESTAMP, decoder.fixed(TIMESTAMP, 8)?)?;
        let reference =
            Field::<BlockId>::decode(REFERENCE, decoder.fixed(REFERENCE, SIGNATURE_LENGTH)?)?;
        let consensus_data = consensus
            .parse_block_data(decoder.prefixed(CONSENSUS_DATA)?)
            .map_err(ParseError::ConsensusData)?;
        let transaction_data = transactions
            .parse_block_data(decoder.prefixed(TRANSACTION_DATA)?)
            .map_err(ParseError::TransactionData)?;
        let signer = Field::<SignerData>::decode(
            SIGNER,
            decoder.fixed(SIGNER, KEY_LENGTH + SIGNATURE_LENGTH)?,
        )?;
        decoder.finish()?;

        Ok(Decoded {
            version,
            timestamp,
            reference,
            consensus_data,
            transaction_data,
            signer,
        })
    }

    fn assemble(
        version: Field<u8>,
        timestamp: Field<Timestamp>,
        reference: Field<BlockId>,
        consensus_data: CD,
        transaction_data: TD,
        signer: Field<SignerData>,
    ) -> CoreResult<Self> {
        let encoded = Encoder::with_capacity(KEY_LENGTH + 2 * SIGNATURE_LENGTH + 64)
            .field(&version)
            .field(&timestamp)
            .field(&reference)
            .prefixed(&consensus_data)?
            .prefixed(&transaction_data)?
            .field(&signer)
            .finish();

        Ok(Self {
            version,
            timestamp,
            reference,
            consensus_data,
            transaction_data,
            signer,
            encoded,
        })
    }

    fn with_signature(self, signature: Signature) -> CoreResult<Self> {
        let generator = self.signer.into_value().generator;
        Self::assemble(
            self.version,
            self.timestamp,
            self.reference,
            self.consensus_data,
            self.transaction_data,
            Field::new(SIGNER, SignerData::new(generator, Some(signature))),
        )
    }

    /// Transactions carried by this block
    pub fn transactions<T>(&self, module: &T) -> Vec<T::Transaction>
    where
        T: TransactionModule<CD, TD>,
    {
        module.transactions(self)
    }

    /// Total fee: the sum of the consensus module's fee distribution
    pub fn fee<C>(&self, consensus: &C) -> Amount
    where
        C: ConsensusModule<CD, TD>,
    {
        consensus
            .fees_distribution(self)
            .values()
            .fold(0, |total, amount| total.saturating_add(*amount))
    }

    /// JSON projection: every field's projection plus the computed fee
    pub fn json<C>(&self, consensus: &C) -> Value
    where
        C: ConsensusModule<CD, TD>,
    {
        let mut map = Map::new();
        merge(&mut map, &self.version);
        merge(&mut map, &self.timestamp);
        merge(&mut map, &self.reference);
        merge(&mut map, &self.consensus_data);
        merge(&mut map, &self.transaction_data);
        merge(&mut map, &self.signer);
        map.insert("fee".to_string(), Value::from(self.fee(consensus)));
        Value::Object(map)
    }
}

struct Decoded<CD, TD> {
    version: Field<u8>,
    timestamp: Field<Timestamp>,
    reference: Field<BlockId>,
    consensus_data: CD,
    transaction_data: TD,
    signer: Field<SignerData>,
}

impl<CD, TD> Decoded<CD, TD> {
    fn encoded_id(&self) -> String {
        hex::encode(self.signer.value().signature_bytes())
    }
}

fn merge(map: &mut Map<String, Value>, field: &impl BlockField) {
    match field.json() {
        Value::Object(fields) => map.extend(fields),
        other => {
            map.insert(field.name().to_string(), other);
        }
    }
}

impl<CD, TD> Block<CD, TD> {
    pub fn version(&self) -> u8 {
        *self.version.value()
    }

    pub fn timestamp(&self) -> Timestamp {
        *self.timestamp.value()
    }

    /// Id of the parent block
    pub fn reference(&self) -> &BlockId {
        self.reference.value()
    }

    pub fn consensus_data(&self) -> &CD {
        &self.consensus_data
    }

    pub fn transaction_data(&self) -> &TD {
        &self.transaction_data
    }

    pub fn generator(&self) -> &PublicKey {
        &self.signer.value().generator
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signer.value().signature.as_ref()
    }

    pub fn is_signed(&self) -> bool {
        self.signature().is_some()
    }

    /// Block identity: the signature bytes, empty when unsigned
    pub fn unique_id(&self) -> &[u8] {
        self.signer.value().signature_bytes()
    }

    pub fn id(&self) -> Option<BlockId> {
        self.signature().copied().map(BlockId::from)
    }

    /// Hex encoding of the unique id
    pub fn encoded_id(&self) -> String {
        hex::encode(self.unique_id())
    }

    /// Full wire encoding
    pub fn bytes(&self) -> &[u8] {
        &self.encoded
    }

    /// Wire encoding without the trailing signature. This is the message the
    /// generator signs.
    pub fn bytes_without_signature(&self) -> &[u8] {
        let signature_len = self.unique_id().len();
        &self.encoded[..self.encoded.len() - signature_len]
    }

    pub fn encoded_len(&self) -> usize {
        self.encoded.len()
    }

    /// Length of the fixed part of the encoding for a signed block
    pub const fn fixed_len() -> usize {
        1 + 8 + SIGNATURE_LENGTH + 2 * LENGTH_PREFIX + KEY_LENGTH + SIGNATURE_LENGTH
    }

    /// Check if block is genesis
    pub fn is_genesis(&self) -> bool {
        self.reference().is_zero()
            && self.generator().is_zero()
            && self.signature().is_some_and(Signature::is_zero)
    }
}

impl<CD, TD> PartialEq for Block<CD, TD> {
    fn eq(&self, other: &Self) -> bool {
        self.unique_id() == other.unique_id()
    }
}

impl<CD, TD> Eq for Block<CD, TD> {}

impl<CD, TD> Hash for Block<CD, TD> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unique_id().hash(state);
    }
}

impl<CD, TD> fmt::Display for Block<CD, TD> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block(0x{})", self.encoded_id())
    }
}
