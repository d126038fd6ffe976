//! Mock collaborators shared by the unit tests

use crate::{
    Amount, Block, BlockField, BlockId, ConsensusModule, Ed25519Provider, PrivateKey,
    TransactionModule, BLOCK_VERSION, PRIVATE_KEY_LENGTH, SIGNATURE_LENGTH,
};
use serde_json::{json, Map, Value};
use std::cell::Cell;
use std::collections::HashMap;

pub type TestBlock = Block<TestPayload, TestPayload>;

/// Opaque payload rendered as raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPayload {
    pub label: &'static str,
    pub data: Vec<u8>,
}

impl TestPayload {
    pub fn new(label: &'static str, data: Vec<u8>) -> Self {
        Self { label, data }
    }
}

impl BlockField for TestPayload {
    fn name(&self) -> &str {
        self.label
    }

    fn bytes(&self) -> Vec<u8> {
        self.data.clone()
    }

    fn json(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            self.label.to_string(),
            json!({ "data": hex::encode(&self.data) }),
        );
        Value::Object(map)
    }
}

#[derive(Debug)]
pub struct MockConsensus {
    pub valid: bool,
    pub reject_data: bool,
    pub fees: HashMap<String, Amount>,
    pub validity_calls: Cell<usize>,
}

impl Default for MockConsensus {
    fn default() -> Self {
        Self {
            valid: true,
            reject_data: false,
            fees: HashMap::new(),
            validity_calls: Cell::new(0),
        }
    }
}

impl ConsensusModule<TestPayload, TestPayload> for MockConsensus {
    type Account = String;
    type Input = Vec<u8>;

    fn is_valid(&self, _block: &TestBlock) -> bool {
        self.validity_calls.set(self.validity_calls.get() + 1);
        self.valid
    }

    fn fees_distribution(&self, _block: &TestBlock) -> HashMap<String, Amount> {
        self.fees.clone()
    }

    fn form_block_data(&self, input: Vec<u8>) -> TestPayload {
        TestPayload::new("consensus", input)
    }

    fn parse_block_data(&self, bytes: &[u8]) -> anyhow::Result<TestPayload> {
        if self.reject_data {
            anyhow::bail!("consensus data rejected");
        }
        Ok(self.form_block_data(bytes.to_vec()))
    }

    fn genesis_data(&self) -> TestPayload {
        self.form_block_data(vec![0u8; 8])
    }
}

#[derive(Debug)]
pub struct MockTransactions {
    pub valid: bool,
    pub reject_data: bool,
    pub validity_calls: Cell<usize>,
}

impl Default for MockTransactions {
    fn default() -> Self {
        Self {
            valid: true,
            reject_data: false,
            validity_calls: Cell::new(0),
        }
    }
}

impl TransactionModule<TestPayload, TestPayload> for MockTransactions {
    type Transaction = Vec<u8>;
    type Input = Vec<u8>;

    fn is_valid(&self, _block: &TestBlock) -> bool {
        self.validity_calls.set(self.validity_calls.get() + 1);
        self.valid
    }

    /// Two-byte chunks of the payload
    fn transactions(&self, block: &TestBlock) -> Vec<Vec<u8>> {
        block
            .transaction_data()
            .data
            .chunks(2)
            .map(<[u8]>::to_vec)
            .collect()
    }

    fn form_block_data(&self, input: Vec<u8>) -> TestPayload {
        TestPayload::new("transactions", input)
    }

    fn parse_block_data(&self, bytes: &[u8]) -> anyhow::Result<TestPayload> {
        if self.reject_data {
            anyhow::bail!("transaction data rejected");
        }
        Ok(self.form_block_data(bytes.to_vec()))
    }

    fn genesis_data(&self) -> TestPayload {
        self.form_block_data(Vec::new())
    }
}

/// Signed block with the given payloads and a fixed key
pub fn sample_block(consensus: Vec<u8>, transactions: Vec<u8>) -> TestBlock {
    TestBlock::build_and_sign(
        BLOCK_VERSION,
        1_700_000_000_000,
        BlockId::new([1u8; SIGNATURE_LENGTH]),
        TestPayload::new("consensus", consensus),
        TestPayload::new("transactions", transactions),
        &PrivateKey::new([42u8; PRIVATE_KEY_LENGTH]),
        &Ed25519Provider,
    )
    .unwrap()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
