//! Block validity checks

use crate::{Block, BlockField, ConsensusModule, History, SignatureProvider, TransactionModule};
use tracing::{debug, warn};

/// Outcome of each validity predicate for one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityReport {
    /// Consensus module accepted the block
    pub consensus: bool,
    /// Transaction module accepted the block
    pub transactions: bool,
    /// Referenced parent is in history
    pub ancestor: bool,
    /// Signature verifies over the unsigned encoding
    pub signature: bool,
}

impl ValidityReport {
    pub fn is_valid(&self) -> bool {
        self.consensus && self.transactions && self.ancestor && self.signature
    }

    /// Names of the predicates that failed
    pub fn failures(&self) -> Vec<&'static str> {
        [
            ("consensus", self.consensus),
            ("transactions", self.transactions),
            ("ancestor", self.ancestor),
            ("signature", self.signature),
        ]
        .into_iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| name)
        .collect()
    }
}

/// Checks blocks against the consensus module, the transaction module,
/// history and the signature provider.
#[derive(Debug)]
pub struct BlockValidator<'a, C, T, H, S> {
    consensus: &'a C,
    transactions: &'a T,
    history: &'a H,
    signer: &'a S,
}

impl<'a, C, T, H, S> BlockValidator<'a, C, T, H, S>
where
    H: History,
    S: SignatureProvider,
{
    pub fn new(consensus: &'a C, transactions: &'a T, history: &'a H, signer: &'a S) -> Self {
        Self {
            consensus,
            transactions,
            history,
            signer,
        }
    }

    /// Evaluate every predicate once and report the results
    pub fn check<CD, TD>(&self, block: &Block<CD, TD>) -> ValidityReport
    where
        CD: BlockField,
        TD: BlockField,
        C: ConsensusModule<CD, TD>,
        T: TransactionModule<CD, TD>,
    {
        let signature = match block.signature() {
            Some(signature) => {
                self.signer
                    .verify(signature, block.bytes_without_signature(), block.generator())
            }
            None => false,
        };

        let report = ValidityReport {
            consensus: self.consensus.is_valid(block),
            transactions: self.transactions.is_valid(block),
            ancestor: self.history.contains(block.reference()),
            signature,
        };

        if report.is_valid() {
            debug!("Block {} is valid", block);
        } else {
            warn!(
                "Block {} is invalid: consensus={} transactions={} ancestor={} signature={}",
                block, report.consensus, report.transactions, report.ancestor, report.signature
            );
        }
        report
    }

    pub fn is_valid<CD, TD>(&self, block: &Block<CD, TD>) -> bool
    where
        CD: BlockField,
        TD: BlockField,
        C: ConsensusModule<CD, TD>,
        T: TransactionModule<CD, TD>,
    {
        self.check(block).is_valid()
    }
}
