//! Collaborator interfaces consumed by the block core

use crate::{Amount, Block, BlockId};
use std::collections::HashMap;
use std::hash::Hash;

/// Consensus rules plugged into a block. `CD` is the consensus payload the
/// module produces, `TD` the transaction payload it is paired with.
pub trait ConsensusModule<CD, TD> {
    /// Account that fees are paid to
    type Account: Eq + Hash;

    /// Raw input the module turns into a consensus payload
    type Input;

    /// Check the block against the consensus rules
    fn is_valid(&self, block: &Block<CD, TD>) -> bool;

    /// Fee paid to each account for this block
    fn fees_distribution(&self, block: &Block<CD, TD>) -> HashMap<Self::Account, Amount>;

    fn form_block_data(&self, input: Self::Input) -> CD;

    /// Decode the consensus payload of a received block
    fn parse_block_data(&self, bytes: &[u8]) -> anyhow::Result<CD>;

    /// Consensus payload of the genesis block
    fn genesis_data(&self) -> CD;
}

/// Transaction handling plugged into a block.
pub trait TransactionModule<CD, TD> {
    type Transaction;

    /// Raw input the module turns into a transaction payload
    type Input;

    /// Check the block's transactions against chain state
    fn is_valid(&self, block: &Block<CD, TD>) -> bool;

    /// Transactions carried by the block
    fn transactions(&self, block: &Block<CD, TD>) -> Vec<Self::Transaction>;

    fn form_block_data(&self, input: Self::Input) -> TD;

    /// Decode the transaction payload of a received block
    fn parse_block_data(&self, bytes: &[u8]) -> anyhow::Result<TD>;

    /// Transaction payload of the genesis block
    fn genesis_data(&self) -> TD;
}

/// Accepted chain history
pub trait History {
    /// Check whether a block with this id has been accepted
    fn contains(&self, id: &BlockId) -> bool;
}

impl<H: History + ?Sized> History for std::sync::Arc<H> {
    fn contains(&self, id: &BlockId) -> bool {
        (**self).contains(id)
    }
}
