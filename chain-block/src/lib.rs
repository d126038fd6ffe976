//! Block core for the blockchain
//!
//! This crate provides the canonical block and everything needed to move it
//! around and trust it:
//! - Typed block fields and the binary block layout
//! - Block construction, signing and genesis
//! - Decoding of received blocks with pluggable consensus and transaction payloads
//! - Validity checks against the consensus module, the transaction module,
//!   chain history and the block signature

pub mod block;
pub mod config;
pub mod crypto;
pub mod error;
pub mod field;
pub mod history;
pub mod layout;
pub mod traits;
pub mod types;
pub mod validity;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use block::*;
pub use config::*;
pub use crypto::*;
pub use error::*;
pub use field::{BlockField, DecodeField, Field, SignerData};
pub use history::*;
pub use traits::*;
pub use types::*;
pub use validity::*;
