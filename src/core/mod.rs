//! Core deterministic primitives.
//!
//! Hashing and the Solidity ABI word writer. Everything that must agree
//! byte-for-byte with the settlement contract is built from these.

pub mod abi;
pub mod hash;

// Re-export core types
pub use abi::AbiWriter;
pub use hash::{keccak256, Hash32, StateHash, StateHasher};
