//! Transcript Proof System
//!
//! Provides verifiable match outcomes through:
//! - Match transcripts (header + nine turns)
//! - Structural validation
//! - Canonical ABI encoding and keccak256 match ids
//! - Verification by deterministic replay
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PROOF SYSTEM                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  transcript.rs   - Transcript types, JSON + bincode         │
//! │  validate.rs     - Structural checks before replay          │
//! │  encode.rs       - TRANSCRIPT_ENCODING_V1, matchId          │
//! │  verify.rs       - Verification by replay                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod encode;
pub mod transcript;
pub mod validate;
pub mod verify;

// Re-export key types
pub use encode::{encode_ruleset, encode_transcript, match_id, ruleset_id, ENCODED_LEN};
pub use transcript::{Address, ArchiveError, Transcript, TranscriptHeader, Turn, TRANSCRIPT_VERSION};
pub use validate::{validate_transcript, TranscriptError};
pub use verify::{verify_replay, ReplayVerification};
