//! Round systems that operate on the round state.
//!
//! Systems are functions over `&mut RoundState` (or plain threat/responder
//! data). They do not own state; all state lives in the round.

pub mod assignment;
pub mod scoring;
pub mod threat_update;
pub mod tick;
pub mod victory;
