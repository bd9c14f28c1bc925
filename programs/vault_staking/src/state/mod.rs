//! State structures for the Vault Staking program.
//!
//! This module defines all account structures used to store program state.

pub mod user;
pub mod vault;

pub use user::*;
pub use vault::*;
