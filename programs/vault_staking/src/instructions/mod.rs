//! Instruction handlers for the vault staking program.
//!
//! This module contains all instruction implementations.

pub mod claim;
pub mod close_user;
pub mod close_vault;
pub mod create_user;
pub mod create_vault;
pub mod fund;
pub mod funder;
pub mod stake;
pub mod unstake;

pub use claim::*;
pub use close_user::*;
pub use close_vault::*;
pub use create_user::*;
pub use create_vault::*;
pub use fund::*;
pub use funder::*;
pub use stake::*;
pub use unstake::*;
