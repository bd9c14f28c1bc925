//! Program constants for the Vault Staking program.
//!
//! This module defines all constant values used throughout the staking program,
//! including PDA seeds, capacity limits, and the fixed-point precision scale.

use anchor_lang::prelude::*;

/// Seed for deriving the vault reward custody token account PDA
pub const VAULT_REWARD_SEED: &[u8] = b"vault_reward";

/// Seed for deriving user record PDAs
pub const VAULT_USER_SEED: &[u8] = b"vault_user";

/// Seed for deriving token custody authority PDAs (reward custody and
/// per-staker stake custody)
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

/// Number of funder slots in a vault's registry
pub const MAX_FUNDERS: usize = 5;

/// Maximum number of token accounts a single user may have in custody at once
pub const MAX_STAKED_MINTS: usize = 300;

/// Minimum reward distribution duration in seconds
pub const MIN_DURATION: u64 = 1;

/// Fixed-point scale for reward rates: 64 fractional bits.
///
/// `reward_rate` stores reward-per-second-per-staked-item multiplied by this
/// scale, so sub-unit rates survive integer division. Accrued amounts are
/// divided back down by the same scale before payout.
pub const PRECISION: u128 = 1u128 << 64;
