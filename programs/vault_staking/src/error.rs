//! Error types for the Vault Staking program.
//!
//! This module defines all custom error codes that can be returned by the program.
//! Each error has a unique code and descriptive message.
//!
//! ## Error Code Ranges
//! - 6000-6001: Lifecycle errors
//! - 6002: Authorization errors
//! - 6003-6004: Registry/lookup errors
//! - 6005-6006: Balance/state errors
//! - 6007: Math errors

use anchor_lang::prelude::*;

/// Custom error codes for the Vault Staking program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum VaultError {
    // ========== Lifecycle Errors (6000-6001) ==========

    /// [6000] The vault record has already been initialized.
    #[msg("Vault is already initialized")]
    AlreadyInitialized,

    /// [6001] The vault record has not been initialized yet.
    #[msg("Vault is not initialized")]
    NotInitialized,

    // ========== Authorization Errors (6002) ==========

    /// [6002] The signer is not permitted to perform this operation.
    #[msg("Signer is not authorized for this operation")]
    Unauthorized,

    // ========== Registry/Lookup Errors (6003-6004) ==========

    /// [6003] A fixed-capacity collection (funder registry, custody list) is full.
    #[msg("Capacity exceeded - no free slot available")]
    CapacityExceeded,

    /// [6004] The referenced entry does not exist (funder slot, custody account).
    #[msg("Entry not found")]
    NotFound,

    // ========== Balance/State Errors (6005-6006) ==========

    /// [6005] The reward custody account cannot cover the requested payout.
    #[msg("Insufficient reward balance for payout")]
    InsufficientBalance,

    /// [6006] The operation is not valid in the vault's or user's current state.
    #[msg("Operation not valid in current state")]
    InvalidState,

    // ========== Math Errors (6007) ==========

    /// [6007] Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    ArithmeticOverflow,
}
