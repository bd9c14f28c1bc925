//! # Vault Staking Program
//!
//! A token-staking vault with escrowed, schedule-based reward accrual.
//! Stakers hand whole token accounts (one stake-token unit each) into
//! program custody and earn a share of each funded reward round:
//!
//! - **Vaults**: independent reward schedules, each with its own authority
//! - **Funder registry**: up to five addresses authorized to fund rewards
//! - **Linear accrual**: pending reward grows with stake weight and time,
//!   capped at the funded schedule window
//! - **Escrowed payouts**: rewards live in a program-derived custody
//!   account until claimed
//! - Safe math with overflow protection
//!
//! Stake custody never pools funds: every staked token account keeps its
//! own address and is handed back intact on unstake.

use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use instructions::*;

#[program]
pub mod vault_staking {
    use super::*;

    /// Creates a vault with the given reward schedule parameters.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for creation
    /// * `reward_bump` - Recorded for clients; the canonical bump is derived
    /// * `reward_duration` - Length of each funded reward round, in seconds
    /// * `stake_token_count` - Total stake-token units the schedule divides
    ///   rewards across
    ///
    /// # Errors
    /// Returns an error if the duration is too short, the stake token count
    /// is zero, or the vault account was already initialized.
    pub fn create_vault(
        ctx: Context<CreateVault>,
        reward_bump: u8,
        reward_duration: u64,
        stake_token_count: u32,
    ) -> Result<()> {
        instructions::create_vault::handler(ctx, reward_bump, reward_duration, stake_token_count)
    }

    /// Adds an address to the vault's funder registry.
    ///
    /// # Arguments
    /// * `ctx` - The context containing the vault and its authority
    /// * `funder` - Address being granted funding rights
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the vault authority
    /// - The registry already holds five funders
    pub fn authorize_funder(ctx: Context<FunderChange>, funder: Pubkey) -> Result<()> {
        instructions::funder::authorize_handler(ctx, funder)
    }

    /// Removes an address from the vault's funder registry.
    ///
    /// # Arguments
    /// * `ctx` - The context containing the vault and its authority
    /// * `funder` - Address losing funding rights
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the vault authority
    /// - The address is not in the registry
    pub fn unauthorize_funder(ctx: Context<FunderChange>, funder: Pubkey) -> Result<()> {
        instructions::funder::unauthorize_handler(ctx, funder)
    }

    /// Funds a reward round, restarting the vault's schedule.
    ///
    /// # Arguments
    /// * `ctx` - The context containing funding accounts
    /// * `amount` - Amount of reward tokens moved into custody
    ///
    /// # Errors
    /// Returns an error if:
    /// - The funder is not in the registry
    /// - The vault authority has not co-signed
    /// - The rate computation overflows
    pub fn fund(ctx: Context<Fund>, amount: u64) -> Result<()> {
        instructions::fund::handler(ctx, amount)
    }

    /// Creates a user record for staking into the vault.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for creation
    /// * `user_bump` - Recorded for clients; the canonical bump is derived
    ///
    /// # Errors
    /// Returns an error if the vault is not live.
    pub fn create_user(ctx: Context<CreateUser>, user_bump: u8) -> Result<()> {
        instructions::create_user::handler(ctx, user_bump)
    }

    /// Closes an empty user record and reclaims its rent.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is neither the record's user nor the vault authority
    /// - The record still has staked accounts or unclaimed reward
    pub fn close_user(ctx: Context<CloseUser>) -> Result<()> {
        instructions::close_user::handler(ctx)
    }

    /// Stakes one token account into the vault.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The vault is not live
    /// - The custody list is full
    /// - The account holds more or less than one token, or is already staked
    pub fn stake(ctx: Context<Stake>) -> Result<()> {
        instructions::stake::handler(ctx)
    }

    /// Releases a staked token account back to its staker.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for release
    /// * `stake_authority_bump` - Accepted for clients; the canonical bump
    ///   is derived
    ///
    /// # Errors
    /// Returns an error if the account is not in the caller's custody list.
    pub fn unstake(ctx: Context<Unstake>, stake_authority_bump: u8) -> Result<()> {
        instructions::unstake::handler(ctx, stake_authority_bump)
    }

    /// Pays out the caller's pending reward from custody.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The vault is not live
    /// - The custody account holds less than the pending balance
    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim::handler(ctx)
    }

    /// Closes a drained vault and reclaims its rent.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the vault authority
    /// - Stakes or user records remain
    /// - The reward schedule has not ended
    pub fn close_vault(ctx: Context<CloseVault>) -> Result<()> {
        instructions::close_vault::handler(ctx)
    }
}
