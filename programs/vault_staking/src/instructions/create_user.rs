//! Create user instruction handler.
//!
//! Initializes the per-participant record for a vault.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::VaultError;
use crate::state::{User, Vault};

/// Accounts required for user record creation.
#[derive(Accounts)]
pub struct CreateUser<'info> {
    /// The participant, paying for their own record.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The vault the record belongs to.
    #[account(mut)]
    pub vault: Account<'info, Vault>,

    /// The user record, created at its derived address.
    #[account(
        init,
        payer = user,
        space = User::LEN,
        seeds = [VAULT_USER_SEED, vault.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_account: Account<'info, User>,

    /// System program.
    pub system_program: Program<'info, System>,
}

/// Create a user record for the signing participant.
///
/// # Arguments
/// * `ctx` - CreateUser accounts context
/// * `_user_bump` - accepted for interface compatibility; the canonical
///   bump is recomputed by the seeds constraint
///
/// # Errors
/// Returns an error if the vault is not live.
pub fn handler(ctx: Context<CreateUser>, _user_bump: u8) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.ensure_active()?;

    let clock = Clock::get()?;

    let user_account = &mut ctx.accounts.user_account;
    user_account.vault = vault.key();
    user_account.key = ctx.accounts.user.key();
    user_account.reward_earned_claimed = 0;
    user_account.reward_earned_pending = 0;
    user_account.mint_staked_count = 0;
    user_account.mint_accounts = vec![];
    user_account.last_stake_time = clock.unix_timestamp;

    vault.user_count = vault
        .user_count
        .checked_add(1)
        .ok_or(VaultError::ArithmeticOverflow)?;

    msg!("User record created for {}", user_account.key);
    msg!("Vault user count: {}", vault.user_count);

    Ok(())
}
