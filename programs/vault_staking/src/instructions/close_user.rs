//! Close user instruction handler.
//!
//! Releases an empty user record and refunds its rent.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::VaultError;
use crate::state::{User, Vault};

/// Accounts required for closing a user record.
#[derive(Accounts)]
pub struct CloseUser<'info> {
    /// Either the vault authority or the participant; receives the rent.
    #[account(mut)]
    pub closer: Signer<'info>,

    /// The vault the record belongs to.
    #[account(mut)]
    pub vault: Account<'info, Vault>,

    /// The user record being closed.
    #[account(
        mut,
        close = closer,
        seeds = [VAULT_USER_SEED, vault.key().as_ref(), user_account.key.as_ref()],
        bump,
        constraint = user_account.vault == vault.key() @ VaultError::NotFound
    )]
    pub user_account: Account<'info, User>,
}

/// Close a user record.
///
/// Only valid once the user holds no stake and no unclaimed reward;
/// closing must never strand custody or discard earned tokens.
///
/// # Errors
/// Returns an error if the signer is neither the vault authority nor the
/// participant, or if stake or pending reward remains.
pub fn handler(ctx: Context<CloseUser>) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.ensure_active()?;

    let closer = ctx.accounts.closer.key();
    let user_account = &ctx.accounts.user_account;
    require!(
        closer == vault.authority || closer == user_account.key,
        VaultError::Unauthorized
    );
    require!(user_account.mint_staked_count == 0, VaultError::InvalidState);
    require!(
        user_account.reward_earned_pending == 0,
        VaultError::InvalidState
    );

    vault.user_count = vault
        .user_count
        .checked_sub(1)
        .ok_or(VaultError::ArithmeticOverflow)?;

    msg!("User record closed for {}", user_account.key);
    msg!("Vault user count: {}", vault.user_count);

    Ok(())
}
