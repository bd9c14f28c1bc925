//! Unstake instruction handler.

use anchor_lang::prelude::*;
use anchor_spl::token::spl_token::instruction::AuthorityType;
use anchor_spl::token::{self, SetAuthority, Token, TokenAccount};

use crate::constants::*;
use crate::error::VaultError;
use crate::instructions::stake::update_rewards;
use crate::state::{User, Vault};

/// Accounts required for unstaking.
#[derive(Accounts)]
pub struct Unstake<'info> {
    /// The staker taking a token account back out of custody.
    pub staker: Signer<'info>,

    /// The vault staked into.
    #[account(mut)]
    pub vault: Account<'info, Vault>,

    /// The staker's user record.
    #[account(
        mut,
        seeds = [VAULT_USER_SEED, vault.key().as_ref(), staker.key().as_ref()],
        bump,
        constraint = user_account.vault == vault.key() @ VaultError::NotFound
    )]
    pub user_account: Account<'info, User>,

    /// The custody authority currently holding the stake account.
    /// CHECK: address-only PDA validated by its seed derivation; carries no data.
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref(), staker.key().as_ref()],
        bump
    )]
    pub stake_authority: UncheckedAccount<'info>,

    /// The token account being released from custody.
    #[account(
        mut,
        constraint = stake_account.owner == stake_authority.key() @ VaultError::Unauthorized
    )]
    pub stake_account: Box<Account<'info, TokenAccount>>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Release one staked token account back to its staker.
///
/// Accrues pending reward at the pre-unstake weight, removes the account
/// from the user's custody list, and reassigns its owner authority from the
/// derived custody authority back to the staker.
///
/// # Errors
/// Returns an error if the vault is not live or the account is not in the
/// user's custody list.
pub fn handler(ctx: Context<Unstake>, _stake_authority_bump: u8) -> Result<()> {
    let vault_key = ctx.accounts.vault.key();
    let staker_key = ctx.accounts.staker.key();
    let stake_account_key = ctx.accounts.stake_account.key();

    let vault = &mut ctx.accounts.vault;
    vault.ensure_active()?;

    let clock = Clock::get()?;

    let user_account = &mut ctx.accounts.user_account;

    // Close out the accrual interval at the old weight before the stake
    // count moves.
    update_rewards(vault, user_account, clock.unix_timestamp)?;

    user_account.remove_stake_account(&stake_account_key)?;
    vault.staked_count = vault
        .staked_count
        .checked_sub(1)
        .ok_or(VaultError::ArithmeticOverflow)?;

    // Hand the token account back, signing as the custody authority. The
    // caller-supplied bump is never trusted; the canonical one is derived
    // from the seeds above.
    let seeds = &[
        VAULT_AUTHORITY_SEED,
        vault_key.as_ref(),
        staker_key.as_ref(),
        &[ctx.bumps.stake_authority],
    ];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = SetAuthority {
        current_authority: ctx.accounts.stake_authority.to_account_info(),
        account_or_mint: ctx.accounts.stake_account.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    token::set_authority(cpi_ctx, AuthorityType::AccountOwner, Some(staker_key))?;

    msg!("Unstaked {}", stake_account_key);
    msg!("User staked count: {}", user_account.mint_staked_count);
    msg!("Vault staked count: {}", vault.staked_count);

    Ok(())
}
