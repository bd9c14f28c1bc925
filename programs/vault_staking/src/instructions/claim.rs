//! Claim instruction handler.
//!
//! Pays a user's accrued reward out of the vault's custody account.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::VaultError;
use crate::instructions::stake::update_rewards;
use crate::state::{User, Vault};

/// Accounts required for claiming rewards.
#[derive(Accounts)]
pub struct Claim<'info> {
    /// The user claiming their accrued reward.
    pub claimer: Signer<'info>,

    /// The vault claimed from.
    #[account(
        has_one = authority @ VaultError::Unauthorized,
        has_one = reward_mint_account
    )]
    pub vault: Account<'info, Vault>,

    /// The vault authority's address, part of the custody authority
    /// derivation.
    /// CHECK: matched against the vault's stored authority by the has_one
    /// constraint above; never read or written.
    pub authority: UncheckedAccount<'info>,

    /// The claimer's user record.
    #[account(
        mut,
        seeds = [VAULT_USER_SEED, vault.key().as_ref(), claimer.key().as_ref()],
        bump,
        constraint = user_account.vault == vault.key() @ VaultError::NotFound
    )]
    pub user_account: Account<'info, User>,

    /// The authority over the reward custody account.
    /// CHECK: address-only PDA validated by its seed derivation; carries no data.
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref(), authority.key().as_ref()],
        bump
    )]
    pub reward_authority: UncheckedAccount<'info>,

    /// The vault's reward custody account.
    #[account(
        mut,
        constraint = reward_mint_account.owner == reward_authority.key()
            @ VaultError::Unauthorized
    )]
    pub reward_mint_account: Box<Account<'info, TokenAccount>>,

    /// The claimer's token account receiving the payout.
    #[account(
        mut,
        constraint = claim_account.mint == vault.reward_mint @ VaultError::InvalidState,
        constraint = claim_account.owner == claimer.key() @ VaultError::Unauthorized
    )]
    pub claim_account: Box<Account<'info, TokenAccount>>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Pay out the claimer's pending reward.
///
/// Accrues up to the current time first, then transfers the full pending
/// balance from the reward custody account and folds it into the user's
/// claimed total. A zero pending balance is a no-op.
///
/// # Errors
/// Returns an error if the vault is not live, or the custody account holds
/// less than the pending balance.
pub fn handler(ctx: Context<Claim>) -> Result<()> {
    let vault_key = ctx.accounts.vault.key();
    let authority_key = ctx.accounts.authority.key();

    let vault = &ctx.accounts.vault;
    vault.ensure_active()?;

    let clock = Clock::get()?;

    let user_account = &mut ctx.accounts.user_account;
    update_rewards(vault, user_account, clock.unix_timestamp)?;

    let pending = user_account.reward_earned_pending;
    if pending == 0 {
        msg!("Nothing to claim");
        return Ok(());
    }

    // The schedule caps total accrual at the funded amount, so a shortfall
    // here means escrow has been tampered with.
    require!(
        ctx.accounts.reward_mint_account.amount >= pending,
        VaultError::InsufficientBalance
    );

    let seeds = &[
        VAULT_AUTHORITY_SEED,
        vault_key.as_ref(),
        authority_key.as_ref(),
        &[ctx.bumps.reward_authority],
    ];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.reward_mint_account.to_account_info(),
        to: ctx.accounts.claim_account.to_account_info(),
        authority: ctx.accounts.reward_authority.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, pending)?;

    let user_account = &mut ctx.accounts.user_account;
    user_account.reward_earned_claimed = user_account
        .reward_earned_claimed
        .checked_add(pending)
        .ok_or(VaultError::ArithmeticOverflow)?;
    user_account.reward_earned_pending = 0;

    msg!("Claimed {} reward tokens", pending);
    msg!("Total claimed: {}", user_account.reward_earned_claimed);

    Ok(())
}
