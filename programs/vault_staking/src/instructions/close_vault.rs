//! Close-vault instruction handler.
//!
//! Retires a drained vault: refunds whatever reward remains in custody,
//! closes the custody token account, and reclaims the vault record's rent.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, CloseAccount, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::VaultError;
use crate::state::Vault;

/// Accounts required for closing a vault.
#[derive(Accounts)]
pub struct CloseVault<'info> {
    /// The vault authority, who receives the reclaimed rent.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The vault being closed.
    #[account(
        mut,
        close = authority,
        has_one = authority @ VaultError::Unauthorized,
        has_one = reward_mint_account
    )]
    pub vault: Account<'info, Vault>,

    /// The authority over the reward custody account.
    /// CHECK: address-only PDA validated by its seed derivation; carries no data.
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref(), authority.key().as_ref()],
        bump
    )]
    pub reward_authority: UncheckedAccount<'info>,

    /// The vault's reward custody account, drained and closed here.
    #[account(
        mut,
        constraint = reward_mint_account.owner == reward_authority.key()
            @ VaultError::Unauthorized
    )]
    pub reward_mint_account: Box<Account<'info, TokenAccount>>,

    /// The token account receiving any unclaimed reward.
    #[account(
        mut,
        constraint = refund_account.mint == vault.reward_mint @ VaultError::InvalidState,
        constraint = refund_account.key() != reward_mint_account.key()
            @ VaultError::InvalidState
    )]
    pub refund_account: Box<Account<'info, TokenAccount>>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Close a vault once it is fully drained.
///
/// Requires every position unstaked, every user record closed, and the
/// reward schedule expired. Leftover reward in custody is refunded to the
/// given account before the custody account and the vault record are
/// closed.
///
/// # Errors
/// Returns an error if the vault is not live, still has stakes or user
/// records, or its reward schedule has not ended.
pub fn handler(ctx: Context<CloseVault>) -> Result<()> {
    let vault_key = ctx.accounts.vault.key();
    let authority_key = ctx.accounts.authority.key();
    let clock = Clock::get()?;

    let vault = &ctx.accounts.vault;
    vault.ensure_active()?;

    require!(vault.staked_count == 0, VaultError::InvalidState);
    require!(vault.user_count == 0, VaultError::InvalidState);
    require!(
        vault.reward_duration_deadline < clock.unix_timestamp,
        VaultError::InvalidState
    );

    let seeds = &[
        VAULT_AUTHORITY_SEED,
        vault_key.as_ref(),
        authority_key.as_ref(),
        &[ctx.bumps.reward_authority],
    ];
    let signer_seeds = &[&seeds[..]];

    // Refund whatever reward was never claimed.
    let remaining = ctx.accounts.reward_mint_account.amount;
    if remaining > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.reward_mint_account.to_account_info(),
            to: ctx.accounts.refund_account.to_account_info(),
            authority: ctx.accounts.reward_authority.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
        token::transfer(cpi_ctx, remaining)?;
        msg!("Refunded {} reward tokens", remaining);
    }

    // The custody account must be empty before it can be closed.
    let cpi_accounts = CloseAccount {
        account: ctx.accounts.reward_mint_account.to_account_info(),
        destination: ctx.accounts.authority.to_account_info(),
        authority: ctx.accounts.reward_authority.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    token::close_account(cpi_ctx)?;

    msg!("Vault {} closed", vault_key);

    Ok(())
}
