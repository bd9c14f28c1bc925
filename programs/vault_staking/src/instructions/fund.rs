/// Fund instruction handler.
///
/// Escrows a reward deposit and installs the new distribution schedule.
///
/// ## Security Guarantees
/// - The funder must occupy a registry slot and sign
/// - The vault authority must co-sign every deposit
/// - The destination is pinned to the vault's stored custody address

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::VaultError;
use crate::state::Vault;

/// Accounts required for funding.
#[derive(Accounts)]
pub struct Fund<'info> {
    /// The depositing funder.
    pub funder: Signer<'info>,

    /// The vault authority, co-signing the deposit.
    pub authority: Signer<'info>,

    /// The vault being funded.
    #[account(
        mut,
        has_one = authority @ VaultError::Unauthorized,
        has_one = reward_mint_account
    )]
    pub vault: Account<'info, Vault>,

    /// Funder's reward token account.
    #[account(
        mut,
        constraint = funder_account.mint == vault.reward_mint @ VaultError::InvalidState,
        constraint = funder_account.owner == funder.key() @ VaultError::Unauthorized
    )]
    pub funder_account: Account<'info, TokenAccount>,

    /// The vault's reward custody account.
    #[account(mut)]
    pub reward_mint_account: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Deposit `amount` reward tokens and re-anchor the reward schedule.
///
/// The new rate spreads `amount` over the configured duration and
/// stake-token supply; any unexpired previous schedule is overwritten, and
/// the deadline restarts at `now + reward_duration`.
///
/// # Errors
/// Returns an error if the vault is not live, the funder holds no registry
/// slot, or the rate computation overflows.
pub fn handler(ctx: Context<Fund>, amount: u64) -> Result<()> {
    let vault = &ctx.accounts.vault;
    vault.ensure_active()?;
    require!(
        vault.is_funder(&ctx.accounts.funder.key()),
        VaultError::Unauthorized
    );

    let clock = Clock::get()?;

    // Escrow the deposit before touching the schedule.
    let cpi_accounts = Transfer {
        from: ctx.accounts.funder_account.to_account_info(),
        to: ctx.accounts.reward_mint_account.to_account_info(),
        authority: ctx.accounts.funder.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new(cpi_program, cpi_accounts);
    token::transfer(cpi_ctx, amount)?;

    let vault = &mut ctx.accounts.vault;
    vault.apply_funding(amount, clock.unix_timestamp)?;

    msg!("Funded {} reward tokens", amount);
    msg!("Reward rate: {}", vault.reward_rate);
    msg!("Schedule deadline: {}", vault.reward_duration_deadline);

    Ok(())
}
