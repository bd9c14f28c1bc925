/// Create vault instruction handler.
///
/// Allocates a vault record and its reward custody token account.
///
/// ## Security Guarantees
/// - The reward custody account is a PDA; its transfer authority is another
///   PDA keyed by the vault authority, so no private key can move custody
/// - Mint and custody addresses are locked into vault state permanently
/// - All parameters validated before storage

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::VaultError;
use crate::state::{Vault, VaultStatus};

/// Accounts required for vault creation.
///
/// The vault record itself is a fresh keypair account (it co-signs its own
/// creation); only the custody accounts hang off derived addresses.
#[derive(Accounts)]
pub struct CreateVault<'info> {
    /// The authority that will own the vault.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The vault record to be created.
    #[account(init, payer = authority, space = Vault::LEN)]
    pub vault: Account<'info, Vault>,

    /// The mint of the token distributed as reward.
    pub reward_mint: Account<'info, Mint>,

    /// Transfer authority over the reward custody account.
    /// CHECK: address-only PDA, validated by its derivation; holds no data.
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref(), authority.key().as_ref()],
        bump
    )]
    pub reward_authority: UncheckedAccount<'info>,

    /// The reward custody token account, created here at its derived
    /// address and owned by the derived transfer authority.
    #[account(
        init,
        payer = authority,
        seeds = [VAULT_REWARD_SEED, vault.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = reward_authority
    )]
    pub reward_account: Account<'info, TokenAccount>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,

    /// Token program for the custody account.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar for rent-exempt calculations.
    pub rent: Sysvar<'info, Rent>,
}

/// Create and configure a new vault.
///
/// # Arguments
/// * `ctx` - CreateVault accounts context
/// * `_reward_bump` - accepted for interface compatibility; the canonical
///   bump is recomputed by the seeds constraint
/// * `reward_duration` - reward distribution horizon in seconds
/// * `stake_token_count` - stake-token supply the reward rate is spread over
///
/// # Errors
/// Returns an error if the duration or supply parameters are out of range,
/// or if the record was already initialized.
pub fn handler(
    ctx: Context<CreateVault>,
    _reward_bump: u8,
    reward_duration: u64,
    stake_token_count: u32,
) -> Result<()> {
    require!(reward_duration >= MIN_DURATION, VaultError::InvalidState);
    require!(stake_token_count > 0, VaultError::InvalidState);

    let vault = &mut ctx.accounts.vault;
    require!(
        vault.status == VaultStatus::Uninitialized,
        VaultError::AlreadyInitialized
    );

    vault.authority = ctx.accounts.authority.key();
    vault.status = VaultStatus::Initialized;
    vault.reward_mint = ctx.accounts.reward_mint.key();
    vault.reward_mint_account = ctx.accounts.reward_account.key();
    vault.reward_duration = reward_duration;
    vault.reward_duration_deadline = 0;
    vault.reward_rate = 0;
    vault.staked_count = 0;
    vault.stake_token_count = stake_token_count;
    vault.user_count = 0;
    vault.funders = [Pubkey::default(); MAX_FUNDERS];

    msg!("Vault created");
    msg!("Authority: {}", vault.authority);
    msg!("Reward mint: {}", vault.reward_mint);
    msg!(
        "Duration: {}s across {} stake tokens",
        reward_duration,
        stake_token_count
    );

    Ok(())
}
