/// Funder registry instruction handlers.
///
/// Adds and removes keys from the vault's fixed funder slot table.
///
/// ## Security Guarantees
/// - Both operations require signer == vault.authority
/// - Slot table capacity is fixed; removal clears in place, never compacts

use anchor_lang::prelude::*;

use crate::error::VaultError;
use crate::state::Vault;

/// Accounts required for funder registry changes.
#[derive(Accounts)]
pub struct FunderChange<'info> {
    /// The vault authority.
    pub authority: Signer<'info>,

    /// The vault whose registry is modified.
    #[account(mut, has_one = authority @ VaultError::Unauthorized)]
    pub vault: Account<'info, Vault>,
}

/// Write `funder` into the first free registry slot.
///
/// # Errors
/// Returns an error if the vault is not live or all slots are occupied.
pub fn authorize_handler(ctx: Context<FunderChange>, funder: Pubkey) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.ensure_active()?;
    vault.authorize_funder(funder)?;

    msg!("Funder authorized: {}", funder);

    Ok(())
}

/// Clear the first registry slot holding `funder`.
///
/// # Errors
/// Returns an error if the vault is not live or the key occupies no slot.
pub fn unauthorize_handler(ctx: Context<FunderChange>, funder: Pubkey) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.ensure_active()?;
    vault.unauthorize_funder(&funder)?;

    msg!("Funder unauthorized: {}", funder);

    Ok(())
}
