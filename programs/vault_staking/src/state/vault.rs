use anchor_lang::prelude::*;

use crate::constants::{MAX_FUNDERS, PRECISION};
use crate::error::VaultError;

/// Lifecycle state of a [`Vault`].
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum VaultStatus {
    /// Record allocated but not yet configured.
    #[default]
    Uninitialized,
    /// Live and accepting operations.
    Initialized,
    /// Operations suspended. Reserved; no instruction currently sets this.
    Paused,
}

#[account]
#[derive(Default)]
pub struct Vault {
    pub authority: Pubkey,
    pub status: VaultStatus,

    pub reward_mint: Pubkey,
    pub reward_mint_account: Pubkey,

    pub reward_duration: u64,
    pub reward_duration_deadline: i64,
    pub reward_rate: u128,

    pub staked_count: u32,
    pub stake_token_count: u32,
    pub user_count: u32,

    pub funders: [Pubkey; MAX_FUNDERS],
}

impl Vault {
    pub const LEN: usize = 8
        + 32 + 1
        + (32 * 2)
        + 8 + 8 + 16
        + (4 * 3)
        + (32 * MAX_FUNDERS);

    /// Gate shared by every operation after vault creation.
    pub fn ensure_active(&self) -> Result<()> {
        match self.status {
            VaultStatus::Uninitialized => err!(VaultError::NotInitialized),
            VaultStatus::Paused => err!(VaultError::InvalidState),
            VaultStatus::Initialized => Ok(()),
        }
    }

    pub fn is_funder(&self, key: &Pubkey) -> bool {
        self.funders.iter().any(|slot| slot == key)
    }

    /// Writes `key` into the first free slot of the funder registry.
    ///
    /// The registry holds raw slots, not a set: authorizing the same key
    /// twice occupies two slots, and each must be removed on its own.
    pub fn authorize_funder(&mut self, key: Pubkey) -> Result<()> {
        let slot = self
            .funders
            .iter_mut()
            .find(|slot| **slot == Pubkey::default())
            .ok_or(VaultError::CapacityExceeded)?;
        *slot = key;
        Ok(())
    }

    /// Clears the first slot holding `key` back to the default sentinel.
    /// Slots are never compacted, so earlier removals leave gaps that
    /// later authorizations fill first.
    pub fn unauthorize_funder(&mut self, key: &Pubkey) -> Result<()> {
        let slot = self
            .funders
            .iter_mut()
            .find(|slot| **slot == *key)
            .ok_or(VaultError::NotFound)?;
        *slot = Pubkey::default();
        Ok(())
    }

    /// Computes the fixed-point reward rate for a funding round: `amount`
    /// spread evenly over `reward_duration` seconds and the configured
    /// stake-token supply, scaled by [`PRECISION`]. Truncating division.
    pub fn calculate_reward_rate(
        amount: u64,
        reward_duration: u64,
        stake_token_count: u32,
    ) -> Result<u128> {
        let rate = (amount as u128)
            .checked_mul(PRECISION)
            .ok_or(VaultError::ArithmeticOverflow)?
            .checked_div(reward_duration as u128)
            .ok_or(VaultError::ArithmeticOverflow)?
            .checked_div(stake_token_count as u128)
            .ok_or(VaultError::ArithmeticOverflow)?;
        Ok(rate)
    }

    /// Installs a new reward schedule from a funding round. The rate and
    /// the deadline always move together; any unexpired previous schedule
    /// is discarded rather than blended.
    pub fn apply_funding(&mut self, amount: u64, now: i64) -> Result<()> {
        self.reward_rate =
            Self::calculate_reward_rate(amount, self.reward_duration, self.stake_token_count)?;
        let duration =
            i64::try_from(self.reward_duration).map_err(|_| VaultError::ArithmeticOverflow)?;
        self.reward_duration_deadline = now
            .checked_add(duration)
            .ok_or(VaultError::ArithmeticOverflow)?;
        Ok(())
    }
}
