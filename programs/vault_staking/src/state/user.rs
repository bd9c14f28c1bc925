use anchor_lang::prelude::*;

use crate::constants::MAX_STAKED_MINTS;
use crate::error::VaultError;

#[account]
#[derive(Default)]
pub struct User {
    pub vault: Pubkey,
    pub key: Pubkey,

    pub reward_earned_claimed: u64,
    pub reward_earned_pending: u64,

    pub mint_staked_count: u32,
    pub mint_accounts: Vec<Pubkey>,

    pub last_stake_time: i64,
}

impl User {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 8 + 4 + (4 + 32 * MAX_STAKED_MINTS) + 8;

    /// Appends `key` to the custody list and bumps the staked counter.
    pub fn add_stake_account(&mut self, key: Pubkey) -> Result<()> {
        require!(
            self.mint_accounts.len() < MAX_STAKED_MINTS,
            VaultError::CapacityExceeded
        );
        self.mint_accounts.push(key);
        self.mint_staked_count = self
            .mint_staked_count
            .checked_add(1)
            .ok_or(VaultError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Removes the entry for `key` from the custody list, wherever it
    /// sits; later entries shift down to close the gap.
    pub fn remove_stake_account(&mut self, key: &Pubkey) -> Result<()> {
        let index = self
            .mint_accounts
            .iter()
            .position(|entry| entry == key)
            .ok_or(VaultError::NotFound)?;
        self.mint_accounts.remove(index);
        self.mint_staked_count = self
            .mint_staked_count
            .checked_sub(1)
            .ok_or(VaultError::ArithmeticOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_user() -> User {
        User {
            vault: Pubkey::new_unique(),
            key: Pubkey::new_unique(),
            ..Default::default()
        }
    }

    #[test]
    fn stake_account_round_trip_restores_list_and_counter() {
        let mut user = mock_user();
        let keys: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        for key in &keys {
            user.add_stake_account(*key).unwrap();
        }
        assert_eq!(user.mint_staked_count, 3);
        assert_eq!(user.mint_accounts, keys);

        // Removing the middle entry shifts the tail down; no gap remains.
        user.remove_stake_account(&keys[1]).unwrap();
        assert_eq!(user.mint_staked_count, 2);
        assert_eq!(user.mint_accounts, vec![keys[0], keys[2]]);

        user.remove_stake_account(&keys[0]).unwrap();
        user.remove_stake_account(&keys[2]).unwrap();
        assert_eq!(user.mint_staked_count, 0);
        assert!(user.mint_accounts.is_empty());
    }

    #[test]
    fn remove_unknown_stake_account_fails() {
        let mut user = mock_user();
        user.add_stake_account(Pubkey::new_unique()).unwrap();

        assert_eq!(
            user.remove_stake_account(&Pubkey::new_unique()).unwrap_err(),
            VaultError::NotFound.into()
        );
        assert_eq!(user.mint_staked_count, 1);
    }

    #[test]
    fn stake_account_capacity_is_bounded() {
        let mut user = mock_user();
        for _ in 0..MAX_STAKED_MINTS {
            user.add_stake_account(Pubkey::new_unique()).unwrap();
        }
        assert_eq!(
            user.add_stake_account(Pubkey::new_unique()).unwrap_err(),
            VaultError::CapacityExceeded.into()
        );
    }
}
