//! Stake instruction handler.
//!
//! Takes custody of one stake-token account, and hosts the accrual helpers
//! shared by the unstake and claim instructions.

use anchor_lang::prelude::*;
use anchor_spl::token::spl_token::instruction::AuthorityType;
use anchor_spl::token::{self, SetAuthority, Token, TokenAccount};

use crate::constants::*;
use crate::error::VaultError;
use crate::state::{User, Vault};

/// Accounts required for staking.
#[derive(Accounts)]
pub struct Stake<'info> {
    /// The staker handing a token account over to custody.
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

    /// The custody authority the stake account is handed to.
    /// CHECK: address-only PDA, validated by its derivation; holds no data.
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref(), staker.key().as_ref()],
        bump
    )]
    pub stake_authority: UncheckedAccount<'info>,

    /// The token account being staked. Holds exactly one stake-token unit,
    /// still owned by the staker, and not already in custody.
    #[account(
        mut,
        constraint = stake_account.owner == staker.key() @ VaultError::Unauthorized,
        constraint = stake_account.amount == 1 @ VaultError::InvalidState,
        constraint = !user_account.mint_accounts.contains(&stake_account.key())
            @ VaultError::InvalidState
    )]
    pub stake_account: Box<Account<'info, TokenAccount>>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Stake one token account into the vault.
///
/// Accrues pending reward at the pre-stake weight, then reassigns the
/// account's owner authority to the derived custody authority and records
/// it in the user's custody list.
///
/// # Errors
/// Returns an error if the vault is not live, the custody list is full, or
/// the bookkeeping arithmetic overflows.
pub fn handler(ctx: Context<Stake>) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.ensure_active()?;

    let clock = Clock::get()?;

    let user_account = &mut ctx.accounts.user_account;

    // Close out the accrual interval at the old weight before the stake
    // count moves.
    update_rewards(vault, user_account, clock.unix_timestamp)?;

    user_account.add_stake_account(ctx.accounts.stake_account.key())?;
    vault.staked_count = vault
        .staked_count
        .checked_add(1)
        .ok_or(VaultError::ArithmeticOverflow)?;

    // Hand the token account to the derived custody authority.
    let cpi_accounts = SetAuthority {
        current_authority: ctx.accounts.staker.to_account_info(),
        account_or_mint: ctx.accounts.stake_account.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new(cpi_program, cpi_accounts);
    token::set_authority(
        cpi_ctx,
        AuthorityType::AccountOwner,
        Some(ctx.accounts.stake_authority.key()),
    )?;

    msg!("Staked {}", ctx.accounts.stake_account.key());
    msg!("User staked count: {}", user_account.mint_staked_count);
    msg!("Vault staked count: {}", vault.staked_count);

    Ok(())
}

/// Reward accrued by `user` since its last checkpoint, at the weight
/// currently in effect.
///
/// The accrual window is clamped to the funded schedule on both ends: time
/// before the schedule started (the checkpoint may predate the funding
/// event) and time past the deadline earn nothing. The product
/// `weight * rate * elapsed` is computed in full before the fixed-point
/// scale divides it back down, so sub-unit rates still pay out over long
/// enough windows; only the final fractional remainder is truncated.
pub fn calculate_accrued(vault: &Vault, user: &User, now: i64) -> Result<u64> {
    if user.mint_staked_count == 0 {
        return Ok(0);
    }

    let duration =
        i64::try_from(vault.reward_duration).map_err(|_| VaultError::ArithmeticOverflow)?;
    let schedule_start = vault
        .reward_duration_deadline
        .checked_sub(duration)
        .ok_or(VaultError::ArithmeticOverflow)?;

    let from = user.last_stake_time.max(schedule_start);
    let until = now.min(vault.reward_duration_deadline);
    let elapsed = until.saturating_sub(from).max(0) as u64;
    if elapsed == 0 {
        return Ok(0);
    }

    let accrued = (user.mint_staked_count as u128)
        .checked_mul(vault.reward_rate)
        .ok_or(VaultError::ArithmeticOverflow)?
        .checked_mul(elapsed as u128)
        .ok_or(VaultError::ArithmeticOverflow)?
        .checked_div(PRECISION)
        .ok_or(VaultError::ArithmeticOverflow)?;

    let accrued_u64 = u64::try_from(accrued).map_err(|_| VaultError::ArithmeticOverflow)?;

    Ok(accrued_u64)
}

/// Accrual checkpoint: folds the reward accrued since `last_stake_time`
/// into the user's pending balance and advances the checkpoint to `now`.
///
/// Every weight-changing or paying instruction calls this first, with the
/// weight still at its old value.
pub fn update_rewards(vault: &Vault, user: &mut User, now: i64) -> Result<()> {
    let accrued = calculate_accrued(vault, user, now)?;

    user.reward_earned_pending = user
        .reward_earned_pending
        .checked_add(accrued)
        .ok_or(VaultError::ArithmeticOverflow)?;
    user.last_stake_time = now;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::VaultStatus;
    use proptest::prelude::*;

    fn mock_vault(reward_rate: u128, reward_duration: u64, deadline: i64) -> Vault {
        Vault {
            authority: Pubkey::new_unique(),
            status: VaultStatus::Initialized,
            reward_rate,
            reward_duration,
            reward_duration_deadline: deadline,
            stake_token_count: 64,
            ..Default::default()
        }
    }

    fn mock_user(weight: u32, last_stake_time: i64) -> User {
        User {
            key: Pubkey::new_unique(),
            mint_staked_count: weight,
            mint_accounts: (0..weight).map(|_| Pubkey::new_unique()).collect(),
            last_stake_time,
            ..Default::default()
        }
    }

    #[test]
    fn accrued_is_weight_times_rate_times_elapsed() {
        // 3 whole tokens per second per item, weight 2, 5 seconds.
        let vault = mock_vault(3 * PRECISION, 1_000, 1_000);
        let user = mock_user(2, 0);
        assert_eq!(calculate_accrued(&vault, &user, 5).unwrap(), 30);
    }

    #[test]
    fn accrued_truncates_fractional_remainder() {
        // Half a token per second: three seconds pay out 1, not 1.5.
        let vault = mock_vault(1u128 << 63, 1_000, 1_000);
        let user = mock_user(1, 0);
        assert_eq!(calculate_accrued(&vault, &user, 3).unwrap(), 1);
    }

    #[test]
    fn accrued_zero_weight_earns_nothing() {
        let vault = mock_vault(3 * PRECISION, 1_000, 1_000);
        let user = mock_user(0, 0);
        assert_eq!(calculate_accrued(&vault, &user, 500).unwrap(), 0);
    }

    #[test]
    fn accrued_zero_elapsed_earns_nothing() {
        let vault = mock_vault(3 * PRECISION, 1_000, 1_000);
        let user = mock_user(4, 250);
        assert_eq!(calculate_accrued(&vault, &user, 250).unwrap(), 0);
    }

    #[test]
    fn accrued_stops_at_schedule_deadline() {
        let vault = mock_vault(PRECISION, 100, 100);
        let user = mock_user(1, 50);
        // Only the 50 seconds inside the schedule count.
        assert_eq!(calculate_accrued(&vault, &user, 200).unwrap(), 50);
    }

    #[test]
    fn accrued_ignores_time_before_schedule_start() {
        // Schedule runs 150..250; the checkpoint predates the funding.
        let vault = mock_vault(PRECISION, 100, 250);
        let user = mock_user(1, 50);
        assert_eq!(calculate_accrued(&vault, &user, 300).unwrap(), 100);
    }

    #[test]
    fn accrued_zero_after_deadline_checkpoint() {
        let vault = mock_vault(PRECISION, 100, 100);
        let user = mock_user(1, 150);
        assert_eq!(calculate_accrued(&vault, &user, 400).unwrap(), 0);
    }

    #[test]
    fn accrued_overflow_is_an_error() {
        let vault = mock_vault(u128::MAX, 1_000, 1_000);
        let user = mock_user(2, 0);
        assert_eq!(
            calculate_accrued(&vault, &user, 10).unwrap_err(),
            VaultError::ArithmeticOverflow.into()
        );
    }

    #[test]
    fn update_rewards_accumulates_and_moves_checkpoint() {
        let vault = mock_vault(PRECISION, 1_000, 1_000);
        let mut user = mock_user(1, 0);

        update_rewards(&vault, &mut user, 10).unwrap();
        assert_eq!(user.reward_earned_pending, 10);
        assert_eq!(user.last_stake_time, 10);

        // Same instant again: nothing further accrues.
        update_rewards(&vault, &mut user, 10).unwrap();
        assert_eq!(user.reward_earned_pending, 10);
    }

    #[test]
    fn piecewise_accrual_across_weight_change_sums_parts() {
        let vault = mock_vault(PRECISION, 1_000, 1_000);
        let mut user = mock_user(3, 0);

        update_rewards(&vault, &mut user, 4).unwrap();
        assert_eq!(user.reward_earned_pending, 3 * 4);

        // Two more items land between checkpoints; the second interval
        // pays at the new weight.
        user.add_stake_account(Pubkey::new_unique()).unwrap();
        user.add_stake_account(Pubkey::new_unique()).unwrap();
        update_rewards(&vault, &mut user, 10).unwrap();
        assert_eq!(user.reward_earned_pending, 3 * 4 + 5 * 6);
    }

    #[test]
    fn full_window_pays_the_funded_share() {
        // 1_000 tokens over 128 seconds across 4 stake tokens: one item
        // staked for the whole window earns exactly 1_000 / 4.
        let mut vault = mock_vault(0, 128, 0);
        vault.stake_token_count = 4;
        vault.apply_funding(1_000, 0).unwrap();

        let user = mock_user(1, 0);
        assert_eq!(calculate_accrued(&vault, &user, 128).unwrap(), 250);
        // Waiting past the deadline adds nothing.
        assert_eq!(calculate_accrued(&vault, &user, 500).unwrap(), 250);
    }

    #[test]
    fn known_rate_fixture_pays_two_per_item() {
        // The 2^58 rate: 1_000_000 over 128 seconds across 500_000 items.
        let mut vault = mock_vault(0, 128, 0);
        vault.stake_token_count = 500_000;
        vault.apply_funding(1_000_000, 0).unwrap();
        assert_eq!(vault.reward_rate, 1u128 << 58);

        let user = mock_user(1, 0);
        assert_eq!(calculate_accrued(&vault, &user, 128).unwrap(), 2);
    }

    const USERS: usize = 3;

    #[derive(Debug, Clone)]
    enum Action {
        Fund(u64),
        Wait(i64),
        Stake(usize),
        Unstake(usize),
        Claim(usize),
    }

    struct Sim {
        vault: Vault,
        users: Vec<User>,
        now: i64,
        total_funded: u128,
        total_claimed: u128,
    }

    impl Sim {
        fn new() -> Self {
            Self {
                vault: mock_vault(0, 128, 0),
                users: (0..USERS).map(|_| mock_user(0, 0)).collect(),
                now: 0,
                total_funded: 0,
                total_claimed: 0,
            }
        }

        fn fund(&mut self, amount: u64) {
            self.vault.apply_funding(amount, self.now).unwrap();
            self.total_funded += amount as u128;
        }

        fn stake(&mut self, idx: usize) {
            if self.vault.staked_count >= self.vault.stake_token_count {
                return;
            }
            let user = &mut self.users[idx];
            update_rewards(&self.vault, user, self.now).unwrap();
            user.add_stake_account(Pubkey::new_unique()).unwrap();
            self.vault.staked_count += 1;
        }

        fn unstake(&mut self, idx: usize) {
            let user = &mut self.users[idx];
            if user.mint_staked_count == 0 {
                return;
            }
            update_rewards(&self.vault, user, self.now).unwrap();
            let target = user.mint_accounts[user.mint_accounts.len() / 2];
            user.remove_stake_account(&target).unwrap();
            self.vault.staked_count -= 1;
        }

        fn claim(&mut self, idx: usize) {
            let user = &mut self.users[idx];
            update_rewards(&self.vault, user, self.now).unwrap();
            let pending = user.reward_earned_pending;
            user.reward_earned_claimed += pending;
            user.reward_earned_pending = 0;
            self.total_claimed += pending as u128;
        }

        fn staked_sum(&self) -> u32 {
            self.users.iter().map(|user| user.mint_staked_count).sum()
        }
    }

    prop_compose! {
        fn action_strategy()(
            tag in 0u8..5,
            amount in 1u64..10_000,
            wait in 1i64..2_000,
            idx in 0usize..USERS,
        ) -> Action {
            match tag {
                0 => Action::Fund(amount),
                1 => Action::Wait(wait),
                2 => Action::Stake(idx),
                3 => Action::Unstake(idx),
                _ => Action::Claim(idx),
            }
        }
    }

    proptest! {
        #[test]
        fn claims_never_exceed_funding(
            actions in prop::collection::vec(action_strategy(), 1..96),
        ) {
            let mut sim = Sim::new();
            for action in actions {
                match action {
                    Action::Fund(amount) => sim.fund(amount),
                    Action::Wait(delta) => sim.now += delta,
                    Action::Stake(idx) => sim.stake(idx),
                    Action::Unstake(idx) => sim.unstake(idx),
                    Action::Claim(idx) => sim.claim(idx),
                }
                prop_assert_eq!(sim.vault.staked_count, sim.staked_sum());
                prop_assert!(sim.total_claimed <= sim.total_funded);
            }

            // Drain every position past the deadline; escrow still covers it.
            sim.now += 1_000_000;
            for idx in 0..USERS {
                sim.claim(idx);
            }
            prop_assert!(sim.total_claimed <= sim.total_funded);
        }

        #[test]
        fn accrual_is_monotonic_in_time(
            rate_bits in 40u32..70,
            weight in 1u32..64,
            start in 0i64..1_000,
            dt1 in 0i64..500,
            dt2 in 0i64..500,
        ) {
            let vault = mock_vault(1u128 << rate_bits, 10_000, 10_000);
            let user = mock_user(weight, start);
            let first = calculate_accrued(&vault, &user, start + dt1).unwrap();
            let second = calculate_accrued(&vault, &user, start + dt1 + dt2).unwrap();
            prop_assert!(second >= first);
        }
    }
}
