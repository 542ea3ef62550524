//! Daily pro-rata reward calculations

use crate::{utils::math::U256, LOCK_PERIOD, SCALE};

/// Stateless reward math shared by `update_reward` and off-chain previews.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RewardCalculator {}

impl RewardCalculator {
    /// Number of whole lock periods (days) between `since` and `now`.
    ///
    /// Partial days are floored away. Returns `None` when `now` precedes
    /// `since`, which the clock never allows for stored timestamps.
    pub fn elapsed_periods(since: i64, now: i64) -> Option<u64> {
        let elapsed = now.checked_sub(since)?;
        if elapsed < 0 {
            return None;
        }
        u64::try_from(elapsed / LOCK_PERIOD).ok()
    }

    /// Participant's share of the pool, scaled by `SCALE`.
    ///
    /// `None` when the pool is empty.
    pub fn share(amount_staked: u64, total_staked: u64) -> Option<u128> {
        if total_staked == 0 {
            return None;
        }
        (amount_staked as u128)
            .checked_mul(SCALE)?
            .checked_div(total_staked as u128)
    }

    /// Reward owed for `periods` days at `reward_rate` per day:
    /// `share * reward_rate * periods / SCALE`, floored.
    ///
    /// This is guaranteed to work for all values such that:
    ///  - 1 <= total_staked
    ///  - the result fits in a `u64`
    pub fn rewards(
        amount_staked: u64,
        total_staked: u64,
        reward_rate: u64,
        periods: u64,
    ) -> Option<u64> {
        let share = Self::share(amount_staked, total_staked)?;
        let scaled = U256::from(share)
            .checked_mul(U256::from(reward_rate))?
            .checked_mul(U256::from(periods))?;
        scaled.checked_div(U256::from(SCALE))?.checked_as_u64()
    }
}
