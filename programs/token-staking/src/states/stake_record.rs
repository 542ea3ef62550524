use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::LOCK_PERIOD;

//
// ──────────────────────────────────────────────────────────────────────────────
// StakeRecord Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive each participant's stake record.
pub const STAKE_RECORD_SEED: &str = "stake_record";

/// Staking and reward state of a single participant.
///
/// Derived from `STAKE_RECORD_SEED + pool + owner` and created on first use
/// with every field zeroed, so a participant that never staked is
/// indistinguishable from one that fully unstaked and claimed. Records are
/// never closed: `pending_rewards` survives a full unstake until claimed.
///
/// Timestamps are unix seconds from the cluster clock; `0` means unset.
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct StakeRecord {
    /// PDA bump for this account.
    pub bump: u8,

    /// Participant that owns this record.
    pub owner: Pubkey,

    /// Pool this record belongs to.
    pub pool: Pubkey,

    /// Principal currently under stake.
    pub amount_staked: u64,

    /// Accrued rewards not yet claimed or restaked.
    pub pending_rewards: u64,

    /// Reward credited by the most recent accrual.
    pub last_reward: u64,

    /// Time of the first stake ever. Never reset.
    pub first_stake_time: i64,

    /// Time of the most recent successful accrual.
    pub last_update_time: i64,

    /// Time of the most recent stake or restake.
    pub last_stake_time: i64,

    /// Set by an accrual, cleared by claim and restake.
    pub rewards_updated: bool,
}

impl StakeRecord {
    /// Fixed serialized size of the account (for allocation at initialization).
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32 * 2: owner and pool
    /// - 8 * 3: three `u64` fields
    /// - 8 * 3: three `i64` timestamps
    /// - 1: rewards flag
    pub const LEN: usize = 8 + 1 + 32 * 2 + 8 * 3 + 8 * 3 + 1;

    /// Binds a freshly created record to its owner, or checks the binding of
    /// an existing one.
    pub fn bind(&mut self, owner: Pubkey, pool: Pubkey, bump: u8) -> Result<()> {
        if self.owner == Pubkey::default() {
            self.owner = owner;
            self.pool = pool;
            self.bump = bump;
            return Ok(());
        }
        require_keys_eq!(self.owner, owner, ErrorCode::InvalidOwner);
        require_keys_eq!(self.pool, pool, ErrorCode::InvalidOwner);
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.amount_staked > 0
    }

    /// Earliest time at which `unstake` or `restake` passes the lock gate.
    pub fn next_unlock_time(&self) -> i64 {
        self.last_stake_time.saturating_add(LOCK_PERIOD)
    }

    /// Earliest time at which `update_reward` passes both accrual gates.
    pub fn next_update_time(&self) -> i64 {
        self.first_stake_time
            .saturating_add(LOCK_PERIOD)
            .max(self.last_update_time.saturating_add(LOCK_PERIOD))
    }

    /// Start of the period the next accrual pays for: the later of the last
    /// stake and the last accrual.
    pub fn reward_anchor(&self) -> i64 {
        self.last_stake_time.max(self.last_update_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_sets_owner_once() {
        let owner = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let mut record = StakeRecord::default();

        record.bind(owner, pool, 254).unwrap();
        assert_eq!(record.owner, owner);
        assert_eq!(record.bump, 254);
        // rebinding to the same owner is a no-op
        record.bind(owner, pool, 1).unwrap();
        assert_eq!(record.bump, 254);

        assert!(record.bind(Pubkey::new_unique(), pool, 254).is_err());
        assert!(record.bind(owner, Pubkey::new_unique(), 254).is_err());
    }

    #[test]
    fn reward_anchor_is_latest_of_stake_and_accrual() {
        let mut record = StakeRecord {
            amount_staked: 100,
            first_stake_time: 1_000,
            last_stake_time: 5_000,
            ..Default::default()
        };
        assert_eq!(record.reward_anchor(), 5_000);

        record.last_update_time = 90_000;
        assert_eq!(record.reward_anchor(), 90_000);

        // top-up after the accrual
        record.last_stake_time = 170_000;
        assert_eq!(record.reward_anchor(), 170_000);
    }

    #[test]
    fn unlock_and_update_times() {
        let record = StakeRecord {
            amount_staked: 100,
            first_stake_time: 1_000,
            last_stake_time: 50_000,
            ..Default::default()
        };
        assert_eq!(record.next_unlock_time(), 50_000 + LOCK_PERIOD);
        assert_eq!(record.next_update_time(), 1_000 + LOCK_PERIOD);

        let accrued = StakeRecord {
            last_update_time: 200_000,
            ..record
        };
        assert_eq!(accrued.next_update_time(), 200_000 + LOCK_PERIOD);
    }
}
