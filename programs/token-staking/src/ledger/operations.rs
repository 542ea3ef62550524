//! Staking state machine.
//!
//! Each operation validates its preconditions, computes every new value with
//! checked arithmetic, performs its transfers and only then writes the pool
//! and record. A failing check therefore leaves both untouched; a failing
//! transfer aborts the enclosing transaction, which also reverts transfers
//! already made by the same operation.

use anchor_lang::prelude::*;

use super::TokenCustody;
use crate::error::ErrorCode;
use crate::reward::RewardCalculator;
use crate::states::{StakeRecord, StakingPool};
use crate::LOCK_PERIOD;

/// Outcome of a successful `update_reward`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewardAccrual {
    /// Whole days paid for by this accrual.
    pub periods: u64,
    /// Reward credited by this accrual.
    pub reward: u64,
    /// Pending rewards after the accrual.
    pub pending_rewards: u64,
}

/// Outcome of a successful `restake`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Compounded {
    /// Principal paid out by the first leg.
    pub principal: u64,
    /// Reward paid out by the second leg.
    pub reward: u64,
    /// Principal pulled back by the third leg; the new stake.
    pub amount_staked: u64,
}

/// Deposits `amount` into custody and adds it to the caller's stake.
///
/// Returns the caller's principal after the deposit.
pub fn stake<C: TokenCustody>(
    pool: &mut StakingPool,
    record: &mut StakeRecord,
    custody: &mut C,
    amount: u64,
    now: i64,
) -> Result<u64> {
    require!(amount > 0, ErrorCode::InvalidAmount);
    require!(
        custody.balance_of_owner() >= amount,
        ErrorCode::InsufficientBalance
    );

    let amount_staked = record
        .amount_staked
        .checked_add(amount)
        .ok_or(ErrorCode::MathOverflow)?;
    let total_staked = pool
        .total_staked
        .checked_add(amount)
        .ok_or(ErrorCode::MathOverflow)?;

    custody.transfer_from_owner(amount)?;

    record.amount_staked = amount_staked;
    record.last_stake_time = now;
    if record.first_stake_time == 0 {
        record.first_stake_time = now;
    }
    pool.total_staked = total_staked;

    Ok(amount_staked)
}

/// Returns the caller's entire principal once the lock period has elapsed.
///
/// Pending rewards stay in the record and can still be claimed.
pub fn unstake<C: TokenCustody>(
    pool: &mut StakingPool,
    record: &mut StakeRecord,
    custody: &mut C,
    now: i64,
) -> Result<u64> {
    require!(record.is_active(), ErrorCode::NoStakedAmount);
    require!(
        now >= record.next_unlock_time(),
        ErrorCode::UnstakeNotAllowed
    );

    let amount = record.amount_staked;
    let total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(ErrorCode::MathOverflow)?;

    custody.transfer_to_owner(amount)?;

    record.amount_staked = 0;
    pool.total_staked = total_staked;

    Ok(amount)
}

/// Credits the caller's pro-rata share of the daily emission for every whole
/// day since the later of the last stake and the last accrual.
///
/// Allowed once per lock period, and not before a full lock period has passed
/// since the first stake. Moves no tokens.
pub fn update_reward(
    pool: &StakingPool,
    record: &mut StakeRecord,
    now: i64,
) -> Result<RewardAccrual> {
    require!(record.is_active(), ErrorCode::NoStakedAmount);
    require!(
        now >= record.first_stake_time.saturating_add(LOCK_PERIOD),
        ErrorCode::UpdateNotEligible
    );
    require!(
        now >= record.last_update_time.saturating_add(LOCK_PERIOD),
        ErrorCode::ClaimOncePerDay
    );

    let periods = RewardCalculator::elapsed_periods(record.reward_anchor(), now)
        .ok_or(ErrorCode::MathOverflow)?;
    // total_staked includes the caller's own nonzero stake
    let reward = RewardCalculator::rewards(
        record.amount_staked,
        pool.total_staked,
        pool.reward_rate,
        periods,
    )
    .ok_or(ErrorCode::MathOverflow)?;
    let pending_rewards = record
        .pending_rewards
        .checked_add(reward)
        .ok_or(ErrorCode::MathOverflow)?;

    #[cfg(feature = "enable-log")]
    msg!(
        "accrual: staked={}, total={}, rate={}, periods={}, reward={}",
        record.amount_staked,
        pool.total_staked,
        pool.reward_rate,
        periods,
        reward
    );

    record.last_reward = reward;
    record.pending_rewards = pending_rewards;
    record.last_update_time = now;
    record.rewards_updated = true;

    Ok(RewardAccrual {
        periods,
        reward,
        pending_rewards,
    })
}

/// Pays out the rewards credited by the most recent accrual.
pub fn claim_reward<C: TokenCustody>(record: &mut StakeRecord, custody: &mut C) -> Result<u64> {
    require!(record.rewards_updated, ErrorCode::RewardsNotUpdated);

    let amount = record.pending_rewards;

    custody.transfer_to_owner(amount)?;

    record.pending_rewards = 0;
    record.rewards_updated = false;

    Ok(amount)
}

/// Compounds pending rewards into the stake.
///
/// Observable as three transfers in order: principal out, reward out, then
/// principal plus reward back in. `first_stake_time` is left unchanged.
pub fn restake<C: TokenCustody>(
    pool: &mut StakingPool,
    record: &mut StakeRecord,
    custody: &mut C,
    now: i64,
) -> Result<Compounded> {
    require!(record.is_active(), ErrorCode::NoStakedAmount);
    require!(record.rewards_updated, ErrorCode::RewardsNotUpdated);
    require!(
        now >= record.next_unlock_time(),
        ErrorCode::RestakeNotAllowed
    );

    let principal = record.amount_staked;
    let reward = record.pending_rewards;
    let amount_staked = principal
        .checked_add(reward)
        .ok_or(ErrorCode::MathOverflow)?;
    let total_staked = pool
        .total_staked
        .checked_sub(principal)
        .and_then(|total| total.checked_add(amount_staked))
        .ok_or(ErrorCode::MathOverflow)?;

    custody.transfer_to_owner(principal)?;
    custody.transfer_to_owner(reward)?;
    custody.transfer_from_owner(amount_staked)?;

    record.amount_staked = amount_staked;
    record.pending_rewards = 0;
    record.rewards_updated = false;
    record.last_update_time = now;
    record.last_stake_time = now;
    pool.total_staked = total_staked;

    Ok(Compounded {
        principal,
        reward,
        amount_staked,
    })
}

/// Adds reward liquidity to custody. Does not count as stake.
pub fn fund_rewards<C: TokenCustody>(custody: &mut C, amount: u64) -> Result<()> {
    require!(amount > 0, ErrorCode::InvalidAmount);
    require!(
        custody.balance_of_owner() >= amount,
        ErrorCode::InsufficientBalance
    );
    custody.transfer_from_owner(amount)
}
