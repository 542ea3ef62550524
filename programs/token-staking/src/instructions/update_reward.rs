use crate::ledger;
use crate::states::*;
use anchor_lang::prelude::*;

/// Accounts context for `update_reward`.
///
/// Accrues the participant's share of the daily emission into
/// `pending_rewards`. No tokens move, so no token accounts are required.
#[derive(Accounts)]
pub struct UpdateReward<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Pool of the staked mint. Read-only: supplies the rate and the total.
    #[account(
        seeds = [STAKING_POOL_SEED.as_bytes(), pool.staking_mint.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, StakingPool>>,

    #[account(
        init_if_needed,
        seeds = [
            STAKE_RECORD_SEED.as_bytes(),
            pool.key().as_ref(),
            owner.key().as_ref()
        ],
        bump,
        payer = owner,
        space = StakeRecord::LEN
    )]
    pub stake_record: Box<Account<'info, StakeRecord>>,

    pub system_program: Program<'info, System>,
}

/// Accrues rewards for every whole day since the reward anchor.
///
/// # Errors
/// - `NoStakedAmount`: nothing is staked.
/// - `UpdateNotEligible`: less than a lock period since the first stake.
/// - `ClaimOncePerDay`: less than a lock period since the last accrual.
pub fn update_reward(ctx: Context<UpdateReward>) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let now = Clock::get()?.unix_timestamp;

    accounts.stake_record.bind(
        accounts.owner.key(),
        accounts.pool.key(),
        ctx.bumps.stake_record,
    )?;

    let accrual = ledger::update_reward(&accounts.pool, &mut accounts.stake_record, now)?;

    msg!(
        "Reward updated: periods={}, reward={}, pending_rewards={}",
        accrual.periods,
        accrual.reward,
        accrual.pending_rewards
    );

    emit!(RewardUpdated {
        user: accounts.owner.key(),
        updated: true,
        reward: accrual.reward,
        pending_rewards: accrual.pending_rewards,
        timestamp: now,
    });
    Ok(())
}
