use anchor_lang::prelude::*;

declare_id!("3Ud9TTpsAqGHWAQ9X6gdiWpGFSoYEfVrtz1i4tD9shnU");

pub mod admin {
    use anchor_lang::prelude::declare_id;
    declare_id!("2gMrsVXKtFqSHnP2FE5VZd1wem5prncUToNDF6cswnX6");
}

/// Seed of the PDA that owns the vault and signs payouts.
pub const AUTH_SEED: &str = "vault_authority";
pub const VAULT_SEED: &str = "staking_vault";

/// Minimum time between a stake and its withdrawal, and between two accruals.
pub const LOCK_PERIOD: i64 = 86_400;

/// Fixed-point scale of a participant's pro-rata share.
pub const SCALE: u128 = 1_000_000_000_000_000_000;

pub mod error;
pub mod instructions;
pub mod ledger;
pub mod reward;
pub mod states;
pub mod utils;

use instructions::*;

#[program]
pub mod token_staking {

    use super::*;

    pub fn initialize_pool(ctx: Context<InitializePool>, reward_rate: u64) -> Result<()> {
        instructions::initialize_pool(ctx, reward_rate)
    }

    pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
        instructions::fund_rewards(ctx, amount)
    }

    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake(ctx, amount)
    }

    pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
        instructions::unstake(ctx)
    }

    pub fn update_reward(ctx: Context<UpdateReward>) -> Result<()> {
        instructions::update_reward(ctx)
    }

    pub fn claim_reward(ctx: Context<ClaimReward>) -> Result<()> {
        instructions::claim_reward(ctx)
    }

    pub fn restake(ctx: Context<Restake>) -> Result<()> {
        instructions::restake(ctx)
    }
}
