use anchor_lang::prelude::*;

use crate::error::ErrorCode;

//
// ──────────────────────────────────────────────────────────────────────────────
// StakingPool Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the pool account of a staking mint.
pub const STAKING_POOL_SEED: &str = "staking_pool";

/// Global ledger state shared by every participant of one staking mint.
///
/// The reward rate and mint are written once by `initialize_pool` and never
/// change afterwards. `total_staked` is the only field mutated by participant
/// instructions; every instruction that moves principal takes this account
/// writable, so the runtime serializes all updates of the counter.
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct StakingPool {
    /// PDA bump for this account.
    pub bump: u8,

    /// Bump of the vault authority PDA (signs payouts out of the vault).
    pub authority_bump: u8,

    /// Admin that created the pool.
    pub admin: Pubkey,

    /// Mint of the staked (and rewarded) token.
    pub staking_mint: Pubkey,

    /// Program-owned token account holding principal and reward liquidity.
    pub vault: Pubkey,

    /// Reward units emitted per day to a participant owning 100% of the stake.
    pub reward_rate: u64,

    /// Sum of `amount_staked` across all stake records of this pool.
    pub total_staked: u64,
}

impl StakingPool {
    /// Fixed serialized size of the account (for allocation at initialization).
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1 + 1: bumps
    /// - 32 * 3: three Pubkeys
    /// - 8 * 2: two `u64` fields
    pub const LEN: usize = 8 + 1 + 1 + 32 * 3 + 8 * 2;

    /// Writes the immutable configuration of a freshly created pool.
    ///
    /// # Errors
    /// - `AddressZero`: `staking_mint` is the default pubkey.
    /// - `RewardRateZero`: `reward_rate` is zero.
    pub fn initialize(
        &mut self,
        admin: Pubkey,
        staking_mint: Pubkey,
        vault: Pubkey,
        reward_rate: u64,
        bump: u8,
        authority_bump: u8,
    ) -> Result<()> {
        require_keys_neq!(staking_mint, Pubkey::default(), ErrorCode::AddressZero);
        require!(reward_rate > 0, ErrorCode::RewardRateZero);

        self.bump = bump;
        self.authority_bump = authority_bump;
        self.admin = admin;
        self.staking_mint = staking_mint;
        self.vault = vault;
        self.reward_rate = reward_rate;
        self.total_staked = 0;
        Ok(())
    }

    pub fn reward_rate(&self) -> u64 {
        self.reward_rate
    }

    pub fn total_staked(&self) -> u64 {
        self.total_staked
    }
}
