use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Events: Emitted for off-chain indexers/clients to track ledger state changes
// ──────────────────────────────────────────────────────────────────────────────
//

/// Emitted once when a staking pool is created.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PoolInitialized {
    /// Admin that created the pool.
    pub admin: Pubkey,
    /// The pool account.
    pub pool: Pubkey,
    /// Mint of the staked token.
    pub staking_mint: Pubkey,
    /// Vault holding principal and reward liquidity.
    pub vault: Pubkey,
    /// Immutable daily reward emission.
    pub reward_rate: u64,
}

/// Emitted when reward liquidity is added to the vault.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardsFunded {
    pub funder: Pubkey,
    pub amount: u64,
}

/// Emitted after tokens are pulled into custody by `stake`.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Staked {
    pub user: Pubkey,
    /// Amount added by this call.
    pub amount: u64,
    pub timestamp: i64,
}

/// Emitted after the full principal is returned by `unstake`.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Unstaked {
    pub user: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Emitted after a successful accrual.
///
/// `updated` is always `true` for an emitted event; the accrued amount and the
/// resulting pending balance are included for auditors.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardUpdated {
    pub user: Pubkey,
    pub updated: bool,
    /// Reward credited by this accrual.
    pub reward: u64,
    /// Pending rewards after the accrual.
    pub pending_rewards: u64,
    pub timestamp: i64,
}

/// Emitted after pending rewards are paid out.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardClaimed {
    pub user: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Emitted after principal and rewards are compounded into a new stake.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Restaked {
    pub user: Pubkey,
    /// New total principal under stake.
    pub amount: u64,
    pub timestamp: i64,
}
