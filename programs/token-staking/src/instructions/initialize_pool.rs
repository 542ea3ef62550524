use crate::error::ErrorCode;
use crate::states::*;
use crate::VAULT_SEED;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use std::ops::DerefMut;

/// Accounts context for `initialize_pool`.
///
/// This handler:
/// - Creates the staking pool for one mint with an immutable reward rate.
/// - Creates the pool vault, owned by the program authority PDA, which holds
///   both staked principal and reward liquidity.
#[derive(Accounts)]
pub struct InitializePool<'info> {
    /// Admin signer (must match the program-level admin id). Pays for the
    /// pool and vault accounts.
    #[account(
        mut,
        address = crate::admin::id() @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    /// Program authority PDA, owner of the vault.
    ///
    /// CHECK: PDA derivation enforced via seeds. Not read as an account; used as Pubkey.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// Mint of the staked token.
    #[account(mint::token_program = token_program)]
    pub staking_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Pool account holding the reward rate and the total staked.
    #[account(
        init,
        seeds = [STAKING_POOL_SEED.as_bytes(), staking_mint.key().as_ref()],
        bump,
        payer = owner,
        space = StakingPool::LEN
    )]
    pub pool: Account<'info, StakingPool>,

    /// Program-owned vault for principal and rewards.
    #[account(
        init,
        seeds = [VAULT_SEED.as_bytes(), pool.key().as_ref()],
        bump,
        payer = owner,
        token::mint = staking_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program interface (required for vault creation).
    pub token_program: Interface<'info, TokenInterface>,

    /// Solana System Program.
    pub system_program: Program<'info, System>,
}

/// Writes the immutable pool configuration.
///
/// # Errors
/// - `AddressZero`: the staking mint is the default pubkey.
/// - `RewardRateZero`: `reward_rate` is zero.
pub fn initialize_pool(ctx: Context<InitializePool>, reward_rate: u64) -> Result<()> {
    let admin = ctx.accounts.owner.key();
    let staking_mint = ctx.accounts.staking_mint.key();
    let vault = ctx.accounts.vault.key();
    let pool_key = ctx.accounts.pool.key();

    let pool = ctx.accounts.pool.deref_mut();
    pool.initialize(
        admin,
        staking_mint,
        vault,
        reward_rate,
        ctx.bumps.pool,
        ctx.bumps.authority,
    )?;

    msg!(
        "Staking pool initialized: mint={}, reward_rate={}",
        staking_mint,
        reward_rate
    );

    emit!(PoolInitialized {
        admin,
        pool: pool_key,
        staking_mint,
        vault,
        reward_rate,
    });
    Ok(())
}
