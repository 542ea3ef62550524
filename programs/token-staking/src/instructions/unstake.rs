use crate::ledger::{self, VaultCustody};
use crate::states::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts context for `unstake`.
///
/// Returns the participant's whole principal from the pool vault once a full
/// lock period has passed since their last stake. Pending rewards are kept.
#[derive(Accounts)]
pub struct Unstake<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Pool of the staked mint. Writable: `total_staked` shrinks.
    #[account(
        mut,
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

    /// CHECK: Vault authority PDA; signs the payout.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump = pool.authority_bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(
        address = pool.staking_mint,
        mint::token_program = token_program,
    )]
    pub staking_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = staking_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = pool.vault,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Withdraws the full principal.
///
/// # Errors
/// - `NoStakedAmount`: nothing is staked.
/// - `UnstakeNotAllowed`: the lock period since the last stake has not elapsed.
/// - `TransferFailed`: the payout transfer was rejected.
pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let now = Clock::get()?.unix_timestamp;

    accounts.stake_record.bind(
        accounts.owner.key(),
        accounts.pool.key(),
        ctx.bumps.stake_record,
    )?;

    let mut custody = VaultCustody::new(
        &accounts.owner,
        &accounts.owner_token,
        &accounts.vault,
        &accounts.authority,
        accounts.pool.authority_bump,
        &accounts.staking_mint,
        &accounts.token_program,
    );
    let amount = ledger::unstake(
        &mut accounts.pool,
        &mut accounts.stake_record,
        &mut custody,
        now,
    )?;

    msg!(
        "Unstaked {} (total_staked={}, pending_rewards={})",
        amount,
        accounts.pool.total_staked,
        accounts.stake_record.pending_rewards
    );

    emit!(Unstaked {
        user: accounts.owner.key(),
        amount,
        timestamp: now,
    });
    Ok(())
}
