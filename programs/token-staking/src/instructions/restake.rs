use crate::ledger::{self, VaultCustody};
use crate::states::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts context for `restake`.
///
/// Compounds pending rewards into the principal. Executed as three transfers
/// in one transaction: principal out, reward out, principal plus reward in.
/// Any failing leg reverts the whole instruction.
#[derive(Accounts)]
pub struct Restake<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

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

    /// CHECK: Vault authority PDA; signs both payout legs.
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

/// Restakes principal plus pending rewards.
///
/// # Errors
/// - `NoStakedAmount`: nothing is staked.
/// - `RewardsNotUpdated`: no accrual since the last claim or restake.
/// - `RestakeNotAllowed`: the lock period since the last stake has not elapsed.
/// - `TransferFailed`: any of the three legs was rejected.
pub fn restake(ctx: Context<Restake>) -> Result<()> {
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
    let compounded = ledger::restake(
        &mut accounts.pool,
        &mut accounts.stake_record,
        &mut custody,
        now,
    )?;

    msg!(
        "Restaked: principal={}, reward={}, new_stake={}",
        compounded.principal,
        compounded.reward,
        compounded.amount_staked
    );

    emit!(Restaked {
        user: accounts.owner.key(),
        amount: compounded.amount_staked,
        timestamp: now,
    });
    Ok(())
}
