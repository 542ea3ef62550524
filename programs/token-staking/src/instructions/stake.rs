use crate::ledger::{self, VaultCustody};
use crate::states::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts context for `stake`.
///
/// Pulls `amount` from the participant's token account into the pool vault and
/// adds it to their principal. The stake record is created on first use.
#[derive(Accounts)]
pub struct Stake<'info> {
    /// Participant staking tokens (payer for the stake record if needed).
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Pool of the staked mint. Writable: `total_staked` grows.
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED.as_bytes(), pool.staking_mint.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, StakingPool>>,

    /// Participant's stake record.
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

    /// CHECK: Vault authority PDA. Not read as an account; used only as signer reference.
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

    /// Participant's token account (source of the deposit).
    #[account(
        mut,
        token::mint = staking_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Pool vault (destination of the deposit).
    #[account(
        mut,
        address = pool.vault,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Stakes `amount` tokens.
///
/// # Errors
/// - `InvalidAmount`: `amount` is zero.
/// - `InsufficientBalance`: the participant holds less than `amount`.
/// - `TransferFailed`: the deposit transfer was rejected.
pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let now = Clock::get()?.unix_timestamp;

    // --- 1) Bind the (possibly fresh) record to its owner ---
    accounts.stake_record.bind(
        accounts.owner.key(),
        accounts.pool.key(),
        ctx.bumps.stake_record,
    )?;

    // --- 2) Move tokens and update the ledger ---
    let mut custody = VaultCustody::new(
        &accounts.owner,
        &accounts.owner_token,
        &accounts.vault,
        &accounts.authority,
        accounts.pool.authority_bump,
        &accounts.staking_mint,
        &accounts.token_program,
    );
    let amount_staked = ledger::stake(
        &mut accounts.pool,
        &mut accounts.stake_record,
        &mut custody,
        amount,
        now,
    )?;

    msg!(
        "Staked {} (principal={}, total_staked={})",
        amount,
        amount_staked,
        accounts.pool.total_staked
    );

    emit!(Staked {
        user: accounts.owner.key(),
        amount,
        timestamp: now,
    });
    Ok(())
}
