use crate::ledger::{self, VaultCustody};
use crate::states::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts context for `fund_rewards`.
///
/// Anyone may top up the vault with reward liquidity. Funded tokens are not
/// counted in `total_staked` and cannot be withdrawn by the funder.
#[derive(Accounts)]
pub struct FundRewards<'info> {
    pub funder: Signer<'info>,

    #[account(
        seeds = [STAKING_POOL_SEED.as_bytes(), pool.staking_mint.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, StakingPool>>,

    #[account(
        address = pool.staking_mint,
        mint::token_program = token_program,
    )]
    pub staking_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = staking_mint,
        token::authority = funder,
        token::token_program = token_program,
    )]
    pub funder_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = pool.vault,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Deposits `amount` reward tokens into the vault.
///
/// # Errors
/// - `InvalidAmount`: `amount` is zero.
/// - `InsufficientBalance`: the funder holds less than `amount`.
pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
    let accounts = &ctx.accounts;

    let mut custody = VaultCustody::deposit_only(
        &accounts.funder,
        &accounts.funder_token,
        &accounts.vault,
        &accounts.staking_mint,
        &accounts.token_program,
    );
    ledger::fund_rewards(&mut custody, amount)?;

    msg!("Reward vault funded with {}", amount);

    emit!(RewardsFunded {
        funder: accounts.funder.key(),
        amount,
    });
    Ok(())
}
