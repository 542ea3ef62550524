use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::error::ErrorCode;
use crate::utils::{transfer_from_pool_vault_to_user, transfer_from_user_to_pool_vault};

/// Token movements between one participant and the ledger's custody.
///
/// Every transfer either succeeds or returns an error; the ledger never
/// applies state derived from a transfer that did not report success.
pub trait TokenCustody {
    /// Spendable balance of the participant outside the ledger.
    fn balance_of_owner(&self) -> u64;

    /// Pulls `amount` from the participant into custody.
    fn transfer_from_owner(&mut self, amount: u64) -> Result<()>;

    /// Pushes `amount` out of custody to the participant.
    fn transfer_to_owner(&mut self, amount: u64) -> Result<()>;
}

/// Custody backed by the pool vault and an SPL token (or Token-2022) program.
///
/// Pulls are authorized by the participant's signature on the transaction;
/// pushes are signed by the vault authority PDA. A failing token CPI aborts
/// the transaction with the token program's error, so both balances are
/// cached and checked before each CPI to fail with `TransferFailed` instead.
pub struct VaultCustody<'info> {
    pub owner: AccountInfo<'info>,
    pub owner_token: AccountInfo<'info>,
    pub owner_balance: u64,
    pub vault: AccountInfo<'info>,
    pub vault_balance: u64,
    /// `None` for deposit-only custody, which cannot push.
    pub authority: Option<(AccountInfo<'info>, u8)>,
    pub mint: AccountInfo<'info>,
    pub mint_decimals: u8,
    pub token_program: AccountInfo<'info>,
}

impl<'info> VaultCustody<'info> {
    pub fn new(
        owner: &Signer<'info>,
        owner_token: &InterfaceAccount<'info, TokenAccount>,
        vault: &InterfaceAccount<'info, TokenAccount>,
        authority: &UncheckedAccount<'info>,
        authority_bump: u8,
        mint: &InterfaceAccount<'info, Mint>,
        token_program: &Interface<'info, TokenInterface>,
    ) -> Self {
        let mut custody = Self::deposit_only(owner, owner_token, vault, mint, token_program);
        custody.authority = Some((authority.to_account_info(), authority_bump));
        custody
    }

    /// Custody that only accepts deposits into the vault.
    pub fn deposit_only(
        owner: &Signer<'info>,
        owner_token: &InterfaceAccount<'info, TokenAccount>,
        vault: &InterfaceAccount<'info, TokenAccount>,
        mint: &InterfaceAccount<'info, Mint>,
        token_program: &Interface<'info, TokenInterface>,
    ) -> Self {
        Self {
            owner: owner.to_account_info(),
            owner_token: owner_token.to_account_info(),
            owner_balance: owner_token.amount,
            vault: vault.to_account_info(),
            vault_balance: vault.amount,
            authority: None,
            mint: mint.to_account_info(),
            mint_decimals: mint.decimals,
            token_program: token_program.to_account_info(),
        }
    }
}

impl<'info> TokenCustody for VaultCustody<'info> {
    fn balance_of_owner(&self) -> u64 {
        self.owner_balance
    }

    fn transfer_from_owner(&mut self, amount: u64) -> Result<()> {
        let owner_balance = self
            .owner_balance
            .checked_sub(amount)
            .ok_or(ErrorCode::TransferFailed)?;
        let vault_balance = self
            .vault_balance
            .checked_add(amount)
            .ok_or(ErrorCode::TransferFailed)?;

        transfer_from_user_to_pool_vault(
            self.owner.clone(),
            self.owner_token.clone(),
            self.vault.clone(),
            self.mint.clone(),
            self.token_program.clone(),
            amount,
            self.mint_decimals,
        )?;
        self.owner_balance = owner_balance;
        self.vault_balance = vault_balance;
        Ok(())
    }

    fn transfer_to_owner(&mut self, amount: u64) -> Result<()> {
        let (authority, authority_bump) = self
            .authority
            .clone()
            .ok_or(ErrorCode::TransferFailed)?;
        let vault_balance = self
            .vault_balance
            .checked_sub(amount)
            .ok_or(ErrorCode::TransferFailed)?;
        let owner_balance = self
            .owner_balance
            .checked_add(amount)
            .ok_or(ErrorCode::TransferFailed)?;

        transfer_from_pool_vault_to_user(
            authority,
            self.vault.clone(),
            self.owner_token.clone(),
            self.mint.clone(),
            self.token_program.clone(),
            amount,
            self.mint_decimals,
            &[&[crate::AUTH_SEED.as_bytes(), &[authority_bump]]],
        )?;
        self.owner_balance = owner_balance;
        self.vault_balance = vault_balance;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::harness::assert_error;
    use crate::ledger::operations;
    use crate::states::{StakeRecord, StakingPool};

    fn custody<'a>(
        info: &AccountInfo<'a>,
        owner_balance: u64,
        vault_balance: u64,
        can_push: bool,
    ) -> VaultCustody<'a> {
        VaultCustody {
            owner: info.clone(),
            owner_token: info.clone(),
            owner_balance,
            vault: info.clone(),
            vault_balance,
            authority: can_push.then(|| (info.clone(), 255)),
            mint: info.clone(),
            mint_decimals: 6,
            token_program: info.clone(),
        }
    }

    #[test]
    fn push_above_vault_balance_fails_before_cpi() {
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data: [u8; 0] = [];
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &key, false, 0);
        let mut vault = custody(&info, 0, 99, true);

        assert_error(vault.transfer_to_owner(100), ErrorCode::TransferFailed);
        assert_eq!(vault.vault_balance, 99);
        assert_eq!(vault.owner_balance, 0);
    }

    #[test]
    fn pull_above_owner_balance_fails_before_cpi() {
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data: [u8; 0] = [];
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &key, false, 0);
        let mut vault = custody(&info, 10, 1_000, true);

        assert_error(vault.transfer_from_owner(11), ErrorCode::TransferFailed);
        assert_eq!(vault.owner_balance, 10);
    }

    #[test]
    fn deposit_only_custody_cannot_push() {
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data: [u8; 0] = [];
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &key, false, 0);
        let mut vault = custody(&info, 0, 1_000, false);

        assert_error(vault.transfer_to_owner(1), ErrorCode::TransferFailed);
    }

    #[test]
    fn claim_from_underfunded_vault_reports_transfer_failed() {
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data: [u8; 0] = [];
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &key, false, 0);
        let mut vault = custody(&info, 0, 40, true);
        let mut record = StakeRecord {
            pending_rewards: 100,
            rewards_updated: true,
            ..Default::default()
        };

        assert_error(
            operations::claim_reward(&mut record, &mut vault),
            ErrorCode::TransferFailed,
        );
        assert_eq!(record.pending_rewards, 100);
        assert!(record.rewards_updated);
    }

    #[test]
    fn restake_checks_the_first_leg_against_the_vault() {
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data: [u8; 0] = [];
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &key, false, 0);
        // vault lost part of the principal it should hold
        let mut vault = custody(&info, 0, 400, true);
        let mut pool = StakingPool {
            reward_rate: 100,
            total_staked: 500,
            ..Default::default()
        };
        let mut record = StakeRecord {
            amount_staked: 500,
            pending_rewards: 100,
            rewards_updated: true,
            first_stake_time: 1,
            last_stake_time: 1,
            last_update_time: 1,
            ..Default::default()
        };

        assert_error(
            operations::restake(&mut pool, &mut record, &mut vault, 1 + crate::LOCK_PERIOD),
            ErrorCode::TransferFailed,
        );
        assert_eq!(record.amount_staked, 500);
        assert_eq!(pool.total_staked, 500);
    }
}
