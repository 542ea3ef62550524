//! In-memory token ledger and transactional wrapper used by the tests.
//!
//! `TestLedger::execute` mirrors a Solana transaction: the operation runs
//! against copies of the pool, the caller's record and the token balances,
//! and the copies are committed only when the operation returns `Ok`.

use std::collections::HashMap;

use anchor_lang::error::Error;
use anchor_lang::prelude::*;

use super::{operations, Compounded, RewardAccrual, TokenCustody};
use crate::error::ErrorCode;
use crate::states::{StakeRecord, StakingPool};

/// Direction of a recorded transfer, seen from the participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Leg {
    Pull(u64),
    Push(u64),
}

#[derive(Clone, Debug, Default)]
pub struct MockToken {
    pub balances: HashMap<Pubkey, u64>,
    pub vault: u64,
    pub log: Vec<(Pubkey, Leg)>,
    /// Index in `log` at which the next transfer is rejected.
    pub fail_at: Option<usize>,
}

impl MockToken {
    pub fn balance(&self, owner: &Pubkey) -> u64 {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    fn reject_next(&self) -> bool {
        self.fail_at == Some(self.log.len())
    }
}

pub struct MockCustody<'a> {
    pub token: &'a mut MockToken,
    pub owner: Pubkey,
}

impl TokenCustody for MockCustody<'_> {
    fn balance_of_owner(&self) -> u64 {
        self.token.balance(&self.owner)
    }

    fn transfer_from_owner(&mut self, amount: u64) -> Result<()> {
        let balance = self.token.balance(&self.owner);
        if self.token.reject_next() || balance < amount {
            return err!(ErrorCode::TransferFailed);
        }
        self.token.balances.insert(self.owner, balance - amount);
        self.token.vault += amount;
        self.token.log.push((self.owner, Leg::Pull(amount)));
        Ok(())
    }

    fn transfer_to_owner(&mut self, amount: u64) -> Result<()> {
        if self.token.reject_next() || self.token.vault < amount {
            return err!(ErrorCode::TransferFailed);
        }
        self.token.vault -= amount;
        *self.token.balances.entry(self.owner).or_default() += amount;
        self.token.log.push((self.owner, Leg::Push(amount)));
        Ok(())
    }
}

pub const GENESIS: i64 = 1_700_000_000;

pub struct TestLedger {
    pub pool: StakingPool,
    pub records: HashMap<Pubkey, StakeRecord>,
    pub token: MockToken,
    pub now: i64,
}

impl TestLedger {
    pub fn new(reward_rate: u64) -> Self {
        Self {
            pool: StakingPool {
                reward_rate,
                staking_mint: Pubkey::new_unique(),
                ..Default::default()
            },
            records: HashMap::new(),
            token: MockToken::default(),
            now: GENESIS,
        }
    }

    /// Creates a participant holding `balance` tokens outside the ledger.
    pub fn participant(&mut self, balance: u64) -> Pubkey {
        let user = Pubkey::new_unique();
        self.token.balances.insert(user, balance);
        user
    }

    /// Adds reward liquidity straight into the vault.
    pub fn seed_vault(&mut self, amount: u64) {
        self.token.vault += amount;
    }

    pub fn advance(&mut self, seconds: i64) {
        self.now += seconds;
    }

    /// Get-or-default lookup: an absent record reads as zero-valued.
    pub fn record(&self, user: &Pubkey) -> StakeRecord {
        self.records.get(user).cloned().unwrap_or_else(|| StakeRecord {
            owner: *user,
            ..Default::default()
        })
    }

    pub fn balance(&self, user: &Pubkey) -> u64 {
        self.token.balance(user)
    }

    /// Rejects the `leg`-th transfer (0-based) of the next operation.
    pub fn fail_transfer_leg(&mut self, leg: usize) {
        self.token.fail_at = Some(self.token.log.len() + leg);
    }

    pub fn sum_of_stakes(&self) -> u64 {
        self.records.values().map(|r| r.amount_staked).sum()
    }

    pub fn execute<R>(
        &mut self,
        user: Pubkey,
        op: impl FnOnce(&mut StakingPool, &mut StakeRecord, &mut MockCustody<'_>, i64) -> Result<R>,
    ) -> Result<R> {
        let mut pool = self.pool.clone();
        let mut record = self.record(&user);
        let mut token = self.token.clone();

        let result = op(
            &mut pool,
            &mut record,
            &mut MockCustody {
                token: &mut token,
                owner: user,
            },
            self.now,
        );
        if result.is_ok() {
            self.pool = pool;
            self.records.insert(user, record);
            self.token = token;
        }
        self.token.fail_at = None;
        result
    }

    pub fn stake(&mut self, user: Pubkey, amount: u64) -> Result<u64> {
        self.execute(user, |pool, record, custody, now| {
            operations::stake(pool, record, custody, amount, now)
        })
    }

    pub fn unstake(&mut self, user: Pubkey) -> Result<u64> {
        self.execute(user, |pool, record, custody, now| {
            operations::unstake(pool, record, custody, now)
        })
    }

    pub fn update_reward(&mut self, user: Pubkey) -> Result<RewardAccrual> {
        self.execute(user, |pool, record, _, now| {
            operations::update_reward(pool, record, now)
        })
    }

    pub fn claim_reward(&mut self, user: Pubkey) -> Result<u64> {
        self.execute(user, |_, record, custody, _| {
            operations::claim_reward(record, custody)
        })
    }

    pub fn restake(&mut self, user: Pubkey) -> Result<Compounded> {
        self.execute(user, |pool, record, custody, now| {
            operations::restake(pool, record, custody, now)
        })
    }

    pub fn fund_rewards(&mut self, user: Pubkey, amount: u64) -> Result<()> {
        self.execute(user, |_, _, custody, _| {
            operations::fund_rewards(custody, amount)
        })
    }
}

/// Asserts that `result` failed with exactly `code`.
pub fn assert_error<T: std::fmt::Debug>(result: Result<T>, code: ErrorCode) {
    match result {
        Err(Error::AnchorError(e)) => assert_eq!(
            e.error_code_number,
            u32::from(code),
            "expected {:?}, got {}",
            code,
            e.error_name
        ),
        other => panic!("expected {:?}, got {:?}", code, other),
    }
}
