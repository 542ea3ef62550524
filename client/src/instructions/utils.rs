use anchor_lang::AccountDeserialize;
use anyhow::Result;
use solana_sdk::{account::Account, pubkey::Pubkey};
use token_staking::states::{STAKE_RECORD_SEED, STAKING_POOL_SEED};

pub fn deserialize_anchor_account<T: AccountDeserialize>(account: &Account) -> Result<T> {
    let mut data: &[u8] = &account.data;
    T::try_deserialize(&mut data).map_err(Into::into)
}

pub fn get_authority_address(program_id: &Pubkey) -> Pubkey {
    let (authority, _bump) =
        Pubkey::find_program_address(&[token_staking::AUTH_SEED.as_bytes()], program_id);
    authority
}

pub fn get_pool_address(staking_mint: &Pubkey, program_id: &Pubkey) -> Pubkey {
    let (pool, _bump) = Pubkey::find_program_address(
        &[STAKING_POOL_SEED.as_bytes(), staking_mint.as_ref()],
        program_id,
    );
    pool
}

pub fn get_vault_address(pool: &Pubkey, program_id: &Pubkey) -> Pubkey {
    let (vault, _bump) = Pubkey::find_program_address(
        &[token_staking::VAULT_SEED.as_bytes(), pool.as_ref()],
        program_id,
    );
    vault
}

pub fn get_stake_record_address(pool: &Pubkey, owner: &Pubkey, program_id: &Pubkey) -> Pubkey {
    let (stake_record, _bump) = Pubkey::find_program_address(
        &[
            STAKE_RECORD_SEED.as_bytes(),
            pool.as_ref(),
            owner.as_ref(),
        ],
        program_id,
    );
    stake_record
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::AccountSerialize;
    use token_staking::states::{StakeRecord, StakingPool};

    #[test]
    fn stake_record_address_is_per_owner() {
        let program_id = token_staking::id();
        let pool = get_pool_address(&Pubkey::new_unique(), &program_id);
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        let alice_record = get_stake_record_address(&pool, &alice, &program_id);
        assert_eq!(
            alice_record,
            get_stake_record_address(&pool, &alice, &program_id)
        );
        assert_ne!(
            alice_record,
            get_stake_record_address(&pool, &bob, &program_id)
        );
    }

    #[test]
    fn pool_and_vault_addresses_follow_seeds() {
        let program_id = token_staking::id();
        let mint = Pubkey::new_unique();
        let pool = get_pool_address(&mint, &program_id);
        let (expected, _) = Pubkey::find_program_address(
            &[STAKING_POOL_SEED.as_bytes(), mint.as_ref()],
            &program_id,
        );
        assert_eq!(pool, expected);

        let vault = get_vault_address(&pool, &program_id);
        assert_ne!(vault, pool);
        assert_ne!(vault, get_authority_address(&program_id));
    }

    #[test]
    fn deserializes_stake_record() {
        let record = StakeRecord {
            owner: Pubkey::new_unique(),
            amount_staked: 300,
            pending_rewards: 25,
            first_stake_time: 1_700_000_000,
            last_stake_time: 1_700_000_000,
            rewards_updated: true,
            ..Default::default()
        };
        let mut data = Vec::new();
        record.try_serialize(&mut data).unwrap();
        let account = Account {
            lamports: 1,
            data,
            owner: token_staking::id(),
            executable: false,
            rent_epoch: 0,
        };

        let decoded: StakeRecord = deserialize_anchor_account(&account).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn rejects_account_of_another_type() {
        let mut data = Vec::new();
        StakingPool::default().try_serialize(&mut data).unwrap();
        let account = Account {
            lamports: 1,
            data,
            owner: token_staking::id(),
            executable: false,
            rent_epoch: 0,
        };

        assert!(deserialize_anchor_account::<StakeRecord>(&account).is_err());
    }
}
