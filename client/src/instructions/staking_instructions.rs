use anchor_client::{Client, Cluster, Program};
use anyhow::Result;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Keypair, system_program};
use std::rc::Rc;

use token_staking::accounts as staking_accounts;
use token_staking::instruction as staking_instructions;

use crate::instructions::utils::{
    get_authority_address, get_pool_address, get_stake_record_address, get_vault_address,
};

use super::super::{read_keypair_file, ClientConfig};

fn staking_program(config: &ClientConfig, signer_path: &str) -> Result<Program<Rc<Keypair>>> {
    let signer = read_keypair_file(signer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(signer));
    Ok(client.program(config.token_staking_program)?)
}

/// Token account of `owner` for the staking mint.
fn owner_token_address(config: &ClientConfig, owner: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(owner, &config.staking_mint)
}

pub fn initialize_pool_instr(config: &ClientConfig, reward_rate: u64) -> Result<Vec<Instruction>> {
    let program = staking_program(config, &config.admin_path)?;
    let pool = get_pool_address(&config.staking_mint, &program.id());

    let instructions = program
        .request()
        .accounts(staking_accounts::InitializePool {
            owner: program.payer(),
            authority: get_authority_address(&program.id()),
            staking_mint: config.staking_mint,
            pool,
            vault: get_vault_address(&pool, &program.id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(staking_instructions::InitializePool { reward_rate })
        .instructions()?;
    Ok(instructions)
}

pub fn fund_rewards_instr(config: &ClientConfig, amount: u64) -> Result<Vec<Instruction>> {
    let program = staking_program(config, &config.payer_path)?;
    let pool = get_pool_address(&config.staking_mint, &program.id());

    let instructions = program
        .request()
        .accounts(staking_accounts::FundRewards {
            funder: program.payer(),
            pool,
            staking_mint: config.staking_mint,
            funder_token: owner_token_address(config, &program.payer()),
            vault: get_vault_address(&pool, &program.id()),
            token_program: spl_token::id(),
        })
        .args(staking_instructions::FundRewards { amount })
        .instructions()?;
    Ok(instructions)
}

pub fn stake_instr(config: &ClientConfig, amount: u64) -> Result<Vec<Instruction>> {
    let program = staking_program(config, &config.payer_path)?;
    let owner = program.payer();
    let pool = get_pool_address(&config.staking_mint, &program.id());

    let instructions = program
        .request()
        .accounts(staking_accounts::Stake {
            owner,
            pool,
            stake_record: get_stake_record_address(&pool, &owner, &program.id()),
            authority: get_authority_address(&program.id()),
            staking_mint: config.staking_mint,
            owner_token: owner_token_address(config, &owner),
            vault: get_vault_address(&pool, &program.id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(staking_instructions::Stake { amount })
        .instructions()?;
    Ok(instructions)
}

pub fn unstake_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let program = staking_program(config, &config.payer_path)?;
    let owner = program.payer();
    let pool = get_pool_address(&config.staking_mint, &program.id());

    let instructions = program
        .request()
        .accounts(staking_accounts::Unstake {
            owner,
            pool,
            stake_record: get_stake_record_address(&pool, &owner, &program.id()),
            authority: get_authority_address(&program.id()),
            staking_mint: config.staking_mint,
            owner_token: owner_token_address(config, &owner),
            vault: get_vault_address(&pool, &program.id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(staking_instructions::Unstake {})
        .instructions()?;
    Ok(instructions)
}

pub fn update_reward_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let program = staking_program(config, &config.payer_path)?;
    let owner = program.payer();
    let pool = get_pool_address(&config.staking_mint, &program.id());

    let instructions = program
        .request()
        .accounts(staking_accounts::UpdateReward {
            owner,
            pool,
            stake_record: get_stake_record_address(&pool, &owner, &program.id()),
            system_program: system_program::id(),
        })
        .args(staking_instructions::UpdateReward {})
        .instructions()?;
    Ok(instructions)
}

pub fn claim_reward_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let program = staking_program(config, &config.payer_path)?;
    let owner = program.payer();
    let pool = get_pool_address(&config.staking_mint, &program.id());

    let instructions = program
        .request()
        .accounts(staking_accounts::ClaimReward {
            owner,
            pool,
            stake_record: get_stake_record_address(&pool, &owner, &program.id()),
            authority: get_authority_address(&program.id()),
            staking_mint: config.staking_mint,
            owner_token: owner_token_address(config, &owner),
            vault: get_vault_address(&pool, &program.id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(staking_instructions::ClaimReward {})
        .instructions()?;
    Ok(instructions)
}

pub fn restake_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let program = staking_program(config, &config.payer_path)?;
    let owner = program.payer();
    let pool = get_pool_address(&config.staking_mint, &program.id());

    let instructions = program
        .request()
        .accounts(staking_accounts::Restake {
            owner,
            pool,
            stake_record: get_stake_record_address(&pool, &owner, &program.id()),
            authority: get_authority_address(&program.id()),
            staking_mint: config.staking_mint,
            owner_token: owner_token_address(config, &owner),
            vault: get_vault_address(&pool, &program.id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(staking_instructions::Restake {})
        .instructions()?;
    Ok(instructions)
}
