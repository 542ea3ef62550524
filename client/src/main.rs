use anyhow::{format_err, Result};
use clap::{Parser, Subcommand};
use configparser::ini::Ini;
use serde::Serialize;
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use std::str::FromStr;
use token_staking::states::{StakeRecord, StakingPool};

mod instructions;
use instructions::rpc::*;
use instructions::staking_instructions::*;
use instructions::utils::*;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    http_url: String,
    ws_url: String,
    payer_path: String,
    admin_path: String,
    token_staking_program: Pubkey,
    staking_mint: Pubkey,
}

fn required(config: &Ini, key: &str) -> Result<String> {
    match config.get("Global", key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(format_err!("{} must not be empty", key)),
    }
}

fn required_pubkey(config: &Ini, key: &str) -> Result<Pubkey> {
    let value = required(config, key)?;
    Pubkey::from_str(&value).map_err(|e| format_err!("invalid {} {}: {}", key, value, e))
}

fn parse_cfg(config: &Ini) -> Result<ClientConfig> {
    Ok(ClientConfig {
        http_url: required(config, "http_url")?,
        ws_url: required(config, "ws_url")?,
        payer_path: required(config, "payer_path")?,
        admin_path: required(config, "admin_path")?,
        token_staking_program: required_pubkey(config, "token_staking_program")?,
        staking_mint: required_pubkey(config, "staking_mint")?,
    })
}

fn load_cfg(client_config: &str) -> Result<ClientConfig> {
    let mut config = Ini::new();
    config
        .load(client_config)
        .map_err(|e| format_err!("failed to load {}: {}", client_config, e))?;
    parse_cfg(&config)
}

fn read_keypair_file(s: &str) -> Result<Keypair> {
    solana_sdk::signature::read_keypair_file(s)
        .map_err(|_| format_err!("failed to read keypair from {}", s))
}

#[derive(Debug, Parser)]
pub struct Opts {
    #[clap(subcommand)]
    pub command: TokenStakingCommands,
}

#[derive(Debug, Subcommand)]
pub enum TokenStakingCommands {
    InitializePool {
        #[arg(long)]
        reward_rate: u64,
    },
    FundRewards {
        #[arg(long)]
        amount: u64,
    },
    Stake {
        #[arg(long)]
        amount: u64,
    },
    Unstake {},
    UpdateReward {},
    ClaimReward {},
    Restake {},
    StakeRecord {
        /// Defaults to the payer.
        #[arg(long)]
        owner: Option<Pubkey>,
    },
    RewardRate {},
    TotalStaked {},
}

/// Read-only view of a stake record as printed by the `stake-record` query.
#[derive(Debug, Default, PartialEq, Serialize)]
struct StakeRecordView {
    owner: String,
    amount_staked: u64,
    pending_rewards: u64,
    last_reward: u64,
    first_stake_time: i64,
    last_update_time: i64,
    last_stake_time: i64,
    rewards_updated: bool,
    /// `None` until the first stake.
    next_unlock_time: Option<i64>,
    next_update_time: Option<i64>,
}

impl StakeRecordView {
    fn new(owner: &Pubkey, record: &StakeRecord) -> Self {
        let staked_once = record.first_stake_time != 0;
        Self {
            owner: owner.to_string(),
            amount_staked: record.amount_staked,
            pending_rewards: record.pending_rewards,
            last_reward: record.last_reward,
            first_stake_time: record.first_stake_time,
            last_update_time: record.last_update_time,
            last_stake_time: record.last_stake_time,
            rewards_updated: record.rewards_updated,
            next_unlock_time: staked_once.then(|| record.next_unlock_time()),
            next_update_time: staked_once.then(|| record.next_update_time()),
        }
    }
}

fn submit(rpc_client: &RpcClient, instructions: &[Instruction], signer: &Keypair) -> Result<()> {
    let signers = vec![signer];
    let recent_hash = rpc_client.get_latest_blockhash()?;
    let txn = Transaction::new_signed_with_payer(
        instructions,
        Some(&signer.pubkey()),
        &signers,
        recent_hash,
    );
    let signature = send_txn(rpc_client, &txn, true)?;
    println!("{}", signature);
    Ok(())
}

fn load_pool(rpc_client: &RpcClient, config: &ClientConfig) -> Result<StakingPool> {
    let pool = get_pool_address(&config.staking_mint, &config.token_staking_program);
    let account = get_account(rpc_client, &pool)?
        .ok_or_else(|| format_err!("staking pool {} not found", pool))?;
    deserialize_anchor_account::<StakingPool>(&account)
}

fn main() -> Result<()> {
    let client_config = "client_config.ini";
    let pool_config = load_cfg(client_config)?;
    // cluster params.
    let payer = read_keypair_file(&pool_config.payer_path)?;
    // solana rpc client
    let rpc_client = RpcClient::new(pool_config.http_url.to_string());

    let opts = Opts::parse();
    match opts.command {
        TokenStakingCommands::InitializePool { reward_rate } => {
            let admin = read_keypair_file(&pool_config.admin_path)?;
            let ixs = initialize_pool_instr(&pool_config, reward_rate)?;
            submit(&rpc_client, &ixs, &admin)?;
        }
        TokenStakingCommands::FundRewards { amount } => {
            let ixs = fund_rewards_instr(&pool_config, amount)?;
            submit(&rpc_client, &ixs, &payer)?;
        }
        TokenStakingCommands::Stake { amount } => {
            let ixs = stake_instr(&pool_config, amount)?;
            submit(&rpc_client, &ixs, &payer)?;
        }
        TokenStakingCommands::Unstake {} => {
            let ixs = unstake_instr(&pool_config)?;
            submit(&rpc_client, &ixs, &payer)?;
        }
        TokenStakingCommands::UpdateReward {} => {
            let ixs = update_reward_instr(&pool_config)?;
            submit(&rpc_client, &ixs, &payer)?;
        }
        TokenStakingCommands::ClaimReward {} => {
            let ixs = claim_reward_instr(&pool_config)?;
            submit(&rpc_client, &ixs, &payer)?;
        }
        TokenStakingCommands::Restake {} => {
            let ixs = restake_instr(&pool_config)?;
            submit(&rpc_client, &ixs, &payer)?;
        }
        TokenStakingCommands::StakeRecord { owner } => {
            let owner = owner.unwrap_or_else(|| payer.pubkey());
            let pool = get_pool_address(&pool_config.staking_mint, &pool_config.token_staking_program);
            let address =
                get_stake_record_address(&pool, &owner, &pool_config.token_staking_program);
            // an absent record reads as zero-valued
            let record = match get_account(&rpc_client, &address)? {
                Some(account) => deserialize_anchor_account::<StakeRecord>(&account)?,
                None => StakeRecord::default(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&StakeRecordView::new(&owner, &record))?
            );
        }
        TokenStakingCommands::RewardRate {} => {
            let pool = load_pool(&rpc_client, &pool_config)?;
            println!("{}", pool.reward_rate());
        }
        TokenStakingCommands::TotalStaked {} => {
            let pool = load_pool(&rpc_client, &pool_config)?;
            println!("{}", pool.total_staked());
        }
    }
    Ok(())
}
