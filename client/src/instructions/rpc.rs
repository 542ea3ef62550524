use anyhow::Result;
use solana_client::{rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig};
use solana_sdk::{
    account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey,
    signature::Signature, transaction::Transaction,
};

/// Fetches an account, returning `None` when it does not exist yet.
pub fn get_account(client: &RpcClient, addr: &Pubkey) -> Result<Option<Account>> {
    let account = client
        .get_account_with_commitment(addr, CommitmentConfig::processed())?
        .value;
    Ok(account)
}

/// Preflight simulation stays on so a rejected instruction surfaces the
/// program's error message and logs.
fn send_config() -> RpcSendTransactionConfig {
    RpcSendTransactionConfig {
        skip_preflight: false,
        preflight_commitment: Some(CommitmentConfig::processed().commitment),
        ..RpcSendTransactionConfig::default()
    }
}

pub fn send_txn(client: &RpcClient, txn: &Transaction, wait_confirm: bool) -> Result<Signature> {
    Ok(client.send_and_confirm_transaction_with_spinner_and_config(
        txn,
        if wait_confirm {
            CommitmentConfig::confirmed()
        } else {
            CommitmentConfig::processed()
        },
        send_config(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transactions_are_simulated_before_sending() {
        let config = send_config();
        assert!(!config.skip_preflight);
        assert_eq!(
            config.preflight_commitment,
            Some(CommitmentConfig::processed().commitment)
        );
    }
}
