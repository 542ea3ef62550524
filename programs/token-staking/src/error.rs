use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Address must not be the zero address")]
    AddressZero,

    #[msg("Reward rate must be greater than zero")]
    RewardRateZero,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Insufficient token balance for this operation")]
    InsufficientBalance,

    #[msg("No tokens are currently staked")]
    NoStakedAmount,

    #[msg("Rewards have not been updated since the last claim")]
    RewardsNotUpdated,

    #[msg("Rewards can only be updated a full day after the first stake")]
    UpdateNotEligible,

    #[msg("Rewards can only be updated once per day")]
    ClaimOncePerDay,

    #[msg("Unstake is locked until a full day has passed since the last stake")]
    UnstakeNotAllowed,

    #[msg("Restake is locked until a full day has passed since the last stake")]
    RestakeNotAllowed,

    #[msg("Token transfer failed")]
    TransferFailed,

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,

    #[msg("Account is not owned by the signer or pool")]
    InvalidOwner,
}
