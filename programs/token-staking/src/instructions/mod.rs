pub mod initialize_pool;
pub use initialize_pool::*;

pub mod fund_rewards;
pub use fund_rewards::*;

pub mod stake;
pub use stake::*;

pub mod unstake;
pub use unstake::*;

pub mod update_reward;
pub use update_reward::*;

pub mod claim_reward;
pub use claim_reward::*;

pub mod restake;
pub use restake::*;
