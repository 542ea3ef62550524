pub mod events;
pub use events::*;

pub mod staking_pool;
pub use staking_pool::*;

pub mod stake_record;
pub use stake_record::*;
