pub mod custody;
pub use custody::*;

pub mod operations;
pub use operations::*;

#[cfg(test)]
pub(crate) mod harness;
