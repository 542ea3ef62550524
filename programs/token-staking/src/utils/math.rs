//! 256-bit intermediates for reward products that exceed `u128`.

#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]
#![allow(clippy::manual_range_contains)]

use uint::construct_uint;

construct_uint! {
    pub struct U256(4);
}

impl U256 {
    /// Narrows to `u64`, or `None` when the value does not fit.
    pub fn checked_as_u64(self) -> Option<u64> {
        if self > U256::from(u64::MAX) {
            None
        } else {
            Some(self.as_u64())
        }
    }
}
