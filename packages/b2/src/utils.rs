use soroban_sdk::{contracttype, Address};

/// Fixed point scale of `acc_reward_per_share` and `reward_debt`.
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

/// Pending two step handover of the admin role.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChange {
    pub new_admin: Address,
    /// Ledger timestamp after which the proposal can no longer be accepted.
    pub time_limit: Option<u64>,
}

impl AdminChange {
    pub fn is_expired(&self, now: u64) -> bool {
        matches!(self.time_limit, Some(limit) if now > limit)
    }
}

/// `value * PRECISION / divisor`, `None` on overflow or a zero divisor.
pub fn scale_div(value: i128, divisor: i128) -> Option<i128> {
    value.checked_mul(PRECISION)?.checked_div(divisor)
}

/// `value * scaled / PRECISION`, the inverse of [`scale_div`].
pub fn unscale_mul(value: i128, scaled: i128) -> Option<i128> {
    value.checked_mul(scaled)?.checked_div(PRECISION)
}
