// A Stellar ledger closes roughly every 5 seconds.
pub const DAY_IN_LEDGERS: u32 = 17280;

// Instance entries (config, admin, pool counters) are touched on every call.
pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

// Pools and user positions can sit untouched for long periods while a lock runs.
pub const PERSISTENT_BUMP_AMOUNT: u32 = 60 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - 2 * DAY_IN_LEDGERS;
