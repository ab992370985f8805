use std::sync::atomic::{AtomicU64, Ordering};

/// First fake snowflake handed out; well below any real Discord id.
const SNOWFLAKE_BASE: u64 = 100_000;

static NEXT_SNOWFLAKE: AtomicU64 = AtomicU64::new(SNOWFLAKE_BASE);

/// Returns a fake snowflake no other factory call in this process has used.
pub fn next_snowflake() -> u64 {
    NEXT_SNOWFLAKE.fetch_add(1, Ordering::Relaxed)
}
