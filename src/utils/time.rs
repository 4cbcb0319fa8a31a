use chrono::{DateTime, SubsecRound, Utc};

/// Current instant at the store's timestamp precision (microseconds), so
/// values held in memory compare equal to what a round-trip returns.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_has_microsecond_precision() {
        assert_eq!(now().timestamp_subsec_nanos() % 1_000, 0);
    }
}
