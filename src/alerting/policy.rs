/// PM2.5 level (µg/m³) at and above which a broadcast goes out. Below it,
/// automatic runs are suppressed to conserve the platform's push quota.
pub const PM25_ALERT_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub enum AlertDecision {
    /// Reading is below the threshold and no one asked explicitly: send nothing.
    Suppress,
    /// An explicit target was named; always deliver, regardless of the reading,
    /// so operators can verify delivery at any air-quality level.
    Unicast(String),
    /// Reading is at or above the threshold: deliver to every registered group.
    Broadcast,
}

pub fn decide(pm25: f64, explicit_target: Option<&str>) -> AlertDecision {
    if let Some(target) = explicit_target {
        return AlertDecision::Unicast(target.to_string());
    }
    if pm25 >= PM25_ALERT_THRESHOLD {
        AlertDecision::Broadcast
    } else {
        AlertDecision::Suppress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_reading_without_target_is_suppressed() {
        assert_eq!(decide(35.0, None), AlertDecision::Suppress);
        assert_eq!(decide(0.0, None), AlertDecision::Suppress);
        assert_eq!(decide(49.9, None), AlertDecision::Suppress);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(decide(50.0, None), AlertDecision::Broadcast);
    }

    #[test]
    fn high_reading_without_target_broadcasts() {
        assert_eq!(decide(62.0, None), AlertDecision::Broadcast);
        assert_eq!(decide(999.0, None), AlertDecision::Broadcast);
    }

    #[test]
    fn explicit_target_always_sends() {
        assert_eq!(
            decide(10.0, Some("U123")),
            AlertDecision::Unicast("U123".to_string())
        );
        assert_eq!(
            decide(80.0, Some("G1")),
            AlertDecision::Unicast("G1".to_string())
        );
    }
}
