//! Zombie detection
//!
//! An instance is a zombie when it sits in the runner security group, carries
//! no tags at all and has been up for at least `min_age_minutes`. Autoscaling
//! runners tag their machines shortly after launch, so an untagged machine in
//! that group past the grace period has been orphaned.
//!
//! Everything here is pure: the caller captures `now` once per run and passes
//! it in, so every record in a scan is judged against the same instant.

use crate::error::{ConfigError, Result};
use crate::inventory::{InstanceId, InstanceRecord};
use crate::utils::age_minutes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What makes an instance a zombie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZombieCriteria {
    /// Exact, case-sensitive security group name
    pub target_group_name: String,
    /// Inclusive lower bound on instance age
    pub min_age_minutes: f64,
}

impl ZombieCriteria {
    pub fn new(target_group_name: impl Into<String>, min_age_minutes: f64) -> Result<Self> {
        let criteria = Self {
            target_group_name: target_group_name.into(),
            min_age_minutes,
        };
        criteria.validate()?;
        Ok(criteria)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_group_name.trim().is_empty() {
            return Err(ConfigError::MissingField("criteria.target_group_name".to_string()).into());
        }
        if !self.min_age_minutes.is_finite() || self.min_age_minutes < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "criteria.min_age_minutes".to_string(),
                reason: format!(
                    "must be a finite, non-negative number of minutes (got {})",
                    self.min_age_minutes
                ),
            }
            .into());
        }
        Ok(())
    }
}

/// Check whether a single instance matches the zombie heuristic
pub fn is_zombie(record: &InstanceRecord, criteria: &ZombieCriteria, now: DateTime<Utc>) -> bool {
    let in_group = record
        .security_groups
        .iter()
        .any(|g| *g == criteria.target_group_name);
    if !in_group || !record.tags.is_empty() {
        return false;
    }

    match record.launch_time {
        Some(launched) => age_minutes(launched, now) >= criteria.min_age_minutes,
        None => false,
    }
}

/// Identifiers of all zombies in `instances`, in input order
pub fn scan(
    instances: &[InstanceRecord],
    criteria: &ZombieCriteria,
    now: DateTime<Utc>,
) -> Vec<InstanceId> {
    instances
        .iter()
        .filter(|r| is_zombie(r, criteria, now))
        .map(|r| r.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::InstanceState;
    use chrono::Duration;
    use std::collections::BTreeMap;

    const GROUP: &str = "toolbox-np-sg-gitrunnerautoscalingdis";

    fn record(id: &str, groups: &[&str], tags: &[(&str, &str)], age: Duration) -> InstanceRecord {
        InstanceRecord {
            id: id.to_string(),
            private_ip: Some("10.0.0.1".to_string()),
            launch_time: Some(now() - age),
            security_groups: groups.iter().map(|g| g.to_string()).collect(),
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            state: InstanceState::Running,
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn criteria() -> ZombieCriteria {
        ZombieCriteria::new(GROUP, 15.0).unwrap()
    }

    #[test]
    fn test_untagged_old_instance_in_group_is_zombie() {
        let r = record("i-1", &[GROUP], &[], Duration::minutes(20));
        assert!(is_zombie(&r, &criteria(), now()));
    }

    #[test]
    fn test_any_tag_disqualifies() {
        let r = record("i-1", &[GROUP], &[("aws:autoscaling:groupName", "x")], Duration::hours(5));
        assert!(!is_zombie(&r, &criteria(), now()));
    }

    #[test]
    fn test_group_match_is_exact() {
        let c = criteria();
        for group in [
            "toolbox-np-sg-gitrunner",
            "TOOLBOX-NP-SG-GITRUNNERAUTOSCALINGDIS",
            " toolbox-np-sg-gitrunnerautoscalingdis",
            "toolbox-np-sg-gitrunnerautoscalingdis-2",
        ] {
            let r = record("i-1", &[group], &[], Duration::hours(1));
            assert!(!is_zombie(&r, &c, now()), "{group} should not match");
        }
    }

    #[test]
    fn test_group_found_among_several() {
        let r = record("i-1", &["default", GROUP, GROUP], &[], Duration::hours(1));
        assert!(is_zombie(&r, &criteria(), now()));
    }

    #[test]
    fn test_no_security_groups_never_matches() {
        let r = record("i-1", &[], &[], Duration::hours(1));
        assert!(!is_zombie(&r, &criteria(), now()));
    }

    #[test]
    fn test_age_boundary_is_inclusive() {
        let c = criteria();
        let at = record("i-1", &[GROUP], &[], Duration::minutes(15));
        assert!(is_zombie(&at, &c, now()));

        let below = record("i-2", &[GROUP], &[], Duration::minutes(15) - Duration::milliseconds(1));
        assert!(!is_zombie(&below, &c, now()));

        let well_below = record("i-3", &[GROUP], &[], Duration::seconds(894));
        assert!(!is_zombie(&well_below, &c, now()));
    }

    #[test]
    fn test_missing_launch_time_is_not_zombie() {
        let mut r = record("i-1", &[GROUP], &[], Duration::hours(1));
        r.launch_time = None;
        assert!(!is_zombie(&r, &criteria(), now()));
    }

    #[test]
    fn test_state_is_ignored_by_predicate() {
        let mut r = record("i-1", &[GROUP], &[], Duration::hours(1));
        r.state = InstanceState::ShuttingDown;
        assert!(is_zombie(&r, &criteria(), now()));
    }

    #[test]
    fn test_scan_empty() {
        assert!(scan(&[], &criteria(), now()).is_empty());
    }

    #[test]
    fn test_scan_preserves_input_order() {
        let instances = vec![
            record("i-c", &[GROUP], &[], Duration::minutes(40)),
            record("i-a", &[GROUP], &[("Name", "runner")], Duration::minutes(40)),
            record("i-b", &[GROUP], &[], Duration::minutes(16)),
            record("i-z", &["other"], &[], Duration::minutes(40)),
            record("i-0", &[GROUP], &[], Duration::minutes(90)),
        ];
        assert_eq!(scan(&instances, &criteria(), now()), vec!["i-c", "i-b", "i-0"]);
    }

    #[test]
    fn test_criteria_validation() {
        assert!(ZombieCriteria::new("", 15.0).is_err());
        assert!(ZombieCriteria::new("   ", 15.0).is_err());
        assert!(ZombieCriteria::new(GROUP, -1.0).is_err());
        assert!(ZombieCriteria::new(GROUP, f64::NAN).is_err());
        assert!(ZombieCriteria::new(GROUP, f64::INFINITY).is_err());
        assert!(ZombieCriteria::new(GROUP, 0.0).is_ok());
    }
}
