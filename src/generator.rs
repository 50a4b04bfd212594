//! Synthetic event generation
//!
//! Events carry two random identifiers, a tenant and a millisecond
//! timestamp. Timestamps start one week in the past and advance by a
//! fixed step with every event produced by the same factory.

use std::collections::BTreeMap;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use uuid::Uuid;
use crate::core::value::Value;

/// Seconds between the timestamps of two consecutive events
pub const EVENT_STEP_SECS: i64 = 10;

/// Number of tenants drawn from in random mode
pub const TENANT_COUNT: i64 = 5;

/// Days before now at which the first event of a run is stamped
pub const LOOKBACK_DAYS: i64 = 7;

/// Stored field names
pub const FIELD_DOCUMENT_ID: &str = "_id";
pub const FIELD_EVENT_ID: &str = "EventID";
pub const FIELD_TENANT_ID: &str = "TenantID";
pub const FIELD_TIMESTAMP: &str = "timestamp";

/// Distance between the timestamps of two consecutive events
pub fn event_step() -> Duration {
    Duration::seconds(EVENT_STEP_SECS)
}

/// Generate a random identifier: 128 random bits as 32 uppercase hex digits
pub fn new_identifier() -> String {
    format!("{:032X}", Uuid::new_v4().as_u128())
}

/// How events are assigned to tenants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantMode {
    /// Uniform draw in `[0, TENANT_COUNT)`
    Random,
    /// Every event goes to the same tenant
    Fixed(i64),
}

impl TenantMode {
    fn pick(&self) -> i64 {
        match self {
            TenantMode::Random => rand::thread_rng().gen_range(0..TENANT_COUNT),
            TenantMode::Fixed(tenant) => *tenant,
        }
    }
}

/// One generated event record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticEvent {
    pub document_id: String,
    pub event_id: String,
    pub tenant_id: i64,
    pub timestamp_millis: i64,
}

impl SyntheticEvent {
    /// Convert the event into the field map that gets stored
    pub fn into_fields(self) -> BTreeMap<String, Value> {
        let mut fields = BTreeMap::new();
        fields.insert(FIELD_DOCUMENT_ID.to_string(), Value::String(self.document_id));
        fields.insert(FIELD_EVENT_ID.to_string(), Value::String(self.event_id));
        fields.insert(FIELD_TENANT_ID.to_string(), Value::Integer(self.tenant_id));
        fields.insert(FIELD_TIMESTAMP.to_string(), Value::Integer(self.timestamp_millis));
        fields
    }
}

/// Produces events with a running base timestamp
#[derive(Debug, Clone)]
pub struct EventFactory {
    base: DateTime<Utc>,
    tenant_mode: TenantMode,
}

impl EventFactory {
    /// Create a factory whose first event is stamped `base`
    pub fn new(base: DateTime<Utc>, tenant_mode: TenantMode) -> Self {
        EventFactory { base, tenant_mode }
    }

    /// Create a factory whose first event is stamped one week ago
    pub fn starting_now(tenant_mode: TenantMode) -> Self {
        Self::new(Utc::now() - Duration::days(LOOKBACK_DAYS), tenant_mode)
    }

    /// Timestamp the next event will carry
    pub fn base(&self) -> DateTime<Utc> {
        self.base
    }

    /// Build an event stamped `base` and return it with the next base
    pub fn next_from(&self, base: DateTime<Utc>) -> (SyntheticEvent, DateTime<Utc>) {
        let event = SyntheticEvent {
            document_id: new_identifier(),
            event_id: new_identifier(),
            tenant_id: self.tenant_mode.pick(),
            timestamp_millis: base.timestamp_millis(),
        };
        (event, base + event_step())
    }

    /// Build the next event and advance the base timestamp
    pub fn next(&mut self) -> SyntheticEvent {
        let (event, next_base) = self.next_from(self.base);
        self.base = next_base;
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use chrono::TimeZone;

    #[test]
    fn test_identifier_format() {
        let id = new_identifier();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn test_identifiers_do_not_repeat() {
        let mut seen = HashSet::new();
        let mut previous = new_identifier();
        for _ in 0..10_000 {
            let id = new_identifier();
            assert_ne!(id, previous);
            assert!(seen.insert(id.clone()));
            previous = id;
        }
    }

    #[test]
    fn test_event_ids_are_independent() {
        let mut factory = EventFactory::starting_now(TenantMode::Random);
        for _ in 0..1000 {
            let event = factory.next();
            assert_ne!(event.document_id, event.event_id);
        }
    }

    #[test]
    fn test_timestamps_advance_by_step() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut factory = EventFactory::new(start, TenantMode::Fixed(1));

        let stamps: Vec<i64> = (0..50).map(|_| factory.next().timestamp_millis).collect();
        assert_eq!(stamps[0], start.timestamp_millis());
        for pair in stamps.windows(2) {
            assert_eq!(pair[1] - pair[0], event_step().num_milliseconds());
        }
        assert_eq!(factory.base(), start + event_step() * 50);
    }

    #[test]
    fn test_next_from_is_pure_on_base() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let factory = EventFactory::new(start, TenantMode::Fixed(3));

        let (event, next) = factory.next_from(start);
        assert_eq!(event.timestamp_millis, start.timestamp_millis());
        assert_eq!(event.tenant_id, 3);
        assert_eq!(next - start, event_step());
        assert_eq!(factory.base(), start);
    }

    #[test]
    fn test_starting_now_looks_back_a_week() {
        let before = Utc::now() - Duration::days(LOOKBACK_DAYS);
        let factory = EventFactory::starting_now(TenantMode::Random);
        let after = Utc::now() - Duration::days(LOOKBACK_DAYS);
        assert!(factory.base() >= before && factory.base() <= after);
    }

    #[test]
    fn test_random_tenants_in_range() {
        let mut factory = EventFactory::starting_now(TenantMode::Random);
        let tenants: HashSet<i64> = (0..2000).map(|_| factory.next().tenant_id).collect();
        assert!(tenants.iter().all(|t| (0..TENANT_COUNT).contains(t)));
        // 2000 draws over 5 tenants hit every one of them
        assert_eq!(tenants.len(), TENANT_COUNT as usize);
    }

    #[test]
    fn test_into_fields() {
        let event = SyntheticEvent {
            document_id: "A".to_string(),
            event_id: "B".to_string(),
            tenant_id: 4,
            timestamp_millis: 1_000,
        };
        let fields = event.into_fields();
        assert_eq!(fields.get(FIELD_DOCUMENT_ID), Some(&Value::from("A")));
        assert_eq!(fields.get(FIELD_EVENT_ID), Some(&Value::from("B")));
        assert_eq!(fields.get(FIELD_TENANT_ID), Some(&Value::Integer(4)));
        assert_eq!(fields.get(FIELD_TIMESTAMP), Some(&Value::Integer(1_000)));
    }
}
