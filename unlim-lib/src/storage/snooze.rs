use crate::storage::database::{KeyValueStore, StoreError};
use chrono::{DateTime, TimeZone, Utc};
use log::warn;

/// The "do not prompt before" instant, stored as decimal epoch milliseconds.
pub struct SnoozeRecord<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SnoozeRecord<S> {
    pub fn new(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    /// Unreadable or unparseable values count as no snooze.
    pub fn snoozed_until(&self) -> Option<i64> {
        let raw = match self.store.get(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Could not read snooze record: {}", e);
                return None;
            }
        };
        let until = parse_leading_int(&raw);
        if until.is_none() {
            warn!("Ignoring snooze record '{}'", raw);
        }
        until
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.snoozed_until()
            .is_some_and(|until| until > now.timestamp_millis())
    }

    pub fn snooze_until(&self, until_ms: i64) -> Result<(), StoreError> {
        self.store.set(&self.key, &until_ms.to_string())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(&self.key)
    }
}

/// Reads a base-10 integer prefix the way `parseInt(value, 10)` does: leading
/// whitespace and an optional sign, then digits up to the first non-digit.
/// "1700000000000abc" gives 1700000000000 and "1.7e12" gives 1. Values too large
/// for an i64 saturate.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: Vec<i64> = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| i64::from(b - b'0'))
        .collect();
    if digits.is_empty() {
        return None;
    }
    let value = digits.iter().fold(0i64, |acc, digit| {
        let acc = acc.saturating_mul(10);
        if negative {
            acc.saturating_sub(*digit)
        } else {
            acc.saturating_add(*digit)
        }
    });
    Some(value)
}

pub fn format_timestamp(ms: i64) -> String {
    match Utc.timestamp_millis_opt(ms).single() {
        Some(date) => date.to_rfc3339(),
        None => ms.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database::MemoryStore;
    use chrono::Duration;

    const KEY: &str = "unlimCloudUpdateSnooze";

    #[test]
    fn test_active_until_expiry() {
        let now = Utc::now();
        let store = MemoryStore::new();
        let record = SnoozeRecord::new(&store, KEY);
        record
            .snooze_until((now + Duration::hours(1)).timestamp_millis())
            .unwrap();

        assert!(record.is_active(now));
        assert!(record.is_active(now + Duration::minutes(59)));
        assert!(!record.is_active(now + Duration::hours(2)));
    }

    #[test]
    fn test_expiry_instant_is_not_snoozed() {
        let now = Utc::now();
        let store = MemoryStore::with_value(KEY, &now.timestamp_millis().to_string());
        assert!(!SnoozeRecord::new(&store, KEY).is_active(now));
    }

    #[test]
    fn test_stored_as_decimal_string() {
        let store = MemoryStore::new();
        SnoozeRecord::new(&store, KEY).snooze_until(1_700_000_000_000).unwrap();
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("1700000000000"));
    }

    #[test]
    fn test_garbage_value_is_ignored() {
        let store = MemoryStore::with_value(KEY, "tomorrow");
        let record = SnoozeRecord::new(&store, KEY);
        assert_eq!(record.snoozed_until(), None);
        assert!(!record.is_active(Utc::now()));
    }

    #[test]
    fn test_trailing_junk_is_ignored() {
        let store = MemoryStore::with_value(KEY, "1700000000000abc");
        assert_eq!(
            SnoozeRecord::new(&store, KEY).snoozed_until(),
            Some(1_700_000_000_000)
        );
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("1.7e12"), Some(1));
        assert_eq!(parse_leading_int("  42\n"), Some(42));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("-5ms"), Some(-5));
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::with_value(KEY, "99999999999999");
        let record = SnoozeRecord::new(&store, KEY);
        assert!(record.is_active(Utc::now()));
        record.clear().unwrap();
        assert_eq!(record.snoozed_until(), None);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00+00:00");
    }
}
