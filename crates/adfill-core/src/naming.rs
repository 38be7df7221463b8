//! Creative file naming
//!
//! Names are `id|name|timestamp`, capped at 128 characters. The display name
//! is stripped of `/` (it becomes part of a storage path) and truncated to
//! whatever room the id and a millisecond timestamp leave.

use adfill_gateways::{AdGroupId, Clock};

/// Maximum length of a creative file name
pub const MAX_FILE_NAME_LEN: usize = 128;

/// Separator between the id, name, and timestamp segments
const SEPARATOR: char = '|';

/// Synthesize the file name for one generated creative
///
/// The timestamp is read twice: once to size the length budget and once to
/// stamp the final name. The two reads may differ by a tick, so the stamped
/// value is not guaranteed to be the one that was budgeted for; callers must
/// not parse the name expecting any particular capture.
#[must_use]
pub fn creative_file_name(id: &AdGroupId, display_name: &str, clock: &dyn Clock) -> String {
    let sanitized: String = display_name.chars().filter(|c| *c != '/').collect();

    let budget_stamp = clock.now_millis().to_string();
    let allowed = MAX_FILE_NAME_LEN.saturating_sub(budget_stamp.len() + id.as_str().len() + 2);
    let truncated: String = sanitized.chars().take(allowed).collect();

    let stamp = clock.now_millis();
    format!("{id}{SEPARATOR}{truncated}{SEPARATOR}{stamp}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use adfill_gateways::ManualClock;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn short_name_is_kept_whole() {
        let clock = ManualClock::starting_at(1_700_000_000_000);
        let name = creative_file_name(&AdGroupId::new("42"), "Shoes Ad", &clock);
        assert_eq!(name, "42|Shoes Ad|1700000000000");
    }

    #[test]
    fn slashes_are_stripped() {
        let clock = ManualClock::starting_at(1_700_000_000_000);
        let name = creative_file_name(&AdGroupId::new("1"), "Spring/Summer/2026", &clock);
        assert!(!name.contains('/'));
        assert!(name.starts_with("1|SpringSummer2026|"));
    }

    #[test]
    fn long_names_are_truncated_to_the_cap() {
        let clock = ManualClock::starting_at(1_700_000_000_000);
        let long_name = "x".repeat(500);
        let name = creative_file_name(&AdGroupId::new("123456"), &long_name, &clock);

        assert_eq!(name.chars().count(), MAX_FILE_NAME_LEN);
        let segments: Vec<&str> = name.split('|').collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], "123456");
        assert_eq!(segments[2], "1700000000000");
    }

    #[test]
    fn timestamp_is_captured_twice() {
        // A clock that ticks on every read: the stamped value is one past
        // the budgeted value, and the name still fits the cap.
        struct TickingClock(AtomicU64);
        impl Clock for TickingClock {
            fn now_millis(&self) -> u64 {
                self.0.fetch_add(1, Ordering::SeqCst)
            }
        }

        let clock = TickingClock(AtomicU64::new(1_700_000_000_000));
        let name = creative_file_name(&AdGroupId::new("7"), &"y".repeat(300), &clock);

        assert!(name.ends_with("|1700000000001"));
        assert!(name.chars().count() <= MAX_FILE_NAME_LEN);
    }
}
