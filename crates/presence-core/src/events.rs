//! Gap-tolerant call-event detection over one day's presence minutes.

// ── DayCounts ─────────────────────────────────────────────────────────────────

/// Presence-minute and call-event counts for a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayCounts {
    /// Number of distinct presence minutes.
    pub presence_minutes: u64,
    /// Number of call events (always `<= presence_minutes`).
    pub call_events: u64,
}

// ── CallEventDetector ─────────────────────────────────────────────────────────

/// Stateless run detection with a fixed gap tolerance.
#[derive(Debug, Clone, Copy)]
pub struct CallEventDetector {
    max_gap_minutes: i64,
}

impl CallEventDetector {
    pub fn new(max_gap_minutes: i64) -> Self {
        Self { max_gap_minutes }
    }

    /// Count runs in a **sorted, deduplicated** slice of minute indices.
    ///
    /// A new event starts at the first minute and wherever the distance to
    /// the previous minute exceeds the gap tolerance. A distance equal to the
    /// tolerance continues the current event.
    pub fn count_events(&self, sorted_minutes: &[i64]) -> u64 {
        if sorted_minutes.is_empty() {
            return 0;
        }
        let breaks = sorted_minutes
            .windows(2)
            // A gap too wide for i64 is certainly above the tolerance.
            .filter(|pair| {
                pair[1]
                    .checked_sub(pair[0])
                    .map_or(true, |gap| gap > self.max_gap_minutes)
            })
            .count();
        1 + breaks as u64
    }

    /// Deduplicate and sort `minutes` in place, then count minutes and events.
    pub fn summarize_day(&self, minutes: &mut Vec<i64>) -> DayCounts {
        minutes.sort_unstable();
        minutes.dedup();
        DayCounts {
            presence_minutes: minutes.len() as u64,
            call_events: self.count_events(minutes),
        }
    }
}

impl Default for CallEventDetector {
    fn default() -> Self {
        Self::new(crate::models::DEFAULT_MAX_GAP_MINUTES)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(minutes: &[i64], max_gap: i64) -> DayCounts {
        let mut owned = minutes.to_vec();
        CallEventDetector::new(max_gap).summarize_day(&mut owned)
    }

    // ── count_events ──────────────────────────────────────────────────────────

    #[test]
    fn test_empty_day_has_no_events() {
        assert_eq!(CallEventDetector::default().count_events(&[]), 0);
    }

    #[test]
    fn test_single_minute_is_one_event() {
        assert_eq!(CallEventDetector::default().count_events(&[720]), 1);
    }

    #[test]
    fn test_gap_equal_to_tolerance_continues_event() {
        let c = counts(&[10, 11], 1);
        assert_eq!(c.presence_minutes, 2);
        assert_eq!(c.call_events, 1);
    }

    #[test]
    fn test_gap_above_tolerance_starts_new_event() {
        let c = counts(&[10, 12], 1);
        assert_eq!(c.presence_minutes, 2);
        assert_eq!(c.call_events, 2);
    }

    #[test]
    fn test_wider_tolerance_merges_runs() {
        assert_eq!(counts(&[10, 12, 15, 30], 3).call_events, 2);
        assert_eq!(counts(&[10, 12, 15, 30], 15).call_events, 1);
    }

    #[test]
    fn test_zero_tolerance_counts_every_minute() {
        let c = counts(&[1, 2, 3], 0);
        assert_eq!(c.presence_minutes, 3);
        assert_eq!(c.call_events, 3);
    }

    #[test]
    fn test_extreme_minutes_do_not_overflow() {
        let c = counts(&[i64::MIN, 0, i64::MAX], 1);
        assert_eq!(c.presence_minutes, 3);
        assert_eq!(c.call_events, 3);
    }

    // ── summarize_day ─────────────────────────────────────────────────────────

    #[test]
    fn test_duplicates_collapse() {
        let c = counts(&[5, 5, 5, 6], 1);
        assert_eq!(c.presence_minutes, 2);
        assert_eq!(c.call_events, 1);
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let c = counts(&[100, 2, 0, 1], 1);
        assert_eq!(c.presence_minutes, 4);
        assert_eq!(c.call_events, 2);
    }

    #[test]
    fn test_summarize_day_leaves_minutes_sorted_and_unique() {
        let mut minutes = vec![9, 3, 3, 7];
        CallEventDetector::default().summarize_day(&mut minutes);
        assert_eq!(minutes, vec![3, 7, 9]);
    }

    #[test]
    fn test_events_never_exceed_minutes() {
        let samples: [&[i64]; 4] = [&[], &[0], &[0, 2, 4, 6], &[1439, 0, 720, 721]];
        for sample in samples {
            let c = counts(sample, 1);
            assert!(c.call_events <= c.presence_minutes);
            assert_eq!(c.call_events == 0, c.presence_minutes == 0);
        }
    }
}
