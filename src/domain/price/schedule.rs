//! Hourly price selection: current slot, outlook, cheapest hour, run window.
//!
//! All functions are pure over a sorted entry list and an explicit `now`.
//! "Local" time is the offset of the first entry, i.e. the offset the
//! upstream publishes its market day in.

use super::PriceEntry;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike, Utc};

/// Default run-window threshold in cents per kWh.
pub const RUN_THRESHOLD_CENTS: f64 = 7.0;

/// Consecutive hours a run window spans.
pub const RUN_WINDOW_HOURS: usize = 3;

/// Local hour from which the next day's prices are published.
pub const TOMORROW_PUBLISH_HOUR: u32 = 14;

/// Maximum number of tomorrow's window starts offered.
const MAX_TOMORROW_STARTS: usize = 3;

/// Recommendation for when to run a three-hour appliance cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RunWindowAdvice {
    /// The window starting this hour is cheap.
    NowIsGood,
    /// Earliest cheap window later today.
    LaterToday(DateTime<FixedOffset>),
    /// Cheap window starts tomorrow, earliest first.
    Tomorrow(Vec<DateTime<FixedOffset>>),
    /// Fewer than three hours of prices remain today.
    NoWindowRemaining,
    NoGoodTimeToday,
    NoGoodTimeTodayOrTomorrow,
}

/// The start of the current local hour.
fn local_hour_start(offset: FixedOffset, now: DateTime<Utc>) -> DateTime<FixedOffset> {
    let local = now.with_timezone(&offset);
    local
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(local)
}

fn local_offset(entries: &[PriceEntry]) -> Option<FixedOffset> {
    entries.first().map(|e| *e.starts_at.offset())
}

fn local_date(entry: &PriceEntry, offset: FixedOffset) -> NaiveDate {
    entry.starts_at.with_timezone(&offset).date_naive()
}

/// Index of the entry covering `now`.
///
/// Exact hour match first; otherwise the entry before the first later one.
/// Clamps to the first entry when all are later and to the last when all are
/// earlier. `None` only for an empty list.
pub fn current_index(entries: &[PriceEntry], now: DateTime<Utc>) -> Option<usize> {
    let offset = local_offset(entries)?;
    let hour_start = local_hour_start(offset, now);

    for (i, entry) in entries.iter().enumerate() {
        if entry.starts_at == hour_start {
            return Some(i);
        }
        if entry.starts_at > hour_start {
            return Some(i.saturating_sub(1));
        }
    }
    Some(entries.len() - 1)
}

/// Up to `hours` entries starting at the current one.
pub fn upcoming(entries: &[PriceEntry], now: DateTime<Utc>, hours: usize) -> &[PriceEntry] {
    match current_index(entries, now) {
        Some(i) => &entries[i..(i + hours).min(entries.len())],
        None => &[],
    }
}

/// Cheapest entry from the current hour to the end of the local day.
///
/// Ties resolve to the earliest slot.
pub fn cheapest_remaining_today(entries: &[PriceEntry], now: DateTime<Utc>) -> Option<&PriceEntry> {
    let offset = local_offset(entries)?;
    let hour_start = local_hour_start(offset, now);
    let today = hour_start.date_naive();

    entries
        .iter()
        .filter(|e| local_date(e, offset) == today && e.starts_at >= hour_start)
        .fold(None, |best: Option<&PriceEntry>, e| match best {
            Some(b) if b.price <= e.price => Some(b),
            _ => Some(e),
        })
}

/// Start indices of every qualifying window in `slots`.
///
/// A window spans consecutive clock hours; a missing hour breaks it.
fn window_starts<'a>(
    slots: &'a [&'a PriceEntry],
    threshold: f64,
) -> impl Iterator<Item = usize> + 'a {
    slots
        .windows(RUN_WINDOW_HOURS)
        .enumerate()
        .filter(move |(_, w)| {
            w.iter().all(|e| e.price.cents_per_kwh() <= threshold)
                && w.windows(2)
                    .all(|pair| pair[1].starts_at - pair[0].starts_at == Duration::hours(1))
        })
        .map(|(i, _)| i)
}

/// Find a three-hour window where every hour is at or below `threshold`.
pub fn run_window(entries: &[PriceEntry], now: DateTime<Utc>, threshold: f64) -> RunWindowAdvice {
    let Some(offset) = local_offset(entries) else {
        return RunWindowAdvice::NoWindowRemaining;
    };
    let hour_start = local_hour_start(offset, now);
    let today = hour_start.date_naive();

    let remaining: Vec<&PriceEntry> = entries
        .iter()
        .filter(|e| local_date(e, offset) == today && e.starts_at >= hour_start)
        .collect();

    if remaining.len() >= RUN_WINDOW_HOURS {
        if let Some(start) = window_starts(&remaining, threshold).next() {
            if start == 0 && remaining[0].starts_at == hour_start {
                return RunWindowAdvice::NowIsGood;
            }
            return RunWindowAdvice::LaterToday(remaining[start].starts_at.with_timezone(&offset));
        }
    }

    if hour_start.hour() >= TOMORROW_PUBLISH_HOUR {
        let tomorrow_date = today + Duration::days(1);
        let tomorrow: Vec<&PriceEntry> = entries
            .iter()
            .filter(|e| local_date(e, offset) == tomorrow_date)
            .collect();

        let starts: Vec<DateTime<FixedOffset>> = window_starts(&tomorrow, threshold)
            .take(MAX_TOMORROW_STARTS)
            .map(|i| tomorrow[i].starts_at.with_timezone(&offset))
            .collect();

        if !starts.is_empty() {
            return RunWindowAdvice::Tomorrow(starts);
        }
        if tomorrow.len() >= RUN_WINDOW_HOURS {
            return RunWindowAdvice::NoGoodTimeTodayOrTomorrow;
        }
    }

    if remaining.len() < RUN_WINDOW_HOURS {
        RunWindowAdvice::NoWindowRemaining
    } else {
        RunWindowAdvice::NoGoodTimeToday
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::SpotPrice;
    use chrono::TimeZone;

    fn helsinki() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    /// Hourly entries starting at local `day` `first_hour`:00 (+02:00).
    fn entries_from(day: u32, first_hour: u32, cents: &[f64]) -> Vec<PriceEntry> {
        let start = helsinki()
            .with_ymd_and_hms(2024, 1, day, first_hour, 0, 0)
            .unwrap();
        cents
            .iter()
            .enumerate()
            .map(|(i, c)| PriceEntry {
                starts_at: start + Duration::hours(i as i64),
                price: SpotPrice::new(*c),
            })
            .collect()
    }

    /// `now` at local 2024-01-`day` `hour`:`minute` (+02:00).
    fn local_now(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        helsinki()
            .with_ymd_and_hms(2024, 1, day, hour, minute, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_current_index_exact_hour() {
        let entries = entries_from(15, 0, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(current_index(&entries, local_now(15, 2, 45)), Some(2));
    }

    #[test]
    fn test_current_index_between_entries_uses_previous() {
        let mut entries = entries_from(15, 0, &[1.0, 2.0, 3.0, 4.0]);
        entries.remove(2);
        assert_eq!(current_index(&entries, local_now(15, 2, 10)), Some(1));
    }

    #[test]
    fn test_current_index_clamps() {
        let entries = entries_from(15, 10, &[1.0, 2.0]);
        assert_eq!(current_index(&entries, local_now(15, 3, 0)), Some(0));
        assert_eq!(current_index(&entries, local_now(15, 20, 0)), Some(1));
        assert_eq!(current_index(&[], local_now(15, 20, 0)), None);
    }

    #[test]
    fn test_current_index_across_offsets() {
        // Same instants published in UTC; now given in +02:00 terms.
        let start = Utc.with_ymd_and_hms(2024, 1, 14, 22, 0, 0).unwrap().fixed_offset();
        let entries: Vec<PriceEntry> = (0..4)
            .map(|i| PriceEntry {
                starts_at: start + Duration::hours(i),
                price: SpotPrice::new(i as f64),
            })
            .collect();
        assert_eq!(current_index(&entries, local_now(15, 1, 30)), Some(1));
    }

    #[test]
    fn test_upcoming_truncates_at_end() {
        let entries = entries_from(15, 20, &[1.0, 2.0, 3.0, 4.0]);
        let next = upcoming(&entries, local_now(15, 22, 5), 4);
        assert_eq!(next.len(), 2);
        assert_eq!(next[0].price, SpotPrice::new(3.0));
    }

    #[test]
    fn test_cheapest_remaining_today_ignores_past_and_tomorrow() {
        let mut entries = entries_from(15, 0, &[0.5, 6.0, 4.0, 3.0, 3.0, 8.0]);
        entries.extend(entries_from(16, 0, &[0.1]));
        let cheapest = cheapest_remaining_today(&entries, local_now(15, 1, 30)).unwrap();
        // 03:00 and 04:00 tie; earliest wins.
        assert_eq!(cheapest.starts_at.hour(), 3);
        assert_eq!(cheapest.price, SpotPrice::new(3.0));
    }

    #[test]
    fn test_cheapest_remaining_today_none_when_day_exhausted() {
        let entries = entries_from(15, 0, &[1.0, 2.0]);
        assert!(cheapest_remaining_today(&entries, local_now(15, 23, 0)).is_none());
    }

    #[test]
    fn test_run_window_now() {
        let entries = entries_from(15, 8, &[5.0, 5.0, 5.0, 5.0, 5.0, 5.0]);
        assert_eq!(
            run_window(&entries, local_now(15, 8, 20), RUN_THRESHOLD_CENTS),
            RunWindowAdvice::NowIsGood
        );
    }

    #[test]
    fn test_run_window_threshold_is_inclusive() {
        let entries = entries_from(15, 8, &[7.0, 7.0, 7.0]);
        assert_eq!(
            run_window(&entries, local_now(15, 8, 0), RUN_THRESHOLD_CENTS),
            RunWindowAdvice::NowIsGood
        );
    }

    #[test]
    fn test_run_window_skips_missing_hour() {
        // 10:00 is absent, so 08-09-11 is not a window.
        let mut entries = entries_from(15, 8, &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        entries.remove(2);
        let advice = run_window(&entries, local_now(15, 8, 0), RUN_THRESHOLD_CENTS);
        assert_eq!(advice, RunWindowAdvice::LaterToday(entries[2].starts_at));
        assert_eq!(entries[2].starts_at.hour(), 11);
    }

    #[test]
    fn test_run_window_gap_leaves_no_window() {
        let mut entries = entries_from(15, 8, &[1.0, 1.0, 1.0, 1.0]);
        entries.remove(2);
        assert_eq!(
            run_window(&entries, local_now(15, 8, 0), RUN_THRESHOLD_CENTS),
            RunWindowAdvice::NoGoodTimeToday
        );
    }

    #[test]
    fn test_run_window_current_hour_missing_is_not_now() {
        let mut entries = entries_from(15, 8, &[1.0, 1.0, 1.0, 1.0]);
        entries.remove(0);
        let advice = run_window(&entries, local_now(15, 8, 30), RUN_THRESHOLD_CENTS);
        assert_eq!(advice, RunWindowAdvice::LaterToday(entries[0].starts_at));
    }

    #[test]
    fn test_run_window_later_today() {
        let entries = entries_from(15, 8, &[9.0, 9.0, 9.0, 5.0, 5.0, 5.0]);
        let advice = run_window(&entries, local_now(15, 8, 0), RUN_THRESHOLD_CENTS);
        assert_eq!(advice, RunWindowAdvice::LaterToday(entries[3].starts_at));
    }

    #[test]
    fn test_run_window_too_few_hours_left() {
        let entries = entries_from(15, 12, &[10.0, 10.0]);
        assert_eq!(
            run_window(&entries, local_now(15, 12, 0), RUN_THRESHOLD_CENTS),
            RunWindowAdvice::NoWindowRemaining
        );
    }

    #[test]
    fn test_run_window_no_good_time_today_before_publication() {
        let entries = entries_from(15, 9, &[10.0; 15]);
        assert_eq!(
            run_window(&entries, local_now(15, 9, 0), RUN_THRESHOLD_CENTS),
            RunWindowAdvice::NoGoodTimeToday
        );
    }

    #[test]
    fn test_run_window_after_publication_checks_tomorrow() {
        let mut entries = entries_from(15, 15, &[10.0; 9]);
        let mut tomorrow = [10.0; 24];
        tomorrow[8..=10].copy_from_slice(&[5.0, 5.0, 5.0]);
        entries.extend(entries_from(16, 0, &tomorrow));

        let starts = match run_window(&entries, local_now(15, 15, 0), RUN_THRESHOLD_CENTS) {
            RunWindowAdvice::Tomorrow(starts) => starts,
            other => panic!("expected tomorrow advice, got {other:?}"),
        };
        assert_eq!(starts.len(), 1);
        assert_eq!(starts[0].hour(), 8);
        assert_eq!(starts[0].date_naive().to_string(), "2024-01-16");
    }

    #[test]
    fn test_run_window_nothing_today_or_tomorrow() {
        let mut entries = entries_from(15, 15, &[10.0; 9]);
        entries.extend(entries_from(16, 0, &[10.0; 24]));
        assert_eq!(
            run_window(&entries, local_now(15, 15, 0), RUN_THRESHOLD_CENTS),
            RunWindowAdvice::NoGoodTimeTodayOrTomorrow
        );
    }

    #[test]
    fn test_run_window_tomorrow_starts_capped() {
        let mut entries = entries_from(15, 20, &[10.0; 4]);
        entries.extend(entries_from(16, 0, &[1.0; 24]));
        let RunWindowAdvice::Tomorrow(starts) =
            run_window(&entries, local_now(15, 20, 0), RUN_THRESHOLD_CENTS)
        else {
            panic!("expected tomorrow advice");
        };
        assert_eq!(starts.len(), MAX_TOMORROW_STARTS);
        assert_eq!(starts[0].hour(), 0);
    }
}
