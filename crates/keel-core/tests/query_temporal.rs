use chrono::{DateTime, TimeZone, Utc};
use keel_core::query::{Period, Temporal, TemporalMode, TemporalRange};
use pretty_assertions::assert_eq;
use std_util::prelude::*;

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
}

fn range(from: u32, to: u32) -> TemporalRange {
    assert_ok!(TemporalRange::new(at(from), at(to)))
}

#[test]
fn as_of_round_trips_the_instant() {
    let t = assert_ok!("2024-01-01T00:00:00Z".parse::<DateTime<Utc>>());
    let temporal = assert_ok!(Temporal::from_mode(TemporalMode::AsOf(t)));

    assert_eq!(temporal, Temporal::AsOf { at: t });
    assert_eq!(assert_some!(temporal.as_of()), t);
    assert_none!(temporal.range());
    assert!(temporal.is_temporal());
}

#[test]
fn zero_width_ranges_are_rejected() {
    let t = at(3);

    for mode in [
        TemporalMode::FromTo { from: t, to: t },
        TemporalMode::Between { from: t, to: t },
        TemporalMode::ContainedIn { from: t, to: t },
    ] {
        let err = assert_err!(Temporal::from_mode(mode));
        assert!(err.is_invalid_argument(), "{mode}: {err}");
    }
}

#[test]
fn reversed_ranges_are_rejected() {
    let err = assert_err!(TemporalRange::new(at(5), at(4)));
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("strictly before"), "{err}");
}

#[test]
fn range_modes_keep_their_bounds() {
    let from = at(1);
    let to = at(2);

    let cases = [
        (TemporalMode::FromTo { from, to }, Temporal::FromTo(range(1, 2))),
        (TemporalMode::Between { from, to }, Temporal::Between(range(1, 2))),
        (
            TemporalMode::ContainedIn { from, to },
            Temporal::ContainedIn(range(1, 2)),
        ),
    ];

    for (mode, expected) in cases {
        let temporal = assert_ok!(Temporal::from_mode(mode));
        assert_eq!(temporal, expected);

        let range = assert_some!(temporal.range());
        assert_eq!((range.from(), range.to()), (from, to));
    }

    assert_eq!(
        assert_ok!(Temporal::from_mode(TemporalMode::Current)),
        Temporal::Current
    );
    assert_eq!(assert_ok!(Temporal::from_mode(TemporalMode::All)), Temporal::All);
    assert!(!Temporal::Current.is_temporal());
}

#[test]
fn as_of_boundaries() {
    let temporal = Temporal::AsOf { at: at(5) };

    // Created exactly at the instant
    assert!(temporal.includes(&Period::closed(at(5), at(6))));
    // Removed exactly at the instant
    assert!(!temporal.includes(&Period::closed(at(4), at(5))));
    assert!(temporal.includes(&Period::open(at(1))));
    assert!(!temporal.includes(&Period::open(at(6))));
}

#[test]
fn from_to_excludes_both_boundaries() {
    let from_to = Temporal::FromTo(range(2, 4));
    let between = Temporal::Between(range(2, 4));

    // Removed exactly at `to`
    let removed_at_end = Period::closed(at(1), at(4));
    assert!(!from_to.includes(&removed_at_end));
    assert!(between.includes(&removed_at_end));

    // Created exactly at `from`
    let created_at_start = Period::closed(at(2), at(3));
    assert!(!from_to.includes(&created_at_start));
    assert!(between.includes(&created_at_start));
    assert!(!from_to.includes(&Period::open(at(2))));

    // Created exactly at `to`
    assert!(!from_to.includes(&Period::closed(at(4), at(5))));
    // Removed exactly at `from`
    assert!(!from_to.includes(&Period::closed(at(1), at(2))));

    assert!(from_to.includes(&Period::closed(at(1), at(3))));
    assert!(from_to.includes(&Period::closed(at(1), at(5))));
    assert!(from_to.includes(&Period::open(at(3))));
}

#[test]
fn between_includes_rows_created_at_the_end() {
    let temporal = Temporal::Between(range(2, 4));

    assert!(temporal.includes(&Period::closed(at(4), at(5))));
    assert!(temporal.includes(&Period::open(at(4))));
    assert!(!temporal.includes(&Period::closed(at(1), at(2))));
    assert!(!temporal.includes(&Period::open(at(5))));
}

#[test]
fn contained_in_requires_the_whole_period() {
    let temporal = Temporal::ContainedIn(range(2, 4));

    // Both boundaries inclusive
    assert!(temporal.includes(&Period::closed(at(2), at(4))));
    assert!(temporal.includes(&Period::closed(at(3), at(4))));
    assert!(!temporal.includes(&Period::closed(at(1), at(3))));
    assert!(!temporal.includes(&Period::closed(at(3), at(5))));
    // Still current, so never contained
    assert!(!temporal.includes(&Period::open(at(3))));
}

#[test]
fn all_and_current() {
    let historical = Period::closed(at(1), at(2));
    let current = Period::open(at(2));

    assert!(Temporal::All.includes(&historical));
    assert!(Temporal::All.includes(&current));
    assert!(!Temporal::Current.includes(&historical));
    assert!(Temporal::Current.includes(&current));
}

#[test]
fn display_uses_system_time_clauses() {
    assert_eq!(
        Temporal::AsOf { at: at(0) }.to_string(),
        "FOR SYSTEM_TIME AS OF 2024-01-01T00:00:00+00:00"
    );
    assert_eq!(
        Temporal::Between(range(1, 2)).to_string(),
        "FOR SYSTEM_TIME BETWEEN 2024-01-01T01:00:00+00:00 AND 2024-01-01T02:00:00+00:00"
    );
    assert_eq!(Temporal::All.to_string(), "FOR SYSTEM_TIME ALL");
    assert_eq!(Temporal::Current.to_string(), "");
}
