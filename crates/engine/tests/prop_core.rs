//! Property-based tests for the interval primitives and the aggregator.
//!
//! These verify invariants that must hold for *any* input, not just the
//! hand-picked fixtures in the unit tests: overlap symmetry, enclosure
//! reflexivity, verdict determinism, and the free-slot correctness contract
//! (a suggested slot never fails validation for the filtered teacher).

use proptest::prelude::*;

use rota_engine::model::{Event, LimitsEnabled, StateSnapshot, Teacher, TimetableConfig};
use rota_engine::slots::{suggest_free_slots, SlotQuery};
use rota_engine::time::{encloses_min, minutes_to_hhmm, overlaps_min, to_minutes};
use rota_engine::validate::validate;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A minute-of-day value on the half-hour grid, leaving room for a lesson.
fn arb_start_min() -> impl Strategy<Value = u32> {
    (0u32..46).prop_map(|slot| slot * 30)
}

/// A lesson length between 30 minutes and 3 hours, half-hour aligned.
fn arb_len() -> impl Strategy<Value = u32> {
    (1u32..=6).prop_map(|slots| slots * 30)
}

/// An interval `(start, end)` in minutes with `start < end`.
fn arb_interval() -> impl Strategy<Value = (u32, u32)> {
    (arb_start_min(), arb_len()).prop_map(|(s, l)| (s, s + l))
}

/// An event for one of two teachers on a small Mon-Wed grid.
fn arb_event() -> impl Strategy<Value = Event> {
    (0usize..3, 16u32..=28, arb_len(), prop_oneof![Just("t-1"), Just("t-2")]).prop_map(
        |(day, start_slot, len, teacher)| {
            let start = start_slot * 30;
            Event {
                id: format!("e-{}-{}", day, start_slot),
                title: String::new(),
                area: String::new(),
                day_index: day,
                start: minutes_to_hhmm(start),
                end: minutes_to_hhmm(start + len),
                teacher_ids: vec![teacher.to_string()],
                room_id: None,
                class_size: None,
                color: None,
            }
        },
    )
}

fn arb_events() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec(arb_event(), 0..8)
}

fn snapshot(events: Vec<Event>) -> StateSnapshot {
    StateSnapshot {
        config: TimetableConfig {
            days: vec!["Mon".to_string(), "Tue".to_string(), "Wed".to_string()],
            start_hour: 8,
            end_hour: 16,
            slots_per_hour: 2,
        },
        limits_enabled: LimitsEnabled {
            room_limits: false,
            teacher_limits: false,
        },
        teachers: vec![
            Teacher {
                id: "t-1".to_string(),
                name: "Ms. Ahmed".to_string(),
                areas: vec![],
                color: None,
            },
            Teacher {
                id: "t-2".to_string(),
                name: "Mr. Kamau".to_string(),
                areas: vec![],
                color: None,
            },
        ],
        events,
        ..StateSnapshot::default()
    }
}

// ---------------------------------------------------------------------------
// Interval properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn overlap_is_symmetric((a_s, a_e) in arb_interval(), (b_s, b_e) in arb_interval()) {
        prop_assert_eq!(
            overlaps_min(a_s, a_e, b_s, b_e),
            overlaps_min(b_s, b_e, a_s, a_e)
        );
    }

    #[test]
    fn touching_intervals_never_overlap((s, e) in arb_interval(), len in arb_len()) {
        prop_assert!(!overlaps_min(s, e, e, e + len));
        prop_assert!(!overlaps_min(e, e + len, s, e));
    }

    #[test]
    fn every_interval_encloses_itself((s, e) in arb_interval()) {
        prop_assert!(encloses_min(s, e, s, e));
    }

    #[test]
    fn enclosure_implies_overlap((s, e) in arb_interval(), pad in 0u32..60) {
        // A strictly contained interval always overlaps its container.
        prop_assert!(overlaps_min(s, e + 2 * pad + 30, s + pad, s + pad + 30));
    }

    #[test]
    fn hhmm_round_trips_on_the_minute(mins in 0u32..1440) {
        prop_assert_eq!(to_minutes(&minutes_to_hhmm(mins)), mins);
    }
}

// ---------------------------------------------------------------------------
// Engine properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn verdict_is_deterministic(events in arb_events(), (s, e) in arb_interval(), day in 0usize..3) {
        let state = snapshot(events);
        let candidate = Event {
            id: String::new(),
            title: String::new(),
            area: String::new(),
            day_index: day,
            start: minutes_to_hhmm(480 + s % 420),
            end: minutes_to_hhmm(480 + s % 420 + (e - s).min(120)),
            teacher_ids: vec!["t-1".to_string()],
            room_id: None,
            class_size: None,
            color: None,
        };
        prop_assert_eq!(validate(&candidate, &state), validate(&candidate, &state));
    }

    #[test]
    fn suggested_slots_always_validate_clean(events in arb_events(), day in 0usize..3) {
        let state = snapshot(events);
        let slots = suggest_free_slots(
            &state.config,
            &state.events,
            &state.breaks,
            &SlotQuery {
                teacher_id: Some("t-1".to_string()),
                room_id: None,
                day_index: Some(day),
                class_len_mins: 60,
                limit: 20,
            },
        );
        for slot in slots {
            let candidate = Event {
                id: String::new(),
                title: String::new(),
                area: String::new(),
                day_index: slot.day_index,
                start: slot.start.clone(),
                end: slot.end.clone(),
                teacher_ids: vec!["t-1".to_string()],
                room_id: None,
                class_size: None,
                color: None,
            };
            let verdict = validate(&candidate, &state);
            prop_assert!(
                verdict.is_allowed(),
                "slot {:?} was suggested but validates blocked: {:?}",
                (slot.day_index, slot.start, slot.end),
                verdict.messages
            );
        }
    }
}
