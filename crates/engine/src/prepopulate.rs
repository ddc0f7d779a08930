use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::model::{Event, Slot, StateSnapshot, Verdict};
use crate::slots::{suggest_free_slots, SlotQuery};
use crate::time::{minutes_to_hhmm, to_minutes};
use crate::validate::validate;

/// Lessons shorter than this are clamped up; the host form enforces the same
/// floor.
const MIN_LESSON_MINS: u32 = 15;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// How bulk placement picks its candidate times.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Strategy {
    /// One start time replicated across the picked days, dealt round-robin so
    /// every picked day receives a lesson before any day gets a second.
    Fixed {
        start: String,
        days_picked: Vec<usize>,
    },
    /// Free-slot search per day over a rotation beginning at
    /// `start_day_index`, then round-robin across days with candidates left.
    Autofill { start_day_index: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepopulateParams {
    pub strategy: Strategy,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub subject: String,
    pub duration_mins: u32,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// A candidate the aggregator refused, with its full message list retained
/// for the host to surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedCandidate {
    pub candidate: Event,
    pub messages: Vec<String>,
}

/// Bulk placement is best-effort: accepted and rejected candidates are both
/// part of the contract, and partial success is the normal outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepopulateOutcome {
    pub accepted: Vec<Event>,
    pub rejected: Vec<RejectedCandidate>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Generate candidates per the chosen strategy, then run every one through
/// the aggregator and partition by verdict. Accepted events carry empty ids;
/// identity is assigned by the host on commit.
pub fn prepopulate(params: &PrepopulateParams, state: &StateSnapshot) -> PrepopulateOutcome {
    let candidates = match &params.strategy {
        Strategy::Fixed { start, days_picked } => fixed_candidates(params, state, start, days_picked),
        Strategy::Autofill { start_day_index } => {
            autofill_candidates(params, state, *start_day_index)
        }
    };

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for candidate in candidates {
        let Verdict { blocked, messages } = validate(&candidate, state);
        if blocked {
            rejected.push(RejectedCandidate { candidate, messages });
        } else {
            accepted.push(candidate);
        }
    }
    PrepopulateOutcome { accepted, rejected }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn lesson_len(params: &PrepopulateParams) -> u32 {
    params.duration_mins.max(MIN_LESSON_MINS)
}

fn make_candidate(params: &PrepopulateParams, day_index: usize, start: &str, end: &str) -> Event {
    Event {
        id: String::new(),
        title: if params.subject.trim().is_empty() {
            "Lesson".to_string()
        } else {
            params.subject.clone()
        },
        area: params.subject.clone(),
        day_index,
        start: start.to_string(),
        end: end.to_string(),
        teacher_ids: params
            .teacher_id
            .iter()
            .filter(|t| !t.is_empty())
            .cloned()
            .collect(),
        room_id: params.room_id.clone().filter(|r| !r.is_empty()),
        class_size: None,
        color: None,
    }
}

fn fixed_candidates(
    params: &PrepopulateParams,
    state: &StateSnapshot,
    start: &str,
    days_picked: &[usize],
) -> Vec<Event> {
    if days_picked.is_empty() || !crate::time::is_valid_hhmm(start) {
        return Vec::new();
    }
    let len = lesson_len(params);
    let s_min = to_minutes(start);
    let e_min = s_min + len;
    if s_min < state.config.day_start_min() || e_min > state.config.day_end_min() {
        return Vec::new();
    }

    let start_s = minutes_to_hhmm(s_min);
    let end_s = minutes_to_hhmm(e_min);
    let total = params.count.max(1);
    (0..total)
        .map(|i| make_candidate(params, days_picked[i % days_picked.len()], &start_s, &end_s))
        .collect()
}

fn autofill_candidates(
    params: &PrepopulateParams,
    state: &StateSnapshot,
    start_day_index: usize,
) -> Vec<Event> {
    let len = lesson_len(params);
    let total = params.count.max(1);
    let day_count = state.config.days.len();

    // One free-slot bucket per day, walking the week from the chosen start
    // day. Days with nothing free are left out of the rotation.
    let mut buckets: VecDeque<(usize, VecDeque<Slot>)> = VecDeque::new();
    for i in 0..day_count {
        let di = (start_day_index + i) % day_count.max(1);
        let day_slots = suggest_free_slots(
            &state.config,
            &state.events,
            &state.breaks,
            &SlotQuery {
                teacher_id: params.teacher_id.clone(),
                room_id: params.room_id.clone(),
                day_index: Some(di),
                class_len_mins: len,
                limit: total,
            },
        );
        if !day_slots.is_empty() {
            buckets.push_back((di, day_slots.into()));
        }
    }

    let mut used: Vec<Slot> = Vec::new();
    if buckets.is_empty() {
        // No per-day candidates at all: fall back to one unscoped search.
        let raw = suggest_free_slots(
            &state.config,
            &state.events,
            &state.breaks,
            &SlotQuery {
                teacher_id: params.teacher_id.clone(),
                room_id: params.room_id.clone(),
                day_index: None,
                class_len_mins: len,
                limit: total,
            },
        );
        used.extend(raw.into_iter().take(total));
    } else {
        // Round-robin: each day yields once before any day repeats; exhausted
        // days drop out of the rotation.
        while used.len() < total {
            let Some((di, mut queue)) = buckets.pop_front() else {
                break;
            };
            if let Some(slot) = queue.pop_front() {
                used.push(slot);
            }
            if !queue.is_empty() {
                buckets.push_back((di, queue));
            }
        }
    }

    used.iter()
        .map(|s| make_candidate(params, s.day_index, &s.start, &s.end))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Room, RoomLimit, Teacher, TimetableConfig};

    fn state() -> StateSnapshot {
        StateSnapshot {
            config: TimetableConfig {
                days: vec![
                    "Mon".to_string(),
                    "Tue".to_string(),
                    "Wed".to_string(),
                ],
                start_hour: 8,
                end_hour: 12,
                slots_per_hour: 1,
            },
            teachers: vec![Teacher {
                id: "t-1".to_string(),
                name: "Mrs. Otieno".to_string(),
                areas: vec![],
                color: None,
            }],
            rooms: vec![Room {
                id: "r-1".to_string(),
                name: "Room A".to_string(),
                capacity: None,
            }],
            ..StateSnapshot::default()
        }
    }

    fn params(strategy: Strategy, count: usize) -> PrepopulateParams {
        PrepopulateParams {
            strategy,
            teacher_id: Some("t-1".to_string()),
            room_id: Some("r-1".to_string()),
            subject: "Chemistry".to_string(),
            duration_mins: 60,
            count,
        }
    }

    #[test]
    fn fixed_deals_each_picked_day_before_repeating() {
        let p = params(
            Strategy::Fixed {
                start: "10:00".to_string(),
                days_picked: vec![0, 1, 2],
            },
            3,
        );
        let out = prepopulate(&p, &state());
        assert!(out.rejected.is_empty());
        let days: Vec<usize> = out.accepted.iter().map(|e| e.day_index).collect();
        assert_eq!(days, vec![0, 1, 2]);
        assert!(out.accepted.iter().all(|e| e.start == "10:00" && e.end == "11:00"));
    }

    #[test]
    fn fixed_round_robins_past_one_week() {
        let p = params(
            Strategy::Fixed {
                start: "10:00".to_string(),
                days_picked: vec![0, 2],
            },
            5,
        );
        let out = prepopulate(&p, &state());
        let days: Vec<usize> = out
            .accepted
            .iter()
            .chain(out.rejected.iter().map(|r| &r.candidate))
            .map(|e| e.day_index)
            .collect();
        assert_eq!(days, vec![0, 2, 0, 2, 0]);
    }

    #[test]
    fn fixed_outside_the_day_span_yields_nothing() {
        let p = params(
            Strategy::Fixed {
                start: "11:30".to_string(),
                days_picked: vec![0],
            },
            2,
        );
        let out = prepopulate(&p, &state());
        assert!(out.accepted.is_empty());
        assert!(out.rejected.is_empty());
    }

    #[test]
    fn autofill_spreads_across_days_starting_at_chosen_day() {
        let p = params(Strategy::Autofill { start_day_index: 1 }, 3);
        let out = prepopulate(&p, &state());
        assert_eq!(out.accepted.len(), 3);
        let days: Vec<usize> = out.accepted.iter().map(|e| e.day_index).collect();
        assert_eq!(days, vec![1, 2, 0]);
        assert!(out.accepted.iter().all(|e| e.start == "08:00"));
    }

    #[test]
    fn autofill_skips_booked_slots() {
        let mut s = state();
        s.events.push(Event {
            id: "e1".to_string(),
            title: String::new(),
            area: String::new(),
            day_index: 1,
            start: "08:00".to_string(),
            end: "12:00".to_string(),
            teacher_ids: vec!["t-1".to_string()],
            room_id: None,
            class_size: None,
            color: None,
        });
        let p = params(Strategy::Autofill { start_day_index: 1 }, 2);
        let out = prepopulate(&p, &s);
        // Tue is fully booked for the teacher, so Wed and Mon take over.
        let days: Vec<usize> = out.accepted.iter().map(|e| e.day_index).collect();
        assert_eq!(days, vec![2, 0]);
    }

    #[test]
    fn rejected_candidates_keep_their_messages() {
        let mut s = state();
        s.room_limits.push(RoomLimit {
            room_id: "r-1".to_string(),
            area: "Chemistry".to_string(),
            max_per_week: 1,
        });
        let p = params(
            Strategy::Fixed {
                start: "10:00".to_string(),
                days_picked: vec![0, 1],
            },
            2,
        );
        let out = prepopulate(&p, &s);
        // Candidates validate against the snapshot, not against each other,
        // so both pass while nothing is committed yet.
        assert_eq!(out.accepted.len(), 2);
        assert!(out.rejected.is_empty());

        // Committed events count; rerunning against them rejects both.
        s.events = out
            .accepted
            .into_iter()
            .enumerate()
            .map(|(i, mut e)| {
                e.id = format!("e{}", i);
                e
            })
            .collect();
        let again = prepopulate(&p, &s);
        assert!(again.accepted.is_empty());
        assert_eq!(again.rejected.len(), 2);
        assert!(again.rejected[0]
            .messages
            .iter()
            .any(|m| m.contains("Weekly room limit exceeded")));
    }
}
