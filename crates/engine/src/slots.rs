use serde::{Deserialize, Serialize};

use crate::model::{Break, Event, Slot, TimetableConfig};
use crate::time::{minutes_to_hhmm, overlaps_min, to_minutes};

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Parameters for a free-slot search. With no day filter every configured day
/// is scanned in sequence order. Callers normally set at least one of
/// `teacher_id` / `room_id`; with neither, nothing can conflict and every
/// in-grid start is returned (up to `limit`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotQuery {
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub day_index: Option<usize>,
    pub class_len_mins: u32,
    pub limit: usize,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Enumerate conflict-free start times across the configured grid.
///
/// Candidate starts run at slot granularity over `[day_start, day_end - len]`.
/// A start is accepted when `[start, start + len)` overlaps no same-day event
/// matching the teacher filter or the room filter, and lands in no break.
/// Results are chronological within a day, days in sequence order, capped at
/// `limit`. A lesson longer than the day span yields nothing for that day.
///
/// Time-window rules are deliberately not applied here; hosts layer
/// `rules::filter_slots_by_rules` on top so suggestions stay legal.
pub fn suggest_free_slots(
    config: &TimetableConfig,
    events: &[Event],
    breaks: &[Break],
    query: &SlotQuery,
) -> Vec<Slot> {
    let mut out = Vec::new();
    if query.limit == 0 || query.class_len_mins == 0 {
        return out;
    }

    let days: Vec<usize> = match query.day_index {
        Some(d) if d < config.days.len() => vec![d],
        Some(_) => return out,
        None => (0..config.days.len()).collect(),
    };

    let teacher = query.teacher_id.as_deref().filter(|t| !t.is_empty());
    let room = query.room_id.as_deref().filter(|r| !r.is_empty());
    let step = config.slot_len_mins();
    let day_start = config.day_start_min();
    let day_end = config.day_end_min();

    for day in days {
        if day_start + query.class_len_mins > day_end {
            continue;
        }
        let mut start = day_start;
        while start + query.class_len_mins <= day_end {
            let end = start + query.class_len_mins;
            if is_free(events, breaks, teacher, room, day, start, end) {
                out.push(Slot {
                    day_index: day,
                    start: minutes_to_hhmm(start),
                    end: minutes_to_hhmm(end),
                    room_id: room.map(|r| r.to_string()),
                });
                if out.len() >= query.limit {
                    return out;
                }
            }
            start += step;
        }
    }
    out
}

fn is_free(
    events: &[Event],
    breaks: &[Break],
    teacher: Option<&str>,
    room: Option<&str>,
    day: usize,
    start: u32,
    end: u32,
) -> bool {
    let booked = events.iter().any(|e| {
        if e.day_index != day {
            return false;
        }
        let relevant = teacher.is_some_and(|t| e.teacher_ids.iter().any(|id| id == t))
            || room.is_some_and(|r| e.room() == Some(r));
        relevant && overlaps_min(start, end, to_minutes(&e.start), to_minutes(&e.end))
    });
    if booked {
        return false;
    }
    !breaks
        .iter()
        .any(|b| b.day_index == day && overlaps_min(start, end, to_minutes(&b.start), to_minutes(&b.end)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
