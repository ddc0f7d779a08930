use crate::model::{Break, Event, Room};
use crate::time::ranges_overlap;

// ---------------------------------------------------------------------------
// Double-booking detectors
// ---------------------------------------------------------------------------

/// Existing events that double-book `teacher_id` on `day_index` over the
/// proposed range. `ignore_id` excludes the event being edited so it never
/// conflicts with its own pre-edit record.
pub fn conflicts_for_teacher<'a>(
    events: &'a [Event],
    teacher_id: &str,
    day_index: usize,
    start: &str,
    end: &str,
    ignore_id: Option<&str>,
) -> Vec<&'a Event> {
    if teacher_id.is_empty() {
        return Vec::new();
    }
    events
        .iter()
        .filter(|e| {
            e.day_index == day_index
                && e.teacher_ids.iter().any(|t| t == teacher_id)
                && Some(e.id.as_str()) != ignore_id
                && ranges_overlap(start, end, &e.start, &e.end)
        })
        .collect()
}

/// Existing events that double-book `room_id` on `day_index` over the
/// proposed range.
pub fn conflicts_for_room<'a>(
    events: &'a [Event],
    room_id: &str,
    day_index: usize,
    start: &str,
    end: &str,
    ignore_id: Option<&str>,
) -> Vec<&'a Event> {
    if room_id.is_empty() {
        return Vec::new();
    }
    events
        .iter()
        .filter(|e| {
            e.day_index == day_index
                && e.room() == Some(room_id)
                && Some(e.id.as_str()) != ignore_id
                && ranges_overlap(start, end, &e.start, &e.end)
        })
        .collect()
}

/// Breaks overlapping the proposed range on `day_index`. Breaks are day-wide:
/// they apply to every room and teacher.
pub fn conflicts_with_breaks<'a>(
    breaks: &'a [Break],
    day_index: usize,
    start: &str,
    end: &str,
) -> Vec<&'a Break> {
    breaks
        .iter()
        .filter(|b| b.day_index == day_index && ranges_overlap(start, end, &b.start, &b.end))
        .collect()
}

// ---------------------------------------------------------------------------
// Room capacity
// ---------------------------------------------------------------------------

/// A declared class size exceeding the room's declared capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityExceeded {
    pub required: u32,
    pub capacity: u32,
}

/// Check the candidate's class size against the room's capacity. No room, a
/// room without a declared capacity, or an absent/zero class size all mean no
/// check is performed.
pub fn check_room_capacity(
    rooms: &[Room],
    room_id: Option<&str>,
    class_size: Option<u32>,
) -> Option<CapacityExceeded> {
    let room_id = room_id.filter(|r| !r.is_empty())?;
    let required = class_size.filter(|&n| n > 0)?;
    let capacity = rooms.iter().find(|r| r.id == room_id)?.capacity?;
    if required > capacity {
        Some(CapacityExceeded { required, capacity })
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
