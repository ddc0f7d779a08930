use crate::model::{same_area, Event, RoomLimit, TeacherLimit};

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// The weekly cap row for (room, subject), if the host configured one.
pub fn find_room_limit<'a>(
    limits: &'a [RoomLimit],
    room_id: &str,
    area: &str,
) -> Option<&'a RoomLimit> {
    limits
        .iter()
        .find(|c| c.room_id == room_id && same_area(&c.area, area))
}

/// The weekly cap row for (teacher, subject), if the host configured one.
pub fn find_teacher_limit<'a>(
    limits: &'a [TeacherLimit],
    teacher_id: &str,
    area: &str,
) -> Option<&'a TeacherLimit> {
    limits
        .iter()
        .find(|c| c.teacher_id == teacher_id && same_area(&c.area, area))
}

// ---------------------------------------------------------------------------
// Quota checks
// ---------------------------------------------------------------------------

/// Would committing `candidate` push its (room, subject) pair past the weekly
/// cap? Returns the violated row. A cap of zero is inert; existing events are
/// counted by room plus normalized subject, excluding `ignore_id`.
pub fn would_room_exceed<'a>(
    limits: &'a [RoomLimit],
    events: &[Event],
    candidate: &Event,
    ignore_id: Option<&str>,
) -> Option<&'a RoomLimit> {
    let room_id = candidate.room()?;
    let limit = find_room_limit(limits, room_id, &candidate.area)?;
    if limit.max_per_week == 0 {
        return None;
    }
    let base = events
        .iter()
        .filter(|e| {
            Some(e.id.as_str()) != ignore_id
                && e.room() == Some(limit.room_id.as_str())
                && same_area(&e.area, &limit.area)
        })
        .count() as u32;
    if base + 1 > limit.max_per_week {
        Some(limit)
    } else {
        None
    }
}

/// Would committing one more `area` lesson for `teacher_id` pass the weekly
/// cap? The aggregator applies this once per attached teacher.
pub fn would_teacher_exceed<'a>(
    limits: &'a [TeacherLimit],
    events: &[Event],
    teacher_id: &str,
    area: &str,
    ignore_id: Option<&str>,
) -> Option<&'a TeacherLimit> {
    let limit = find_teacher_limit(limits, teacher_id, area)?;
    if limit.max_per_week == 0 {
        return None;
    }
    let base = events
        .iter()
        .filter(|e| {
            Some(e.id.as_str()) != ignore_id
                && e.teacher_ids.iter().any(|t| t == &limit.teacher_id)
                && same_area(&e.area, &limit.area)
        })
        .count() as u32;
    if base + 1 > limit.max_per_week {
        Some(limit)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, area: &str, teacher: &str, room: &str) -> Event {
        Event {
            id: id.to_string(),
            title: String::new(),
            area: area.to_string(),
            day_index: 0,
            start: "09:00".to_string(),
            end: "10:00".to_string(),
            teacher_ids: if teacher.is_empty() {
                vec![]
            } else {
                vec![teacher.to_string()]
            },
            room_id: if room.is_empty() {
                None
            } else {
                Some(room.to_string())
            },
            class_size: None,
            color: None,
        }
    }

    fn room_limit(room: &str, area: &str, max: u32) -> RoomLimit {
        RoomLimit {
            room_id: room.to_string(),
            area: area.to_string(),
            max_per_week: max,
        }
    }

    #[test]
    fn room_quota_blocks_at_the_boundary() {
        let limits = vec![room_limit("r-1", "Math", 2)];
        let existing = vec![event("e1", "Math", "", "r-1"), event("e2", "math ", "", "r-1")];
        let candidate = event("", "Math", "", "r-1");

        // Two matching events exist, cap is 2: one more is over.
        assert!(would_room_exceed(&limits, &existing, &candidate, None).is_some());

        // With only one existing, the second fits exactly.
        assert!(would_room_exceed(&limits, &existing[..1], &candidate, None).is_none());
    }

    #[test]
    fn room_quota_counts_normalized_subjects() {
        let limits = vec![room_limit("r-1", "  MATH ", 1)];
        let existing = vec![event("e1", "math", "", "r-1")];
        let candidate = event("", "Math", "", "r-1");
        let hit = would_room_exceed(&limits, &existing, &candidate, None).unwrap();
        assert_eq!(hit.max_per_week, 1);
    }

    #[test]
    fn editing_the_counted_event_does_not_double_count() {
        let limits = vec![room_limit("r-1", "Math", 1)];
        let existing = vec![event("e1", "Math", "", "r-1")];
        let candidate = event("e1", "Math", "", "r-1");
        assert!(would_room_exceed(&limits, &existing, &candidate, Some("e1")).is_none());
    }

    #[test]
    fn zero_cap_and_missing_row_are_inert() {
        let limits = vec![room_limit("r-1", "Math", 0)];
        let existing = vec![event("e1", "Math", "", "r-1")];
        let candidate = event("", "Math", "", "r-1");
        assert!(would_room_exceed(&limits, &existing, &candidate, None).is_none());

        let other_room = event("", "Math", "", "r-9");
        assert!(would_room_exceed(&limits, &existing, &other_room, None).is_none());
    }

    #[test]
    fn teacher_quota_counts_set_membership() {
        let limits = vec![TeacherLimit {
            teacher_id: "t-1".to_string(),
            area: "Physics".to_string(),
            max_per_week: 1,
        }];
        // A co-taught event still counts toward t-1's cap.
        let mut shared = event("e1", "Physics", "t-2", "");
        shared.teacher_ids.push("t-1".to_string());
        let existing = vec![shared];

        assert!(would_teacher_exceed(&limits, &existing, "t-1", "Physics", None).is_some());
        assert!(would_teacher_exceed(&limits, &existing, "t-2", "Physics", None).is_none());
    }
}
