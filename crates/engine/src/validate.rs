use crate::conflict::{check_room_capacity, conflicts_for_room, conflicts_for_teacher};
use crate::limits::{would_room_exceed, would_teacher_exceed};
use crate::model::{Event, StateSnapshot, Verdict};
use crate::rules::{check_subject_time, check_teacher_time, unqualified_teachers, SubjectTimeBlock};

// ---------------------------------------------------------------------------
// The constraint aggregator
// ---------------------------------------------------------------------------

/// Decide whether `candidate` may be committed against the given snapshot.
///
/// This is the single entry point the host calls before any create, edit,
/// move, or bulk placement. Checks run in a fixed order and every failed
/// check appends one message; nothing short-circuits, so a user fixing one
/// violation sees all remaining ones at once. Same inputs, same ordered
/// output.
///
/// Check order: capacity, teacher conflicts, teacher-subject eligibility,
/// room conflict, teacher blackouts, subject windows, room weekly quota,
/// teacher weekly quotas. Per-teacher checks follow the attachment order of
/// `candidate.teacher_ids`.
pub fn validate(candidate: &Event, state: &StateSnapshot) -> Verdict {
    let mut msgs: Vec<String> = Vec::new();
    let has_subject = candidate.has_subject();
    let day_name = state.config.day_name(candidate.day_index);
    let ignore_id = if candidate.id.is_empty() {
        None
    } else {
        Some(candidate.id.as_str())
    };

    // 1. Room capacity.
    if let Some(cap) = check_room_capacity(&state.rooms, candidate.room(), candidate.class_size) {
        msgs.push(format!(
            "Capacity exceeded: {} required, room allows {}.",
            cap.required, cap.capacity
        ));
    }

    // 2. Teacher double-booking, per attached teacher.
    for tid in &candidate.teacher_ids {
        let hits = conflicts_for_teacher(
            &state.events,
            tid,
            candidate.day_index,
            &candidate.start,
            &candidate.end,
            ignore_id,
        );
        if !hits.is_empty() {
            msgs.push(format!(
                "Teacher conflict: {} is already booked on {} {}\u{2013}{}.",
                teacher_name(state, tid),
                day_name,
                candidate.start,
                candidate.end
            ));
        }
    }

    // 3. Teacher-subject eligibility.
    if has_subject {
        for t in unqualified_teachers(&state.teachers, &candidate.teacher_ids, &candidate.area) {
            msgs.push(format!(
                "{} is not qualified to teach \"{}\".",
                t.name,
                candidate.area.trim()
            ));
        }
    }

    // 4. Room double-booking.
    if let Some(room_id) = candidate.room() {
        let hits = conflicts_for_room(
            &state.events,
            room_id,
            candidate.day_index,
            &candidate.start,
            &candidate.end,
            ignore_id,
        );
        if !hits.is_empty() {
            msgs.push(format!(
                "Room conflict: already booked on {} {}\u{2013}{}.",
                day_name, candidate.start, candidate.end
            ));
        }
    }

    // 5. Teacher blackouts, per attached teacher.
    for (tid, rule) in check_teacher_time(
        &state.time_rules,
        &candidate.teacher_ids,
        candidate.day_index,
        &candidate.start,
        &candidate.end,
    ) {
        let note = rule
            .note
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(|n| format!(" \u{2022} {}", n))
            .unwrap_or_default();
        msgs.push(format!(
            "{} unavailable on {} {}\u{2013}{}{}.",
            teacher_name(state, tid),
            day_name,
            rule.start,
            rule.end,
            note
        ));
    }

    // 6. Subject allow/forbid windows.
    if has_subject {
        match check_subject_time(
            &state.time_rules,
            &candidate.area,
            candidate.day_index,
            &candidate.start,
            &candidate.end,
        ) {
            Some(SubjectTimeBlock::OutsideAllowed(windows)) => {
                let permitted = windows
                    .iter()
                    .map(|w| format!("{}\u{2013}{}", w.start, w.end))
                    .collect::<Vec<_>>()
                    .join(", ");
                msgs.push(format!(
                    "\"{}\" must be scheduled within allowed windows on {}: {}.",
                    candidate.area.trim(),
                    day_name,
                    permitted
                ));
            }
            Some(SubjectTimeBlock::Forbidden(rule)) => {
                let note = rule
                    .note
                    .as_deref()
                    .filter(|n| !n.is_empty())
                    .map(|n| format!(" \u{2022} {}", n))
                    .unwrap_or_default();
                msgs.push(format!(
                    "\"{}\" is forbidden on {} {}\u{2013}{}{}.",
                    candidate.area.trim(),
                    day_name,
                    rule.start,
                    rule.end,
                    note
                ));
            }
            None => {}
        }
    }

    // 7. Room weekly quota.
    if state.limits_enabled.room_limits && has_subject && candidate.room().is_some() {
        if let Some(limit) = would_room_exceed(&state.room_limits, &state.events, candidate, ignore_id)
        {
            let room_name = state
                .rooms
                .iter()
                .find(|r| r.id == limit.room_id)
                .map(|r| r.name.as_str())
                .unwrap_or(limit.room_id.as_str());
            msgs.push(format!(
                "Weekly room limit exceeded: {} in {} is limited to {} /week.",
                limit.area, room_name, limit.max_per_week
            ));
        }
    }

    // 8. Teacher weekly quotas, per attached teacher.
    if state.limits_enabled.teacher_limits && has_subject {
        for tid in &candidate.teacher_ids {
            if let Some(limit) = would_teacher_exceed(
                &state.teacher_limits,
                &state.events,
                tid,
                &candidate.area,
                ignore_id,
            ) {
                msgs.push(format!(
                    "Weekly teacher limit exceeded: {} for {} is limited to {} /week.",
                    limit.area,
                    teacher_name(state, &limit.teacher_id),
                    limit.max_per_week
                ));
            }
        }
    }

    Verdict::from_messages(msgs)
}

fn teacher_name<'a>(state: &'a StateSnapshot, teacher_id: &'a str) -> &'a str {
    state
        .teachers
        .iter()
        .find(|t| t.id == teacher_id)
        .map(|t| t.name.as_str())
        .unwrap_or(teacher_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
