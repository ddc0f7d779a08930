use crate::model::{
    same_area, Slot, SubjectWindow, Teacher, TeacherUnavailability, TimeRules, WindowMode,
};
use crate::time::{encloses, ranges_overlap};

// ---------------------------------------------------------------------------
// Teacher unavailability
// ---------------------------------------------------------------------------

/// For each attached teacher (in attachment order), the first blackout rule
/// on the candidate's day that overlaps the candidate's range. Any hit blocks
/// the placement; the rule is returned so the caller can report its window
/// and note.
pub fn check_teacher_time<'a>(
    rules: &'a TimeRules,
    teacher_ids: &'a [String],
    day_index: usize,
    start: &str,
    end: &str,
) -> Vec<(&'a str, &'a TeacherUnavailability)> {
    let mut hits = Vec::new();
    for tid in teacher_ids.iter().filter(|t| !t.is_empty()) {
        let hit = rules
            .teacher_unavailable
            .iter()
            .filter(|r| r.teacher_id == *tid && r.day_index == day_index)
            .find(|r| ranges_overlap(start, end, &r.start, &r.end));
        if let Some(rule) = hit {
            hits.push((tid.as_str(), rule));
        }
    }
    hits
}

// ---------------------------------------------------------------------------
// Subject windows
// ---------------------------------------------------------------------------

/// Why a subject-window check blocked a placement.
#[derive(Debug, Clone, PartialEq)]
pub enum SubjectTimeBlock<'a> {
    /// Allow windows exist for this subject/day and the candidate fits inside
    /// none of them. Carries the full permitted set for the message.
    OutsideAllowed(Vec<&'a SubjectWindow>),
    /// The candidate overlaps this forbid window.
    Forbidden(&'a SubjectWindow),
}

/// Evaluate the subject's allow/forbid windows for the candidate's day.
///
/// With one or more allow windows present the candidate must be fully
/// enclosed by at least one; independently it must not overlap any forbid
/// window. No rules for this subject/day, or an empty subject, means
/// unblocked. Subjects are matched trimmed and case-insensitively.
pub fn check_subject_time<'a>(
    rules: &'a TimeRules,
    area: &str,
    day_index: usize,
    start: &str,
    end: &str,
) -> Option<SubjectTimeBlock<'a>> {
    if area.trim().is_empty() {
        return None;
    }
    let day_rules: Vec<&SubjectWindow> = rules
        .subject_windows
        .iter()
        .filter(|r| r.day_index == day_index && same_area(&r.area, area))
        .collect();
    if day_rules.is_empty() {
        return None;
    }

    let allow: Vec<&SubjectWindow> = day_rules
        .iter()
        .copied()
        .filter(|r| r.mode == WindowMode::Allow)
        .collect();
    if !allow.is_empty() {
        let fits = allow.iter().any(|r| encloses(start, end, &r.start, &r.end));
        if !fits {
            return Some(SubjectTimeBlock::OutsideAllowed(allow));
        }
    }

    day_rules
        .into_iter()
        .filter(|r| r.mode == WindowMode::Forbid)
        .find(|r| ranges_overlap(start, end, &r.start, &r.end))
        .map(SubjectTimeBlock::Forbidden)
}

// ---------------------------------------------------------------------------
// Teacher-subject eligibility
// ---------------------------------------------------------------------------

/// Attached teachers whose non-empty qualification list does not contain the
/// candidate's subject. Teachers with an empty list are unrestricted. Empty
/// subjects are everyone's to teach.
pub fn unqualified_teachers<'a>(
    teachers: &'a [Teacher],
    teacher_ids: &[String],
    area: &str,
) -> Vec<&'a Teacher> {
    if area.trim().is_empty() {
        return Vec::new();
    }
    teacher_ids
        .iter()
        .filter_map(|tid| teachers.iter().find(|t| &t.id == tid))
        .filter(|t| !t.areas.is_empty() && !t.areas.iter().any(|a| same_area(a, area)))
        .collect()
}

// ---------------------------------------------------------------------------
// Slot post-filtering
// ---------------------------------------------------------------------------

/// Drop suggested slots that the time rules would reject for this subject and
/// teacher set. The free-slot search only checks bookings; hosts layer this
/// on so suggestions never recommend an illegal time.
pub fn filter_slots_by_rules(
    rules: &TimeRules,
    area: &str,
    teacher_ids: &[String],
    slots: Vec<Slot>,
) -> Vec<Slot> {
    slots
        .into_iter()
        .filter(|s| {
            check_teacher_time(rules, teacher_ids, s.day_index, &s.start, &s.end).is_empty()
                && check_subject_time(rules, area, s.day_index, &s.start, &s.end).is_none()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
