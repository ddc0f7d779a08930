use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Hard errors in the timetable grid definition. A snapshot carrying a broken
/// config is rejected before any check runs.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Timetable has no days configured")]
    NoDays,
    #[error("Start hour {0} must be before end hour {1}")]
    InvalidHours(u32, u32),
    #[error("Slots per hour must be a positive divisor of 60, got {0}")]
    InvalidGranularity(u32),
}

/// Hard errors on a candidate event's placement fields. These are the save-path
/// pre-checks the host form performs before asking for a verdict; the checkers
/// themselves never fail on malformed times (they degrade to minute 0).
#[derive(Debug, thiserror::Error)]
pub enum CandidateError {
    #[error("Invalid time '{0}' -- expected HH:MM")]
    BadTimeFormat(String),
    #[error("Invalid time range ({0}\u{2013}{1}) -- start must be before end")]
    StartNotBeforeEnd(String, String),
    #[error("Day index {0} is outside the configured week of {1} day(s)")]
    DayOutOfRange(usize, usize),
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Whether a subject time window permits or excludes placements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    /// The subject may only be scheduled fully inside such a window.
    Allow,
    /// The subject may not overlap such a window.
    Forbid,
}

// ---------------------------------------------------------------------------
// Grid configuration
// ---------------------------------------------------------------------------

/// The weekly grid: ordered day names, daily hour span, and slot granularity.
/// Loaded and persisted by the host; passed here read-only on every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableConfig {
    /// Day names in schedule order. Index into this list is the `day_index`
    /// used everywhere else.
    pub days: Vec<String>,
    pub start_hour: u32,
    pub end_hour: u32,
    /// Slot columns per hour; the lesson grid unit is `60 / slots_per_hour`
    /// minutes.
    pub slots_per_hour: u32,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        TimetableConfig {
            days: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            start_hour: 8,
            end_hour: 16,
            slots_per_hour: 2,
        }
    }
}

impl TimetableConfig {
    /// Length of one grid slot in minutes.
    pub fn slot_len_mins(&self) -> u32 {
        60 / self.slots_per_hour.max(1)
    }

    /// First bookable minute of a day.
    pub fn day_start_min(&self) -> u32 {
        self.start_hour * 60
    }

    /// First minute past the bookable span of a day.
    pub fn day_end_min(&self) -> u32 {
        self.end_hour * 60
    }

    /// Display name for a day index, with a generic fallback for out-of-range
    /// indices so messages never panic.
    pub fn day_name(&self, day_index: usize) -> String {
        self.days
            .get(day_index)
            .cloned()
            .unwrap_or_else(|| format!("Day {}", day_index + 1))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days.is_empty() {
            return Err(ConfigError::NoDays);
        }
        if self.start_hour >= self.end_hour {
            return Err(ConfigError::InvalidHours(self.start_hour, self.end_hour));
        }
        if self.slots_per_hour == 0 || 60 % self.slots_per_hour != 0 {
            return Err(ConfigError::InvalidGranularity(self.slots_per_hour));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A teacher. An empty `areas` list means unrestricted: the teacher may be
/// attached to lessons of any subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub name: String,
    /// Subject areas this teacher is qualified to teach.
    #[serde(default)]
    pub areas: Vec<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// A room. `capacity: None` means unconstrained.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// A scheduled (or proposed) lesson on the weekly grid.
///
/// Every teacher-scoped rule operates on the whole `teacher_ids` set: any
/// attached teacher triggering a rule blocks the placement. The first id is
/// the primary teacher used for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Opaque host-assigned id. Candidates not yet committed carry "".
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Subject area; "" means no subject (subject-scoped checks skip it).
    #[serde(default)]
    pub area: String,
    pub day_index: usize,
    /// `HH:MM`, strictly before `end` on the save path.
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub teacher_ids: Vec<String>,
    #[serde(default)]
    pub room_id: Option<String>,
    /// Declared class size; absent or zero disables the capacity check.
    #[serde(default)]
    pub class_size: Option<u32>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Event {
    /// Room id with the host's "no room" empty-string convention folded away.
    pub fn room(&self) -> Option<&str> {
        self.room_id.as_deref().filter(|r| !r.is_empty())
    }

    /// True when the event names a subject after trimming.
    pub fn has_subject(&self) -> bool {
        !self.area.trim().is_empty()
    }

    /// Save-path pre-checks: time format, time order, day bounds.
    pub fn check_placement(&self, config: &TimetableConfig) -> Result<(), CandidateError> {
        for t in [&self.start, &self.end] {
            if !crate::time::is_valid_hhmm(t) {
                return Err(CandidateError::BadTimeFormat(t.clone()));
            }
        }
        if crate::time::to_minutes(&self.start) >= crate::time::to_minutes(&self.end) {
            return Err(CandidateError::StartNotBeforeEnd(
                self.start.clone(),
                self.end.clone(),
            ));
        }
        if self.day_index >= config.days.len() {
            return Err(CandidateError::DayOutOfRange(
                self.day_index,
                config.days.len(),
            ));
        }
        Ok(())
    }
}

/// A day-wide non-bookable band. Breaks apply to every room and teacher on
/// their day; free-slot search skips them, the verdict does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Break {
    #[serde(default)]
    pub id: String,
    pub day_index: usize,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub color: Option<String>,
}

// ---------------------------------------------------------------------------
// Constraint rules
// ---------------------------------------------------------------------------

/// Weekly lesson cap for a (room, subject) pair. The host keeps at most one
/// row per pair; adding a duplicate overwrites the cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomLimit {
    pub room_id: String,
    pub area: String,
    pub max_per_week: u32,
}

/// Weekly lesson cap for a (teacher, subject) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherLimit {
    pub teacher_id: String,
    pub area: String,
    pub max_per_week: u32,
}

/// A blackout band during which a teacher cannot be booked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherUnavailability {
    #[serde(default)]
    pub id: String,
    pub teacher_id: String,
    pub day_index: usize,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// An allow or forbid time window for a subject on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectWindow {
    #[serde(default)]
    pub id: String,
    pub area: String,
    pub day_index: usize,
    pub start: String,
    pub end: String,
    pub mode: WindowMode,
    #[serde(default)]
    pub note: Option<String>,
}

/// All time-scoped rules, bundled the way the host persists them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRules {
    #[serde(default)]
    pub teacher_unavailable: Vec<TeacherUnavailability>,
    #[serde(default)]
    pub subject_windows: Vec<SubjectWindow>,
}

/// Independent gates for the two weekly-quota checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsEnabled {
    pub room_limits: bool,
    pub teacher_limits: bool,
}

impl Default for LimitsEnabled {
    fn default() -> Self {
        LimitsEnabled {
            room_limits: true,
            teacher_limits: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot and results
// ---------------------------------------------------------------------------

/// The full read-only state bundle every entry point receives. Owned and
/// mutated only by the host between calls; the engine never stores entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    #[serde(default)]
    pub config: TimetableConfig,
    #[serde(default)]
    pub limits_enabled: LimitsEnabled,
    #[serde(default)]
    pub room_limits: Vec<RoomLimit>,
    #[serde(default)]
    pub teacher_limits: Vec<TeacherLimit>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub breaks: Vec<Break>,
    #[serde(default)]
    pub time_rules: TimeRules,
}

/// The aggregator's decision: blocked iff at least one message was collected.
/// Message order is the fixed check order, so two identical calls produce
/// identical verdicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub blocked: bool,
    pub messages: Vec<String>,
}

impl Verdict {
    pub fn from_messages(messages: Vec<String>) -> Self {
        Verdict {
            blocked: !messages.is_empty(),
            messages,
        }
    }

    pub fn is_allowed(&self) -> bool {
        !self.blocked
    }
}

/// One suggested placement from the free-slot search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub day_index: usize,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub room_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Subject normalization
// ---------------------------------------------------------------------------

/// One normalization policy for subject strings everywhere: trim, then
/// case-insensitive comparison. Quota keys and window rules use the same
/// policy.
pub fn normalize_area(area: &str) -> String {
    area.trim().to_lowercase()
}

/// Case-insensitive, trimmed subject equality.
pub fn same_area(a: &str, b: &str) -> bool {
    normalize_area(a) == normalize_area(b)
}
