#![deny(clippy::all)]

use napi_derive::napi;
use rota_engine::model as engine;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[napi(string_enum)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowMode {
    Allow,
    Forbid,
}

impl From<WindowMode> for engine::WindowMode {
    fn from(v: WindowMode) -> Self {
        match v {
            WindowMode::Allow => engine::WindowMode::Allow,
            WindowMode::Forbid => engine::WindowMode::Forbid,
        }
    }
}

impl From<engine::WindowMode> for WindowMode {
    fn from(v: engine::WindowMode) -> Self {
        match v {
            engine::WindowMode::Allow => WindowMode::Allow,
            engine::WindowMode::Forbid => WindowMode::Forbid,
        }
    }
}

/// Bulk-placement strategy selector; `Fixed` uses `start`/`days_picked`,
/// `Autofill` uses `start_day_index`.
#[napi(string_enum)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyKind {
    Fixed,
    Autofill,
}

// ---------------------------------------------------------------------------
// Mirror types: configuration and entities
// ---------------------------------------------------------------------------

#[napi(object)]
#[derive(Debug, Clone)]
pub struct TimetableConfig {
    pub days: Vec<String>,
    pub start_hour: u32,
    pub end_hour: u32,
    pub slots_per_hour: u32,
}

impl From<TimetableConfig> for engine::TimetableConfig {
    fn from(v: TimetableConfig) -> Self {
        engine::TimetableConfig {
            days: v.days,
            start_hour: v.start_hour,
            end_hour: v.end_hour,
            slots_per_hour: v.slots_per_hour,
        }
    }
}

impl From<engine::TimetableConfig> for TimetableConfig {
    fn from(v: engine::TimetableConfig) -> Self {
        TimetableConfig {
            days: v.days,
            start_hour: v.start_hour,
            end_hour: v.end_hour,
            slots_per_hour: v.slots_per_hour,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub areas: Vec<String>,
    pub color: Option<String>,
}

impl From<Teacher> for engine::Teacher {
    fn from(v: Teacher) -> Self {
        engine::Teacher {
            id: v.id,
            name: v.name,
            areas: v.areas,
            color: v.color,
        }
    }
}

impl From<engine::Teacher> for Teacher {
    fn from(v: engine::Teacher) -> Self {
        Teacher {
            id: v.id,
            name: v.name,
            areas: v.areas,
            color: v.color,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub capacity: Option<u32>,
}

impl From<Room> for engine::Room {
    fn from(v: Room) -> Self {
        engine::Room {
            id: v.id,
            name: v.name,
            capacity: v.capacity,
        }
    }
}

impl From<engine::Room> for Room {
    fn from(v: engine::Room) -> Self {
        Room {
            id: v.id,
            name: v.name,
            capacity: v.capacity,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub area: String,
    pub day_index: u32,
    pub start: String,
    pub end: String,
    pub teacher_ids: Vec<String>,
    pub room_id: Option<String>,
    pub class_size: Option<u32>,
    pub color: Option<String>,
}

impl From<Event> for engine::Event {
    fn from(v: Event) -> Self {
        engine::Event {
            id: v.id,
            title: v.title,
            area: v.area,
            day_index: v.day_index as usize,
            start: v.start,
            end: v.end,
            teacher_ids: v.teacher_ids,
            room_id: v.room_id,
            class_size: v.class_size,
            color: v.color,
        }
    }
}

impl From<engine::Event> for Event {
    fn from(v: engine::Event) -> Self {
        Event {
            id: v.id,
            title: v.title,
            area: v.area,
            day_index: v.day_index as u32,
            start: v.start,
            end: v.end,
            teacher_ids: v.teacher_ids,
            room_id: v.room_id,
            class_size: v.class_size,
            color: v.color,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct Break {
    pub id: String,
    pub day_index: u32,
    pub start: String,
    pub end: String,
    pub label: String,
    pub color: Option<String>,
}

impl From<Break> for engine::Break {
    fn from(v: Break) -> Self {
        engine::Break {
            id: v.id,
            day_index: v.day_index as usize,
            start: v.start,
            end: v.end,
            label: v.label,
            color: v.color,
        }
    }
}

impl From<engine::Break> for Break {
    fn from(v: engine::Break) -> Self {
        Break {
            id: v.id,
            day_index: v.day_index as u32,
            start: v.start,
            end: v.end,
            label: v.label,
            color: v.color,
        }
    }
}

// ---------------------------------------------------------------------------
// Mirror types: constraint rules
// ---------------------------------------------------------------------------

#[napi(object)]
#[derive(Debug, Clone)]
pub struct RoomLimit {
    pub room_id: String,
    pub area: String,
    pub max_per_week: u32,
}

impl From<RoomLimit> for engine::RoomLimit {
    fn from(v: RoomLimit) -> Self {
        engine::RoomLimit {
            room_id: v.room_id,
            area: v.area,
            max_per_week: v.max_per_week,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct TeacherLimit {
    pub teacher_id: String,
    pub area: String,
    pub max_per_week: u32,
}

impl From<TeacherLimit> for engine::TeacherLimit {
    fn from(v: TeacherLimit) -> Self {
        engine::TeacherLimit {
            teacher_id: v.teacher_id,
            area: v.area,
            max_per_week: v.max_per_week,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct TeacherUnavailability {
    pub id: String,
    pub teacher_id: String,
    pub day_index: u32,
    pub start: String,
    pub end: String,
    pub note: Option<String>,
}

impl From<TeacherUnavailability> for engine::TeacherUnavailability {
    fn from(v: TeacherUnavailability) -> Self {
        engine::TeacherUnavailability {
            id: v.id,
            teacher_id: v.teacher_id,
            day_index: v.day_index as usize,
            start: v.start,
            end: v.end,
            note: v.note,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct SubjectWindow {
    pub id: String,
    pub area: String,
    pub day_index: u32,
    pub start: String,
    pub end: String,
    pub mode: WindowMode,
    pub note: Option<String>,
}

impl From<SubjectWindow> for engine::SubjectWindow {
    fn from(v: SubjectWindow) -> Self {
        engine::SubjectWindow {
            id: v.id,
            area: v.area,
            day_index: v.day_index as usize,
            start: v.start,
            end: v.end,
            mode: v.mode.into(),
            note: v.note,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct TimeRules {
    pub teacher_unavailable: Vec<TeacherUnavailability>,
    pub subject_windows: Vec<SubjectWindow>,
}

impl From<TimeRules> for engine::TimeRules {
    fn from(v: TimeRules) -> Self {
        engine::TimeRules {
            teacher_unavailable: v.teacher_unavailable.into_iter().map(Into::into).collect(),
            subject_windows: v.subject_windows.into_iter().map(Into::into).collect(),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct LimitsEnabled {
    pub room_limits: bool,
    pub teacher_limits: bool,
}

impl From<LimitsEnabled> for engine::LimitsEnabled {
    fn from(v: LimitsEnabled) -> Self {
        engine::LimitsEnabled {
            room_limits: v.room_limits,
            teacher_limits: v.teacher_limits,
        }
    }
}

// ---------------------------------------------------------------------------
// Mirror types: snapshot
// ---------------------------------------------------------------------------

#[napi(object)]
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    pub config: TimetableConfig,
    pub limits_enabled: LimitsEnabled,
    pub room_limits: Vec<RoomLimit>,
    pub teacher_limits: Vec<TeacherLimit>,
    pub rooms: Vec<Room>,
    pub teachers: Vec<Teacher>,
    pub events: Vec<Event>,
    pub breaks: Vec<Break>,
    pub time_rules: TimeRules,
}

impl From<StateSnapshot> for engine::StateSnapshot {
    fn from(v: StateSnapshot) -> Self {
        engine::StateSnapshot {
            config: v.config.into(),
            limits_enabled: v.limits_enabled.into(),
            room_limits: v.room_limits.into_iter().map(Into::into).collect(),
            teacher_limits: v.teacher_limits.into_iter().map(Into::into).collect(),
            rooms: v.rooms.into_iter().map(Into::into).collect(),
            teachers: v.teachers.into_iter().map(Into::into).collect(),
            events: v.events.into_iter().map(Into::into).collect(),
            breaks: v.breaks.into_iter().map(Into::into).collect(),
            time_rules: v.time_rules.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Mirror types: results
// ---------------------------------------------------------------------------

#[napi(object)]
#[derive(Debug, Clone)]
pub struct Verdict {
    pub blocked: bool,
    pub messages: Vec<String>,
}

impl From<engine::Verdict> for Verdict {
    fn from(v: engine::Verdict) -> Self {
        Verdict {
            blocked: v.blocked,
            messages: v.messages,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct Slot {
    pub day_index: u32,
    pub start: String,
    pub end: String,
    pub room_id: Option<String>,
}

impl From<engine::Slot> for Slot {
    fn from(v: engine::Slot) -> Self {
        Slot {
            day_index: v.day_index as u32,
            start: v.start,
            end: v.end,
            room_id: v.room_id,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct SlotQuery {
    pub teacher_id: Option<String>,
    pub room_id: Option<String>,
    pub day_index: Option<u32>,
    pub class_len_mins: u32,
    pub limit: u32,
}

impl From<SlotQuery> for rota_engine::slots::SlotQuery {
    fn from(v: SlotQuery) -> Self {
        rota_engine::slots::SlotQuery {
            teacher_id: v.teacher_id,
            room_id: v.room_id,
            day_index: v.day_index.map(|d| d as usize),
            class_len_mins: v.class_len_mins,
            limit: v.limit as usize,
        }
    }
}

/// Flattened strategy parameters: `kind` selects which of the optional
/// fields apply, the way the host's prepopulate dialog submits them.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct PrepopulateParams {
    pub kind: StrategyKind,
    pub start: Option<String>,
    pub days_picked: Option<Vec<u32>>,
    pub start_day_index: Option<u32>,
    pub teacher_id: Option<String>,
    pub room_id: Option<String>,
    pub subject: String,
    pub duration_mins: u32,
    pub count: u32,
}

impl From<PrepopulateParams> for rota_engine::prepopulate::PrepopulateParams {
    fn from(v: PrepopulateParams) -> Self {
        let strategy = match v.kind {
            StrategyKind::Fixed => rota_engine::prepopulate::Strategy::Fixed {
                start: v.start.unwrap_or_default(),
                days_picked: v
                    .days_picked
                    .unwrap_or_default()
                    .into_iter()
                    .map(|d| d as usize)
                    .collect(),
            },
            StrategyKind::Autofill => rota_engine::prepopulate::Strategy::Autofill {
                start_day_index: v.start_day_index.unwrap_or(0) as usize,
            },
        };
        rota_engine::prepopulate::PrepopulateParams {
            strategy,
            teacher_id: v.teacher_id,
            room_id: v.room_id,
            subject: v.subject,
            duration_mins: v.duration_mins,
            count: v.count as usize,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct RejectedCandidate {
    pub candidate: Event,
    pub messages: Vec<String>,
}

impl From<rota_engine::prepopulate::RejectedCandidate> for RejectedCandidate {
    fn from(v: rota_engine::prepopulate::RejectedCandidate) -> Self {
        RejectedCandidate {
            candidate: v.candidate.into(),
            messages: v.messages,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct PrepopulateOutcome {
    pub accepted: Vec<Event>,
    pub rejected: Vec<RejectedCandidate>,
}

impl From<rota_engine::prepopulate::PrepopulateOutcome> for PrepopulateOutcome {
    fn from(v: rota_engine::prepopulate::PrepopulateOutcome) -> Self {
        PrepopulateOutcome {
            accepted: v.accepted.into_iter().map(Into::into).collect(),
            rejected: v.rejected.into_iter().map(Into::into).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Exported functions
// ---------------------------------------------------------------------------

/// Run the constraint aggregator over one candidate placement.
/// The grid config and the candidate's times are pre-checked; both are hard
/// errors rather than verdicts.
#[napi]
pub fn validate(candidate: Event, state: StateSnapshot) -> napi::Result<Verdict> {
    let engine_state = engine::StateSnapshot::from(state);
    engine_state
        .config
        .validate()
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;

    let engine_candidate = engine::Event::from(candidate);
    engine_candidate
        .check_placement(&engine_state.config)
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;

    Ok(rota_engine::validate::validate(&engine_candidate, &engine_state).into())
}

/// Free-slot suggestions, post-filtered through the time rules for the given
/// subject and the queried teacher.
#[napi]
pub fn suggest(
    query: SlotQuery,
    state: StateSnapshot,
    area: Option<String>,
) -> napi::Result<Vec<Slot>> {
    let engine_state = engine::StateSnapshot::from(state);
    engine_state
        .config
        .validate()
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;

    let engine_query = rota_engine::slots::SlotQuery::from(query);
    let teacher_ids: Vec<String> = engine_query
        .teacher_id
        .iter()
        .filter(|t| !t.is_empty())
        .cloned()
        .collect();

    let raw = rota_engine::slots::suggest_free_slots(
        &engine_state.config,
        &engine_state.events,
        &engine_state.breaks,
        &engine_query,
    );
    let filtered = rota_engine::rules::filter_slots_by_rules(
        &engine_state.time_rules,
        area.as_deref().unwrap_or(""),
        &teacher_ids,
        raw,
    );
    Ok(filtered.into_iter().map(Into::into).collect())
}

/// Bulk candidate generation with accept/reject partitioning.
#[napi]
pub fn prepopulate(params: PrepopulateParams, state: StateSnapshot) -> napi::Result<PrepopulateOutcome> {
    let engine_state = engine::StateSnapshot::from(state);
    engine_state
        .config
        .validate()
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;

    let engine_params = rota_engine::prepopulate::PrepopulateParams::from(params);
    Ok(rota_engine::prepopulate::prepopulate(&engine_params, &engine_state).into())
}
