//! # rota-engine
//!
//! Validation and free-slot search core for a weekly timetable editor.
//!
//! The host application owns all state (teachers, rooms, events, rules) and
//! passes a read-only snapshot into every call; the engine is a layer of pure
//! functions that answers "may this lesson be placed here, and if not, why
//! not" plus "where could it go instead". It never stores, creates, or
//! deletes entities.
//!
//! ## Modules
//!
//! - [`model`] — entities, rules, snapshot, verdict
//! - [`time`] — `HH:MM` arithmetic and interval tests
//! - [`conflict`] — double-booking and capacity detection
//! - [`rules`] — blackouts, subject windows, eligibility
//! - [`limits`] — weekly per-subject quotas
//! - [`validate`] — the ordered, collect-all constraint aggregator
//! - [`slots`] — free-slot enumeration over the configured grid
//! - [`prepopulate`] — bulk candidate generation and partitioning

pub mod conflict;
pub mod limits;
pub mod model;
pub mod prepopulate;
pub mod rules;
pub mod slots;
pub mod time;
pub mod validate;

pub use model::{Event, Slot, StateSnapshot, TimetableConfig, Verdict};
pub use prepopulate::{prepopulate, PrepopulateOutcome, PrepopulateParams, Strategy};
pub use slots::{suggest_free_slots, SlotQuery};
pub use validate::validate;
