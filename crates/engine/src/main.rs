use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};

use rota_engine::model::{Event, StateSnapshot};
use rota_engine::prepopulate::{prepopulate, PrepopulateParams};
use rota_engine::rules::filter_slots_by_rules;
use rota_engine::slots::{suggest_free_slots, SlotQuery};
use rota_engine::validate::validate;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
enum Request {
    /// Verdict for one candidate placement.
    Validate {
        candidate: Event,
        state: StateSnapshot,
    },
    /// Free-slot suggestions, post-filtered through the time rules so no
    /// suggested slot would fail validation on a blackout or subject window
    /// (the add-class dialog's composition).
    Suggest {
        query: SlotQuery,
        state: StateSnapshot,
        #[serde(default)]
        area: Option<String>,
    },
    /// Bulk candidate generation with accept/reject partitioning.
    Prepopulate {
        params: PrepopulateParams,
        state: StateSnapshot,
    },
}

#[derive(Debug, Serialize)]
struct OkResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ErrResponse {
    ok: bool,
    error: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_ok<T: Serialize>(data: T) {
    let resp = OkResponse { ok: true, data };
    let json = serde_json::to_string(&resp).unwrap_or_else(|e| {
        format!("{{\"ok\":false,\"error\":\"serialization error: {}\"}}", e)
    });
    println!("{}", json);
    let _ = io::stdout().flush();
}

fn write_err(msg: impl std::fmt::Display) -> ! {
    let resp = ErrResponse {
        ok: false,
        error: msg.to_string(),
    };
    let json = serde_json::to_string(&resp)
        .unwrap_or_else(|_| "{\"ok\":false,\"error\":\"double serialization error\"}".to_string());
    println!("{}", json);
    let _ = io::stdout().flush();
    std::process::exit(1);
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    // Read all of stdin
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        write_err(format!("Failed to read stdin: {}", e));
    }

    // Parse request
    let request: Request = match serde_json::from_str(&input) {
        Ok(r) => r,
        Err(e) => write_err(format!("Invalid JSON input: {}", e)),
    };

    match request {
        Request::Validate { candidate, state } => {
            if let Err(e) = state.config.validate() {
                write_err(e);
            }
            // Save-path pre-checks are hard errors; the verdict only speaks
            // about well-formed candidates.
            if let Err(e) = candidate.check_placement(&state.config) {
                write_err(e);
            }
            write_ok(validate(&candidate, &state));
        }
        Request::Suggest { query, state, area } => {
            if let Err(e) = state.config.validate() {
                write_err(e);
            }
            let raw = suggest_free_slots(&state.config, &state.events, &state.breaks, &query);
            let teacher_ids: Vec<String> = query
                .teacher_id
                .iter()
                .filter(|t| !t.is_empty())
                .cloned()
                .collect();
            let area = area.unwrap_or_default();
            write_ok(filter_slots_by_rules(
                &state.time_rules,
                &area,
                &teacher_ids,
                raw,
            ));
        }
        Request::Prepopulate { params, state } => {
            if let Err(e) = state.config.validate() {
                write_err(e);
            }
            write_ok(prepopulate(&params, &state));
        }
    }
}
