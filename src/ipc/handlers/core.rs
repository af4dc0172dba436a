use crate::config::CallKind;
use crate::ipc::error::{err, ok, store_err};
use crate::ipc::helpers::optional_i64;
use crate::ipc::types::{AppState, Request};
use crate::store::{SeedOptions, StoreSource};
use serde_json::json;

fn record_counts(state: &AppState) -> serde_json::Value {
    json!({
        "students": state.store.students.len(),
        "courses": state.store.courses.len(),
        "faculty": state.store.faculty.len(),
        "grades": state.store.grades.len(),
    })
}

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    let delay_ms = |kind| state.latency.delay_for(kind).as_millis() as u64;
    ok(
        &req.id,
        json!({
            "status": "online",
            "version": env!("CARGO_PKG_VERSION"),
            "term": state.store.term,
            "source": state.source.as_str(),
            "records": record_counts(state),
            "activity": state.activity.len(),
            "latency": {
                "enabled": state.latency.enabled,
                "lookupMs": delay_ms(CallKind::Lookup),
                "listMs": delay_ms(CallKind::List),
                "mutationMs": delay_ms(CallKind::Mutation),
                "exportMs": delay_ms(CallKind::Export),
            },
        }),
    )
}

fn handle_store_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    let seed = match optional_i64(req, "seed") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let empty = req
        .params
        .get("empty")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let seed = match seed.map(u64::try_from).transpose() {
        Ok(v) => v,
        Err(_) => return err(&req.id, "bad_params", "seed must not be negative", None),
    };

    // Explicit params win; otherwise rebuild from whatever the daemon started with.
    let source = match (empty, seed) {
        (true, _) => StoreSource::Empty,
        (false, Some(_)) => StoreSource::Seeded,
        (false, None) => state.source.clone(),
    };
    let opts = SeedOptions {
        seed: seed.unwrap_or(state.seed.seed),
        term: state.store.term.clone(),
        ..state.seed.clone()
    };
    state.store = match source.build(&opts) {
        Ok(store) => store,
        Err(e) => return store_err(&req.id, &e),
    };
    state.activity.clear();

    tracing::info!(
        students = state.store.students.len(),
        courses = state.store.courses.len(),
        source = source.as_str(),
        "store reset"
    );
    ok(&req.id, record_counts(state))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "store.reset" => Some(handle_store_reset(state, req)),
        _ => None,
    }
}
