use super::handlers;
use super::types::{AppState, Request};
use crate::config::CallKind;
use crate::ipc::error::err;

fn call_kind(method: &str) -> CallKind {
    match method {
        "students.get" | "courses.get" | "faculty.get" | "grades.forStudent"
        | "grades.forCourse" => CallKind::Lookup,
        "students.create" | "students.update" | "students.delete" | "grades.upsert" => {
            CallKind::Mutation
        }
        "export.csv" => CallKind::Export,
        _ => CallKind::List,
    }
}

fn dispatch(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Some(resp) = handlers::core::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::students::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::courses::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::grades::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::reports::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::export::try_handle(state, req) {
        return resp;
    }

    err(
        &req.id,
        "not_implemented",
        format!("unknown method: {}", req.method),
        None,
    )
}

pub fn handle_request(state: &mut AppState, req: Request) -> serde_json::Value {
    let _span = tracing::debug_span!("request", id = %req.id, method = %req.method).entered();

    if req.method != "health" && req.method != "store.reset" {
        let delay = state.latency.delay_for(call_kind(&req.method));
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    let resp = dispatch(state, &req);
    if resp.get("ok").and_then(|v| v.as_bool()) == Some(false) {
        let code = resp
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        tracing::warn!(code, "request failed");
    } else {
        tracing::debug!("request ok");
    }
    resp
}
