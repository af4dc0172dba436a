use crate::activity::{Activity, ActivityKind};
use crate::ipc::error::{err, ok, store_err};
use crate::ipc::helpers::{optional_i64, optional_str, page_request, parse_payload, required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::{NewStudent, StudentPatch, StudentStatus};
use crate::mutate;
use crate::query::{self, StudentFilter};
use serde_json::json;

fn parse_student_filter(req: &Request) -> Result<StudentFilter, serde_json::Value> {
    let year = match optional_i64(req, "year")? {
        None => None,
        Some(y @ 1..=4) => Some(y as u8),
        Some(y) => {
            return Err(err(
                &req.id,
                "bad_params",
                "year must be between 1 and 4",
                Some(json!({ "year": y })),
            ))
        }
    };
    let status = match optional_str(req, "status")? {
        None => None,
        Some(s) => Some(
            s.parse::<StudentStatus>()
                .map_err(|m| err(&req.id, "bad_params", m, None))?,
        ),
    };
    Ok(StudentFilter {
        search: optional_str(req, "search")?,
        year,
        major: optional_str(req, "major")?,
        status,
    })
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let filter = match parse_student_filter(req) {
        Ok(f) => f,
        Err(e) => return e,
    };
    let page = match page_request(req) {
        Ok(p) => p,
        Err(e) => return e,
    };
    let res = query::list_students(&state.store, &filter, page);
    ok(
        &req.id,
        json!({
            "students": res.items,
            "total": res.total,
            "page": page.page,
            "limit": page.limit,
        }),
    )
}

fn handle_students_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_str(req, "id") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match query::get_student(&state.store, &id) {
        Ok(s) => ok(&req.id, json!({ "student": s })),
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let input: NewStudent = match parse_payload(req, req.params.clone()) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match mutate::create_student(&mut state.store, input) {
        Ok(student) => {
            tracing::info!(student_id = %student.id, "student created");
            state.activity.record(
                Activity::new(ActivityKind::StudentAdded)
                    .student(student.id.clone(), student.name.clone())
                    .major(student.major.clone()),
            );
            ok(&req.id, json!({ "student": student }))
        }
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_students_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_str(req, "id") {
        Ok(v) => v,
        Err(e) => return e,
    };
    // Accept either { id, patch: {...} } or the fields inline next to id.
    let raw = req
        .params
        .get("patch")
        .cloned()
        .unwrap_or_else(|| req.params.clone());
    let patch: StudentPatch = match parse_payload(req, raw) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let changed = !patch.is_empty();
    match mutate::update_student(&mut state.store, &id, patch) {
        Ok(student) => {
            tracing::info!(student_id = %student.id, changed, "student updated");
            if changed {
                state.activity.record(
                    Activity::new(ActivityKind::StudentUpdated)
                        .student(student.id.clone(), student.name.clone())
                        .major(student.major.clone()),
                );
            }
            ok(&req.id, json!({ "student": student }))
        }
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_students_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_str(req, "id") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let removed = mutate::delete_student(&mut state.store, &id);
    if let Some(student) = &removed {
        tracing::info!(student_id = %student.id, "student deleted");
        state.activity.record(
            Activity::new(ActivityKind::StudentRemoved)
                .student(student.id.clone(), student.name.clone())
                .major(student.major.clone()),
        );
    }
    ok(&req.id, json!({ "deleted": removed.is_some() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.get" => Some(handle_students_get(state, req)),
        "students.create" => Some(handle_students_create(state, req)),
        "students.update" => Some(handle_students_update(state, req)),
        "students.delete" => Some(handle_students_delete(state, req)),
        _ => None,
    }
}
