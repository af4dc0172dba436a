use crate::ipc::error::{ok, store_err};
use crate::ipc::helpers::{optional_str, page_request, required_str};
use crate::ipc::types::{AppState, Request};
use crate::query::{self, CourseFilter};
use serde_json::json;

fn parse_course_filter(req: &Request) -> Result<CourseFilter, serde_json::Value> {
    Ok(CourseFilter {
        search: optional_str(req, "search")?,
        department: optional_str(req, "department")?,
        semester: optional_str(req, "semester")?,
    })
}

fn handle_courses_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let filter = match parse_course_filter(req) {
        Ok(f) => f,
        Err(e) => return e,
    };
    let page = match page_request(req) {
        Ok(p) => p,
        Err(e) => return e,
    };
    let res = query::list_courses(&state.store, &filter, page);
    ok(
        &req.id,
        json!({
            "courses": res.items,
            "total": res.total,
            "page": page.page,
            "limit": page.limit,
        }),
    )
}

fn handle_courses_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_str(req, "id") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match query::get_course(&state.store, &id) {
        Ok(c) => ok(&req.id, json!({ "course": c })),
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_faculty_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({ "faculty": query::list_faculty(&state.store) }),
    )
}

fn handle_faculty_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_str(req, "id") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match query::get_faculty(&state.store, &id) {
        Ok(f) => ok(&req.id, json!({ "faculty": f })),
        Err(e) => store_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "courses.list" => Some(handle_courses_list(state, req)),
        "courses.get" => Some(handle_courses_get(state, req)),
        "faculty.list" => Some(handle_faculty_list(state, req)),
        "faculty.get" => Some(handle_faculty_get(state, req)),
        _ => None,
    }
}
