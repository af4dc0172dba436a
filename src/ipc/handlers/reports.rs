use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{optional_str, report_limit};
use crate::ipc::types::{AppState, Request};
use crate::model::StudentStatus;
use crate::reports;
use serde_json::json;

const DEFAULT_REPORT_LIMIT: usize = 10;

fn handle_dashboard_stats(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!(reports::dashboard_stats(&state.store)))
}

fn handle_top_students(state: &mut AppState, req: &Request) -> serde_json::Value {
    let limit = match report_limit(req, DEFAULT_REPORT_LIMIT) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let status = match optional_str(req, "status") {
        Ok(None) => None,
        Ok(Some(s)) => match s.parse::<StudentStatus>() {
            Ok(st) => Some(st),
            Err(m) => return err(&req.id, "bad_params", m, None),
        },
        Err(e) => return e,
    };
    let students = reports::top_students(&state.store, limit, status);
    ok(&req.id, json!({ "students": students }))
}

fn handle_popular_courses(state: &mut AppState, req: &Request) -> serde_json::Value {
    let limit = match report_limit(req, DEFAULT_REPORT_LIMIT) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let courses = reports::popular_courses(&state.store, limit);
    ok(&req.id, json!({ "courses": courses }))
}

fn handle_course_enrollments(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!(reports::course_enrollments(&state.store)))
}

fn handle_activity_recent(state: &mut AppState, req: &Request) -> serde_json::Value {
    let limit = match report_limit(req, DEFAULT_REPORT_LIMIT) {
        Ok(v) => v,
        Err(e) => return e,
    };
    ok(
        &req.id,
        json!({ "activity": state.activity.recent(limit) }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dashboard.stats" => Some(handle_dashboard_stats(state, req)),
        "reports.topStudents" => Some(handle_top_students(state, req)),
        "reports.popularCourses" => Some(handle_popular_courses(state, req)),
        "reports.courseEnrollments" => Some(handle_course_enrollments(state, req)),
        "activity.recent" => Some(handle_activity_recent(state, req)),
        _ => None,
    }
}
