use crate::activity::{Activity, ActivityKind};
use crate::ipc::error::{ok, store_err};
use crate::ipc::helpers::{parse_payload, required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::GradeInput;
use crate::mutate;
use crate::query;
use serde_json::json;

fn handle_grades_for_student(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match required_str(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let grades = query::grades_for_student(&state.store, &student_id);
    ok(&req.id, json!({ "grades": grades }))
}

fn handle_grades_for_course(state: &mut AppState, req: &Request) -> serde_json::Value {
    let course_id = match required_str(req, "courseId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let grades = query::grades_for_course(&state.store, &course_id);
    ok(&req.id, json!({ "grades": grades }))
}

fn handle_grades_upsert(state: &mut AppState, req: &Request) -> serde_json::Value {
    let input: GradeInput = match parse_payload(req, req.params.clone()) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match mutate::upsert_grade(&mut state.store, input) {
        Ok(grade) => {
            tracing::info!(
                grade_id = %grade.id,
                letter = %grade.grade,
                score = grade.score,
                "grade upserted"
            );
            let student_name = query::get_student(&state.store, &grade.student_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|_| grade.student_id.clone());
            let course_title = query::get_course(&state.store, &grade.course_id)
                .map(|c| c.title.clone())
                .unwrap_or_else(|_| grade.course_id.clone());
            state.activity.record(
                Activity::new(ActivityKind::GradeUpdate)
                    .student(grade.student_id.clone(), student_name)
                    .course(grade.course_id.clone(), course_title)
                    .grade(grade.grade.as_str()),
            );
            ok(&req.id, json!({ "grade": grade }))
        }
        Err(e) => store_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.forStudent" => Some(handle_grades_for_student(state, req)),
        "grades.forCourse" => Some(handle_grades_for_course(state, req)),
        "grades.upsert" => Some(handle_grades_upsert(state, req)),
        _ => None,
    }
}
