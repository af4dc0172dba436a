mod test_support;

use serde_json::json;
use test_support::{spawn_sidecar, temp_dir, write_ten_student_fixture};

fn ids(v: &serde_json::Value) -> Vec<String> {
    v.as_array()
        .expect("array")
        .iter()
        .filter_map(|s| s["id"].as_str().map(str::to_string))
        .collect()
}

#[test]
fn top_students_sorted_by_gpa_with_stable_ties() {
    let dir = temp_dir("campusd-reports-top");
    let fixture = write_ten_student_fixture(&dir);
    let mut sc = spawn_sidecar(&["--fixture", fixture.to_str().expect("utf8 path")]);

    let top = sc.request_ok("1", "reports.topStudents", json!({ "limit": 5 }));
    assert_eq!(
        ids(&top["students"]),
        ["STU1001", "STU1003", "STU1007", "STU1009", "STU1005"]
    );

    sc.request_ok(
        "2",
        "students.update",
        json!({ "id": "STU1003", "patch": { "status": "Graduated" } }),
    );
    let active = sc.request_ok(
        "3",
        "reports.topStudents",
        json!({ "limit": 2, "status": "Active" }),
    );
    assert_eq!(ids(&active["students"]), ["STU1001", "STU1007"]);

    let defaulted = sc.request_ok("4", "reports.topStudents", json!({}));
    assert_eq!(defaulted["students"].as_array().map(Vec::len), Some(10));
}

#[test]
fn popular_courses_and_enrollment_summary() {
    let dir = temp_dir("campusd-reports-courses");
    let fixture = write_ten_student_fixture(&dir);
    let mut sc = spawn_sidecar(&["--fixture", fixture.to_str().expect("utf8 path")]);

    let popular = sc.request_ok("1", "reports.popularCourses", json!({ "limit": 1 }));
    assert_eq!(ids(&popular["courses"]), ["CSC100"]);

    let summary = sc.request_ok("2", "reports.courseEnrollments", json!({}));
    assert_eq!(
        summary["rows"],
        json!([
            { "courseId": "CSC100", "course": "Algorithms", "enrolled": 35, "capacity": 40 },
            { "courseId": "CSC101", "course": "Calculus", "enrolled": 20, "capacity": 40 }
        ])
    );
    assert_eq!(summary["totalEnrolled"], 55);
    assert_eq!(summary["totalCapacity"], 80);
    assert_eq!(summary["utilization"], 68.8);
}

#[test]
fn dashboard_stats_follow_mutations() {
    let dir = temp_dir("campusd-reports-dashboard");
    let fixture = write_ten_student_fixture(&dir);
    let mut sc = spawn_sidecar(&["--fixture", fixture.to_str().expect("utf8 path")]);

    let stats = sc.request_ok("1", "dashboard.stats", json!({}));
    assert_eq!(
        stats,
        json!({
            "totalStudents": 10,
            "totalCourses": 2,
            "totalFaculty": 2,
            "averageGPA": 3.33,
            "totalEnrollments": 55
        })
    );

    sc.request_ok("2", "students.delete", json!({ "id": "STU1004" }));
    let stats = sc.request_ok("3", "dashboard.stats", json!({}));
    assert_eq!(stats["totalStudents"], 9);
    // (33.30 - 2.40) / 9 = 3.4333..
    assert_eq!(stats["averageGPA"], 3.43);

    let empty = spawn_sidecar(&["--empty"]).request_ok("4", "dashboard.stats", json!({}));
    assert_eq!(empty["averageGPA"], 0.0);
    assert_eq!(empty["totalEnrollments"], 0);
}
