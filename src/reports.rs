use crate::model::{Course, DashboardStats, Student, StudentStatus};
use crate::store::{round2, Store};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRow {
    pub course_id: String,
    pub course: String,
    pub enrolled: u32,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentSummary {
    pub rows: Vec<EnrollmentRow>,
    pub total_enrolled: u64,
    pub total_capacity: u64,
    /// Percent of seats taken, one decimal.
    pub utilization: f64,
}

/// `Int(10*x + 0.5) / 10`
fn round_off_1_decimal(x: f64) -> f64 {
    ((10.0 * x) + 0.5).floor() / 10.0
}

pub fn dashboard_stats(store: &Store) -> DashboardStats {
    let average_gpa = if store.students.is_empty() {
        0.0
    } else {
        let sum: f64 = store.students.iter().map(|s| s.gpa).sum();
        round2(sum / store.students.len() as f64)
    };
    DashboardStats {
        total_students: store.students.len(),
        total_courses: store.courses.len(),
        total_faculty: store.faculty.len(),
        average_gpa,
        total_enrollments: store
            .courses
            .iter()
            .map(|c| u64::from(c.enrolled_students))
            .sum(),
    }
}

/// Highest GPA first. `sort_by` is stable, so ties keep store order.
pub fn top_students(store: &Store, limit: usize, status: Option<StudentStatus>) -> Vec<Student> {
    let mut ranked: Vec<&Student> = store
        .students
        .iter()
        .filter(|s| status.map_or(true, |st| s.status == st))
        .collect();
    ranked.sort_by(|a, b| b.gpa.partial_cmp(&a.gpa).unwrap_or(Ordering::Equal));
    ranked.into_iter().take(limit).cloned().collect()
}

pub fn popular_courses(store: &Store, limit: usize) -> Vec<Course> {
    let mut ranked: Vec<&Course> = store.courses.iter().collect();
    ranked.sort_by(|a, b| b.enrolled_students.cmp(&a.enrolled_students));
    ranked.into_iter().take(limit).cloned().collect()
}

pub fn course_enrollments(store: &Store) -> EnrollmentSummary {
    let rows: Vec<EnrollmentRow> = store
        .courses
        .iter()
        .map(|c| EnrollmentRow {
            course_id: c.id.clone(),
            course: c.title.clone(),
            enrolled: c.enrolled_students,
            capacity: c.max_capacity,
        })
        .collect();
    let total_enrolled: u64 = rows.iter().map(|r| u64::from(r.enrolled)).sum();
    let total_capacity: u64 = rows.iter().map(|r| u64::from(r.capacity)).sum();
    let utilization = if total_capacity > 0 {
        round_off_1_decimal(100.0 * total_enrolled as f64 / total_capacity as f64)
    } else {
        0.0
    };
    EnrollmentSummary {
        rows,
        total_enrolled,
        total_capacity,
        utilization,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Term;
    use crate::store::fixtures::*;

    #[test]
    fn top_five_by_gpa_keeps_tie_order() {
        let store = ten_students();
        let top = top_students(&store, 5, None);
        let ids: Vec<&str> = top.iter().map(|s| s.id.as_str()).collect();
        // STU1001, STU1003 and STU1007 all have 3.90 and stay in store order.
        assert_eq!(ids, ["STU1001", "STU1003", "STU1007", "STU1009", "STU1005"]);
    }

    #[test]
    fn top_students_honors_status_filter() {
        let mut store = ten_students();
        store.students[1].status = StudentStatus::Graduated;
        let top = top_students(&store, 3, Some(StudentStatus::Active));
        assert!(top.iter().all(|s| s.status == StudentStatus::Active));
        assert_eq!(top[0].id, "STU1003");
        let grads = top_students(&store, 10, Some(StudentStatus::Graduated));
        assert_eq!(grads.len(), 1);
    }

    #[test]
    fn popular_courses_sorted_by_enrollment() {
        let store = ten_students();
        let popular = popular_courses(&store, 3);
        let ids: Vec<&str> = popular.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["CSC100", "CSC102", "CSC101"]);
    }

    #[test]
    fn dashboard_stats_aggregate_collections() {
        let store = ten_students();
        let stats = dashboard_stats(&store);
        assert_eq!(stats.total_students, 10);
        assert_eq!(stats.total_courses, 4);
        assert_eq!(stats.total_faculty, 0);
        assert_eq!(stats.total_enrollments, 35 + 28 + 35 + 12);
        assert_eq!(stats.average_gpa, 3.33);
    }

    #[test]
    fn dashboard_stats_on_empty_store() {
        let stats = dashboard_stats(&Store::empty(Term {
            semester: "Fall 2024".to_string(),
            year: 2024,
        }));
        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.average_gpa, 0.0);
        let json = serde_json::to_value(&stats).expect("json");
        assert!(json.get("averageGPA").is_some());
    }

    #[test]
    fn enrollment_summary_totals() {
        let store = ten_students();
        let summary = course_enrollments(&store);
        assert_eq!(summary.rows.len(), 4);
        assert_eq!(summary.rows[0].course, "Algorithms");
        assert_eq!(summary.total_enrolled, 110);
        assert_eq!(summary.total_capacity, 160);
        assert_eq!(summary.utilization, 68.8);
    }
}
