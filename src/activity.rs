use serde::Serialize;
use std::collections::VecDeque;

pub const ACTIVITY_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    StudentAdded,
    StudentUpdated,
    StudentRemoved,
    GradeUpdate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub kind: ActivityKind,
    /// Display name; falls back to the id when the student is unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    /// Course title, or the course id when the course is unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    pub time: String,
}

impl Activity {
    pub fn new(kind: ActivityKind) -> Self {
        Self {
            kind,
            student: None,
            student_id: None,
            major: None,
            course: None,
            course_id: None,
            grade: None,
            time: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn student(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.student_id = Some(id.into());
        self.student = Some(name.into());
        self
    }

    pub fn major(mut self, major: impl Into<String>) -> Self {
        self.major = Some(major.into());
        self
    }

    pub fn course(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        self.course_id = Some(id.into());
        self.course = Some(title.into());
        self
    }

    pub fn grade(mut self, letter: impl Into<String>) -> Self {
        self.grade = Some(letter.into());
        self
    }
}

/// Newest-first log of mutations, bounded to `ACTIVITY_CAPACITY` entries.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<Activity>,
}

impl ActivityLog {
    pub fn record(&mut self, activity: Activity) {
        self.entries.push_front(activity);
        self.entries.truncate(ACTIVITY_CAPACITY);
    }

    pub fn recent(&self, limit: usize) -> Vec<Activity> {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
