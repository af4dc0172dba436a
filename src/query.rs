use crate::error::{StoreError, StoreResult};
use crate::model::{Course, Faculty, Grade, Student, StudentStatus};
use crate::store::Store;
use serde::Serialize;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// Offset/limit pagination. Non-positive or missing values fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let positive = |v: Option<i64>, default: usize| match v {
            Some(n) if n > 0 => usize::try_from(n).unwrap_or(default),
            _ => default,
        };
        Self {
            page: positive(page, DEFAULT_PAGE),
            limit: positive(limit, DEFAULT_LIMIT),
        }
    }

    fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page - 1).saturating_mul(self.limit);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.limit).min(items.len());
        &items[start..end]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T: Clone> Page<T> {
    fn from_matches(matches: Vec<&T>, req: PageRequest) -> Self {
        let total = matches.len();
        let items = req.slice(&matches).iter().map(|&t| t.clone()).collect();
        Self { items, total }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    pub search: Option<String>,
    pub year: Option<u8>,
    pub major: Option<String>,
    pub status: Option<StudentStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub search: Option<String>,
    pub department: Option<String>,
    pub semester: Option<String>,
}

/// Lowercased needle, or None when the search is absent or blank.
fn needle(search: &Option<String>) -> Option<String> {
    search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl StudentFilter {
    pub fn matches(&self, s: &Student) -> bool {
        if let Some(n) = needle(&self.search) {
            if !(contains_ci(&s.name, &n) || contains_ci(&s.email, &n) || contains_ci(&s.id, &n)) {
                return false;
            }
        }
        self.year.map_or(true, |y| s.year == y)
            && self.major.as_deref().map_or(true, |m| s.major == m)
            && self.status.map_or(true, |st| s.status == st)
    }
}

impl CourseFilter {
    pub fn matches(&self, c: &Course) -> bool {
        if let Some(n) = needle(&self.search) {
            if !(contains_ci(&c.title, &n) || contains_ci(&c.code, &n) || contains_ci(&c.faculty, &n))
            {
                return false;
            }
        }
        self.department
            .as_deref()
            .map_or(true, |d| c.department == d)
            && self.semester.as_deref().map_or(true, |s| c.semester == s)
    }
}

pub fn list_students(store: &Store, filter: &StudentFilter, page: PageRequest) -> Page<Student> {
    let matches = store.students.iter().filter(|s| filter.matches(s)).collect();
    Page::from_matches(matches, page)
}

pub fn list_courses(store: &Store, filter: &CourseFilter, page: PageRequest) -> Page<Course> {
    let matches = store.courses.iter().filter(|c| filter.matches(c)).collect();
    Page::from_matches(matches, page)
}

pub fn get_student<'a>(store: &'a Store, id: &str) -> StoreResult<&'a Student> {
    store
        .students
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| StoreError::not_found("student", id))
}

pub fn get_course<'a>(store: &'a Store, id: &str) -> StoreResult<&'a Course> {
    store
        .courses
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| StoreError::not_found("course", id))
}

pub fn get_faculty<'a>(store: &'a Store, id: &str) -> StoreResult<&'a Faculty> {
    store
        .faculty
        .iter()
        .find(|f| f.id == id)
        .ok_or_else(|| StoreError::not_found("faculty", id))
}

pub fn list_faculty(store: &Store) -> &[Faculty] {
    &store.faculty
}

pub fn grades_for_student<'a>(store: &'a Store, student_id: &str) -> Vec<&'a Grade> {
    store
        .grades
        .iter()
        .filter(|g| g.student_id == student_id)
        .collect()
}

pub fn grades_for_course<'a>(store: &'a Store, course_id: &str) -> Vec<&'a Grade> {
    store
        .grades
        .iter()
        .filter(|g| g.course_id == course_id)
        .collect()
}
