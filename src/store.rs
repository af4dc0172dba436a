use crate::error::{StoreError, StoreResult};
use crate::model::{Course, Faculty, Grade, LetterGrade, Student, StudentStatus, Term};
use anyhow::Context;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const MAJORS: [&str; 5] = [
    "Computer Science",
    "Mathematics",
    "Physics",
    "Biology",
    "Chemistry",
];
const COURSE_TITLES: [&str; 8] = [
    "Algorithms",
    "Data Structures",
    "Calculus",
    "Biology 101",
    "Chemistry Lab",
    "Physics I",
    "Web Development",
    "Database Systems",
];
const DEPARTMENTS: [&str; 4] = ["Computer Science", "Mathematics", "Science", "Engineering"];
const SURNAMES: [&str; 8] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
];
const SEMESTERS: [&str; 2] = ["Fall", "Spring"];

pub const STUDENT_ID_BASE: usize = 1000;

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub seed: u64,
    pub students: usize,
    pub courses: usize,
    pub faculty: usize,
    pub term: Term,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            students: 50,
            courses: 15,
            faculty: 10,
            term: Term::current(),
        }
    }
}

/// Where a store's records come from. `store.reset` rebuilds from this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSource {
    Seeded,
    Empty,
    Fixture(PathBuf),
}

impl StoreSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreSource::Seeded => "seeded",
            StoreSource::Empty => "empty",
            StoreSource::Fixture(_) => "fixture",
        }
    }

    pub fn build(&self, opts: &SeedOptions) -> StoreResult<Store> {
        match self {
            StoreSource::Seeded => Ok(Store::seeded(opts)),
            StoreSource::Empty => Ok(Store::empty(opts.term.clone())),
            StoreSource::Fixture(path) => Store::from_fixture(path, opts.term.clone()),
        }
    }
}

/// The in-memory record store. Every query and mutation takes it explicitly.
#[derive(Debug, Clone)]
pub struct Store {
    pub students: Vec<Student>,
    pub courses: Vec<Course>,
    pub faculty: Vec<Faculty>,
    pub grades: Vec<Grade>,
    pub term: Term,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Fixture {
    students: Vec<Student>,
    courses: Vec<Course>,
    faculty: Vec<Faculty>,
    grades: Vec<Grade>,
}

impl Store {
    pub fn empty(term: Term) -> Self {
        Self {
            students: Vec::new(),
            courses: Vec::new(),
            faculty: Vec::new(),
            grades: Vec::new(),
            term,
        }
    }

    pub fn from_parts(
        students: Vec<Student>,
        courses: Vec<Course>,
        faculty: Vec<Faculty>,
        grades: Vec<Grade>,
        term: Term,
    ) -> StoreResult<Self> {
        ensure_unique("student", students.iter().map(|s| s.id.as_str()))?;
        ensure_unique("course", courses.iter().map(|c| c.id.as_str()))?;
        ensure_unique("faculty", faculty.iter().map(|f| f.id.as_str()))?;
        let mut pairs = HashSet::new();
        for g in &grades {
            if !pairs.insert((g.student_id.as_str(), g.course_id.as_str())) {
                return Err(StoreError::validation(format!(
                    "duplicate grade for student {} in course {}",
                    g.student_id, g.course_id
                )));
            }
        }
        Ok(Self {
            students,
            courses,
            faculty,
            grades,
            term,
        })
    }

    pub fn from_fixture(path: &Path, term: Term) -> StoreResult<Self> {
        let fixture_err = |e: anyhow::Error| StoreError::Fixture {
            path: path.to_string_lossy().to_string(),
            message: format!("{e:#}"),
        };
        let text = std::fs::read_to_string(path)
            .context("read fixture")
            .map_err(fixture_err)?;
        let fixture: Fixture = serde_json::from_str(&text)
            .context("parse fixture json")
            .map_err(fixture_err)?;
        Self::from_parts(
            fixture.students,
            fixture.courses,
            fixture.faculty,
            fixture.grades,
            term,
        )
    }

    /// Deterministic sample data. Same options, same store.
    pub fn seeded(opts: &SeedOptions) -> Self {
        let mut rng = StdRng::seed_from_u64(opts.seed);
        let faculty_count = opts.faculty.max(1);

        let mut faculty: Vec<Faculty> = (0..faculty_count)
            .map(|i| Faculty {
                id: format!("FAC{}", 100 + i),
                name: format!("Prof. {}", SURNAMES[i % SURNAMES.len()]),
                email: format!("prof{}@university.edu", i + 1),
                department: MAJORS[rng.gen_range(0..MAJORS.len())].to_string(),
                courses: Vec::new(),
            })
            .collect();
        if opts.faculty == 0 {
            faculty.clear();
        }

        let mut courses = Vec::with_capacity(opts.courses);
        for i in 0..opts.courses {
            let code = format!("CSC{}", 100 + i);
            let (faculty_name, faculty_id) = match faculty.get_mut(i % faculty_count) {
                Some(owner) => {
                    owner.courses.push(code.clone());
                    (owner.name.clone(), owner.id.clone())
                }
                None => (String::new(), String::new()),
            };
            courses.push(Course {
                id: code.clone(),
                title: COURSE_TITLES[i % COURSE_TITLES.len()].to_string(),
                code,
                description: format!("Description for course {}", i + 1),
                faculty: faculty_name,
                faculty_id,
                enrolled_students: rng.gen_range(10..40),
                max_capacity: 40,
                credits: 3,
                department: DEPARTMENTS[i % DEPARTMENTS.len()].to_string(),
                semester: SEMESTERS[i % SEMESTERS.len()].to_string(),
            });
        }

        let mut students = Vec::with_capacity(opts.students);
        let mut grades = Vec::new();
        for i in 0..opts.students {
            let id = format!("STU{}", STUDENT_ID_BASE + i);
            let take = rng.gen_range(3..8).min(courses.len());
            let mut picked: Vec<usize> = sample(&mut rng, courses.len(), take).into_vec();
            picked.sort_unstable();
            let enrolled: Vec<String> = picked.iter().map(|&c| courses[c].id.clone()).collect();

            for course_id in &enrolled {
                let score = f64::from(rng.gen_range(60u32..100));
                grades.push(Grade {
                    id: Grade::composite_id(&id, course_id),
                    student_id: id.clone(),
                    course_id: course_id.clone(),
                    grade: LetterGrade::from_score(score),
                    score,
                    semester: opts.term.semester.clone(),
                    year: opts.term.year,
                });
            }

            let status = match rng.gen_range(0..10) {
                0 => StudentStatus::Inactive,
                1 => StudentStatus::Graduated,
                _ => StudentStatus::Active,
            };
            students.push(Student {
                id,
                name: format!("Student {}", i + 1),
                email: format!("student{}@university.edu", i + 1),
                year: rng.gen_range(1..=4),
                major: MAJORS[rng.gen_range(0..MAJORS.len())].to_string(),
                gpa: round2(rng.gen_range(2.0..4.0)),
                status,
                courses: enrolled,
                avatar: Some(format!("student{i}")),
            });
        }

        Self {
            students,
            courses,
            faculty,
            grades,
            term: opts.term.clone(),
        }
    }
}

fn ensure_unique<'a>(entity: &str, ids: impl Iterator<Item = &'a str>) -> StoreResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(StoreError::validation(format!("duplicate {entity} id: {id}")));
        }
    }
    Ok(())
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
