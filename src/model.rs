use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StudentStatus {
    Active,
    Inactive,
    Graduated,
}

impl FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(StudentStatus::Active),
            "inactive" => Ok(StudentStatus::Inactive),
            "graduated" => Ok(StudentStatus::Graduated),
            other => Err(format!(
                "status must be one of: Active, Inactive, Graduated (got {other:?})"
            )),
        }
    }
}

// Same rule as the list filters: case-insensitive.
impl<'de> Deserialize<'de> for StudentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub year: u8,
    pub major: String,
    pub gpa: f64,
    pub status: StudentStatus,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub code: String,
    pub description: String,
    pub faculty: String,
    pub faculty_id: String,
    pub enrolled_students: u32,
    pub max_capacity: u32,
    pub credits: u32,
    pub department: String,
    pub semester: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    #[serde(default)]
    pub courses: Vec<String>,
}

/// Letter grades, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "F")]
    F,
}

impl LetterGrade {
    pub const ALL: [LetterGrade; 13] = [
        LetterGrade::APlus,
        LetterGrade::A,
        LetterGrade::AMinus,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::BMinus,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::CMinus,
        LetterGrade::DPlus,
        LetterGrade::D,
        LetterGrade::DMinus,
        LetterGrade::F,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::DMinus => "D-",
            LetterGrade::F => "F",
        }
    }

    /// Standard 4.0-scale cut points: 97/93/90 for A+/A/A-, and so on down to D-.
    pub fn from_score(score: f64) -> Self {
        let band = |top: f64, plus: LetterGrade, mid: LetterGrade, minus: LetterGrade| {
            if score >= top + 7.0 {
                plus
            } else if score >= top + 3.0 {
                mid
            } else {
                minus
            }
        };
        if score >= 90.0 {
            band(90.0, LetterGrade::APlus, LetterGrade::A, LetterGrade::AMinus)
        } else if score >= 80.0 {
            band(80.0, LetterGrade::BPlus, LetterGrade::B, LetterGrade::BMinus)
        } else if score >= 70.0 {
            band(70.0, LetterGrade::CPlus, LetterGrade::C, LetterGrade::CMinus)
        } else if score >= 60.0 {
            band(60.0, LetterGrade::DPlus, LetterGrade::D, LetterGrade::DMinus)
        } else {
            LetterGrade::F
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_uppercase();
        LetterGrade::ALL
            .into_iter()
            .find(|g| g.as_str() == t)
            .ok_or_else(|| format!("grade must be a letter from A+ to F (got {s:?})"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub grade: LetterGrade,
    pub score: f64,
    pub semester: String,
    pub year: i32,
}

impl Grade {
    pub fn composite_id(student_id: &str, course_id: &str) -> String {
        format!("{student_id}-{course_id}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: usize,
    pub total_courses: usize,
    pub total_faculty: usize,
    #[serde(rename = "averageGPA")]
    pub average_gpa: f64,
    pub total_enrollments: u64,
}

/// Fields accepted by student creation; everything but the id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub year: u8,
    pub major: String,
    pub gpa: f64,
    #[serde(default = "default_status")]
    pub status: StudentStatus,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

fn default_status() -> StudentStatus {
    StudentStatus::Active
}

/// Partial student update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub year: Option<u8>,
    pub major: Option<String>,
    pub gpa: Option<f64>,
    pub status: Option<StudentStatus>,
    pub courses: Option<Vec<String>>,
    pub avatar: Option<String>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.year.is_none()
            && self.major.is_none()
            && self.gpa.is_none()
            && self.status.is_none()
            && self.courses.is_none()
            && self.avatar.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeInput {
    pub student_id: String,
    pub course_id: String,
    pub grade: String,
    pub score: f64,
}

/// Academic term used to stamp newly created grades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub semester: String,
    pub year: i32,
}

impl Term {
    pub fn from_date<D: chrono::Datelike>(date: &D) -> Self {
        let season = match date.month() {
            1..=5 => "Spring",
            6 | 7 => "Summer",
            _ => "Fall",
        };
        Term {
            semester: format!("{season} {}", date.year()),
            year: date.year(),
        }
    }

    pub fn current() -> Self {
        Term::from_date(&chrono::Local::now().date_naive())
    }
}

impl FromStr for Term {
    type Err = String;

    /// Parses labels like `Fall 2024`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(season), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(format!("term must look like \"Fall 2024\" (got {s:?})"));
        };
        let year: i32 = year
            .parse()
            .map_err(|_| format!("term year must be a number (got {year:?})"))?;
        Ok(Term {
            semester: format!("{season} {year}"),
            year,
        })
    }
}
