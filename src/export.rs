use crate::error::{StoreError, StoreResult};
use crate::store::Store;
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportCollection {
    Students,
    Courses,
    Grades,
}

impl ExportCollection {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportCollection::Students => "students",
            ExportCollection::Courses => "courses",
            ExportCollection::Grades => "grades",
        }
    }
}

impl FromStr for ExportCollection {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "students" => Ok(ExportCollection::Students),
            "courses" => Ok(ExportCollection::Courses),
            "grades" => Ok(ExportCollection::Grades),
            other => Err(StoreError::validation(format!(
                "collection must be one of: students, courses, grades (got {other:?})"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub rows: usize,
    pub csv: String,
}

pub fn export_csv(store: &Store, collection: ExportCollection) -> StoreResult<CsvExport> {
    match collection {
        ExportCollection::Students => to_csv(&store.students),
        ExportCollection::Courses => to_csv(&store.courses),
        ExportCollection::Grades => to_csv(&store.grades),
    }
}

fn csv_quote(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn render_field(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => csv_quote(s),
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(";");
            csv_quote(&joined)
        }
        Value::Object(_) => csv_quote(&v.to_string()),
        // Whole-number floats print as `84`, not `84.0`.
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
    }
}

/// Header comes from the first record's fields, in declaration order.
/// An empty collection exports as an empty string.
pub fn to_csv<T: Serialize>(records: &[T]) -> StoreResult<CsvExport> {
    let rows = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StoreError::validation(format!("serialize record: {e}")))?;

    let Some(first) = rows.first() else {
        return Ok(CsvExport {
            rows: 0,
            csv: String::new(),
        });
    };
    let Value::Object(first) = first else {
        return Err(StoreError::validation("export records must be objects"));
    };
    let headers: Vec<String> = first.keys().cloned().collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| csv_quote(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in &rows {
        let line = headers
            .iter()
            .map(|h| row.get(h).map(render_field).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    Ok(CsvExport {
        rows: rows.len(),
        csv: lines.join("\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Grade, Student};
    use crate::store::fixtures::*;

    #[test]
    fn empty_collection_exports_empty_string() {
        let store = Store::empty(fall_2024());
        for c in [
            ExportCollection::Students,
            ExportCollection::Courses,
            ExportCollection::Grades,
        ] {
            let out = export_csv(&store, c).expect("export");
            assert_eq!(out.csv, "");
            assert_eq!(out.rows, 0);
        }
    }

    #[test]
    fn header_follows_field_declaration_order() {
        let store = ten_students();
        let out = export_csv(&store, ExportCollection::Students).expect("export");
        let header = out.csv.lines().next().expect("header");
        assert_eq!(
            header,
            "id,name,email,year,major,gpa,status,courses,avatar"
        );
        let keys: Vec<String> = match serde_json::to_value(&store.students[0]).expect("json") {
            Value::Object(m) => m.keys().cloned().collect(),
            _ => Vec::new(),
        };
        assert_eq!(header.split(',').collect::<Vec<_>>(), keys);
        assert_eq!(out.rows, 10);
        assert_eq!(out.csv.lines().count(), 11);
    }

    #[test]
    fn rows_render_lists_and_missing_values() {
        let mut s: Student = student("STU1", "Ann Lee", "Physics", 2, 3.5);
        s.courses = vec!["CSC100".to_string(), "CSC101".to_string()];
        let out = to_csv(&[s]).expect("csv");
        let row = out.csv.lines().nth(1).expect("row");
        assert_eq!(
            row,
            "STU1,Ann Lee,ann.lee@university.edu,2,Physics,3.5,Active,CSC100;CSC101,"
        );
    }

    #[test]
    fn quotes_only_when_needed() {
        let mut c = course("CSC200", "Compilers, Advanced", "Computer Science", "Fall", 20);
        c.description = "The \"dragon\" book".to_string();
        let out = to_csv(&[c]).expect("csv");
        let row = out.csv.lines().nth(1).expect("row");
        assert!(row.starts_with("CSC200,\"Compilers, Advanced\",CSC200,\"The \"\"dragon\"\" book\","));
    }

    #[test]
    fn grade_export_uses_letter_symbols() {
        let g = Grade {
            id: "STU1-CSC100".to_string(),
            student_id: "STU1".to_string(),
            course_id: "CSC100".to_string(),
            grade: crate::model::LetterGrade::BPlus,
            score: 88.0,
            semester: "Fall 2024".to_string(),
            year: 2024,
        };
        let out = to_csv(&[g]).expect("csv");
        assert_eq!(
            out.csv,
            "id,studentId,courseId,grade,score,semester,year\nSTU1-CSC100,STU1,CSC100,B+,88,Fall 2024,2024"
        );
    }

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(render_field(&serde_json::json!(84.0)), "84");
        assert_eq!(render_field(&serde_json::json!(3.75)), "3.75");
        assert_eq!(render_field(&serde_json::json!(2024)), "2024");
        assert_eq!(render_field(&serde_json::json!(true)), "true");
    }

    #[test]
    fn unknown_collection_is_rejected() {
        assert!("faculty".parse::<ExportCollection>().is_err());
        assert_eq!(
            "Grades".parse::<ExportCollection>().ok(),
            Some(ExportCollection::Grades)
        );
    }
}
