#![allow(dead_code)]

use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

pub struct Sidecar {
    pub child: Child,
    pub stdin: ChildStdin,
    pub reader: BufReader<ChildStdout>,
}

impl Drop for Sidecar {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Spawns campusd pinned to the Fall 2024 term plus any extra flags.
pub fn spawn_sidecar(extra_args: &[&str]) -> Sidecar {
    let exe = env!("CARGO_BIN_EXE_campusd");
    let mut child = Command::new(exe)
        .args(["--term", "Fall 2024"])
        .args(extra_args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn campusd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    Sidecar {
        child,
        stdin,
        reader: BufReader::new(stdout),
    }
}

impl Sidecar {
    pub fn request(&mut self, id: &str, method: &str, params: serde_json::Value) -> serde_json::Value {
        let payload = json!({
            "id": id,
            "method": method,
            "params": params,
        });
        writeln!(self.stdin, "{}", payload).expect("write request");
        self.stdin.flush().expect("flush request");
        self.read_response(method)
    }

    pub fn send_raw(&mut self, line: &str) -> serde_json::Value {
        writeln!(self.stdin, "{}", line).expect("write raw line");
        self.stdin.flush().expect("flush raw line");
        self.read_response("raw")
    }

    fn read_response(&mut self, method: &str) -> serde_json::Value {
        let mut line = String::new();
        self.reader.read_line(&mut line).expect("read response line");
        assert!(!line.trim().is_empty(), "empty response for {}", method);
        serde_json::from_str(line.trim()).expect("parse response json")
    }

    pub fn request_ok(&mut self, id: &str, method: &str, params: serde_json::Value) -> serde_json::Value {
        let value = self.request(id, method, params);
        assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
        assert!(
            value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
            "{} failed: {}",
            method,
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|v| v.as_str())
                .unwrap_or("unknown error")
        );
        value.get("result").cloned().unwrap_or_else(|| json!({}))
    }

    /// Expects a failure and returns its error code.
    pub fn request_err(&mut self, id: &str, method: &str, params: serde_json::Value) -> String {
        let value = self.request(id, method, params);
        assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
        assert_eq!(
            value.get("ok").and_then(|v| v.as_bool()),
            Some(false),
            "{} unexpectedly succeeded: {}",
            method,
            value
        );
        value
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string()
    }
}

fn student(id: &str, name: &str, major: &str, year: u8, gpa: f64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@university.edu", name.to_lowercase().replace(' ', ".")),
        "year": year,
        "major": major,
        "gpa": gpa,
        "status": "Active",
        "courses": ["CSC100"],
        "avatar": null
    })
}

/// Ten students (three Computer Science, two Mathematics) and four courses.
pub fn write_ten_student_fixture(dir: &std::path::Path) -> PathBuf {
    let fixture = json!({
        "students": [
            student("STU1000", "John Carter", "Computer Science", 1, 3.10),
            student("STU1001", "Ada Brooks", "Mathematics", 2, 3.90),
            student("STU1002", "Johnny Reyes", "Computer Science", 3, 2.75),
            student("STU1003", "Mia Chen", "Physics", 4, 3.90),
            student("STU1004", "Liam Ortiz", "Biology", 1, 2.40),
            student("STU1005", "Nora Patel", "Mathematics", 2, 3.55),
            student("STU1006", "Owen Kim", "Chemistry", 3, 3.20),
            student("STU1007", "Zoe Adams", "Computer Science", 4, 3.90),
            student("STU1008", "Eli Novak", "Physics", 1, 2.95),
            student("STU1009", "Ivy Laurent", "Biology", 2, 3.65)
        ],
        "courses": [
            {
                "id": "CSC100", "title": "Algorithms", "code": "CSC100",
                "description": "Sorting, graphs, and more", "faculty": "Prof. Smith",
                "facultyId": "FAC100", "enrolledStudents": 35, "maxCapacity": 40,
                "credits": 3, "department": "Computer Science", "semester": "Fall"
            },
            {
                "id": "CSC101", "title": "Calculus", "code": "CSC101",
                "description": "Limits", "faculty": "Prof. Johnson",
                "facultyId": "FAC101", "enrolledStudents": 20, "maxCapacity": 40,
                "credits": 4, "department": "Mathematics", "semester": "Spring"
            }
        ],
        "faculty": [
            {
                "id": "FAC100", "name": "Prof. Smith", "email": "prof1@university.edu",
                "department": "Computer Science", "courses": ["CSC100"]
            },
            {
                "id": "FAC101", "name": "Prof. Johnson", "email": "prof2@university.edu",
                "department": "Mathematics", "courses": ["CSC101"]
            }
        ],
        "grades": [
            {
                "id": "STU1000-CSC100", "studentId": "STU1000", "courseId": "CSC100",
                "grade": "B", "score": 84, "semester": "Fall 2024", "year": 2024
            }
        ]
    });
    let path = dir.join("campus-fixture.json");
    std::fs::write(&path, serde_json::to_string_pretty(&fixture).expect("fixture json"))
        .expect("write fixture");
    path
}
