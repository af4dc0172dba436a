use crate::error::{StoreError, StoreResult};
use crate::model::{Grade, GradeInput, LetterGrade, NewStudent, Student, StudentPatch};
use crate::store::{Store, STUDENT_ID_BASE};

fn check_year(year: u8) -> StoreResult<()> {
    if (1..=4).contains(&year) {
        Ok(())
    } else {
        Err(StoreError::validation(format!("year must be 1-4 (got {year})")))
    }
}

fn check_gpa(gpa: f64) -> StoreResult<()> {
    if (0.0..=4.0).contains(&gpa) {
        Ok(())
    } else {
        Err(StoreError::validation(format!("gpa must be 0.0-4.0 (got {gpa})")))
    }
}

fn check_score(score: f64) -> StoreResult<()> {
    if (0.0..=100.0).contains(&score) {
        Ok(())
    } else {
        Err(StoreError::validation(format!(
            "score must be 0-100 (got {score})"
        )))
    }
}

fn check_non_empty(field: &str, value: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        Err(StoreError::validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

/// First free `STU<n>` id, starting from the collection size.
fn next_student_id(store: &Store) -> String {
    let mut n = STUDENT_ID_BASE + store.students.len();
    loop {
        let candidate = format!("STU{n}");
        if !store.students.iter().any(|s| s.id == candidate) {
            return candidate;
        }
        n += 1;
    }
}

pub fn create_student(store: &mut Store, input: NewStudent) -> StoreResult<Student> {
    check_non_empty("name", &input.name)?;
    check_non_empty("email", &input.email)?;
    check_year(input.year)?;
    check_gpa(input.gpa)?;

    let id = next_student_id(store);
    let avatar = input
        .avatar
        .or_else(|| Some(format!("student{}", store.students.len())));
    let student = Student {
        id,
        name: input.name,
        email: input.email,
        year: input.year,
        major: input.major,
        gpa: input.gpa,
        status: input.status,
        courses: input.courses,
        avatar,
    };
    store.students.push(student.clone());
    Ok(student)
}

pub fn update_student(store: &mut Store, id: &str, patch: StudentPatch) -> StoreResult<Student> {
    let idx = store
        .students
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| StoreError::not_found("student", id))?;

    if let Some(name) = &patch.name {
        check_non_empty("name", name)?;
    }
    if let Some(email) = &patch.email {
        check_non_empty("email", email)?;
    }
    if let Some(year) = patch.year {
        check_year(year)?;
    }
    if let Some(gpa) = patch.gpa {
        check_gpa(gpa)?;
    }

    let s = &mut store.students[idx];
    if let Some(v) = patch.name {
        s.name = v;
    }
    if let Some(v) = patch.email {
        s.email = v;
    }
    if let Some(v) = patch.year {
        s.year = v;
    }
    if let Some(v) = patch.major {
        s.major = v;
    }
    if let Some(v) = patch.gpa {
        s.gpa = v;
    }
    if let Some(v) = patch.status {
        s.status = v;
    }
    if let Some(v) = patch.courses {
        s.courses = v;
    }
    if let Some(v) = patch.avatar {
        s.avatar = Some(v);
    }
    Ok(s.clone())
}

/// Removes the student if present. Grades are left in place.
pub fn delete_student(store: &mut Store, id: &str) -> Option<Student> {
    let idx = store.students.iter().position(|s| s.id == id)?;
    Some(store.students.remove(idx))
}

pub fn upsert_grade(store: &mut Store, input: GradeInput) -> StoreResult<Grade> {
    check_non_empty("studentId", &input.student_id)?;
    check_non_empty("courseId", &input.course_id)?;
    check_score(input.score)?;
    let letter: LetterGrade = input.grade.parse().map_err(StoreError::Validation)?;

    if let Some(existing) = store
        .grades
        .iter_mut()
        .find(|g| g.student_id == input.student_id && g.course_id == input.course_id)
    {
        existing.grade = letter;
        existing.score = input.score;
        return Ok(existing.clone());
    }

    let grade = Grade {
        id: Grade::composite_id(&input.student_id, &input.course_id),
        student_id: input.student_id,
        course_id: input.course_id,
        grade: letter,
        score: input.score,
        semester: store.term.semester.clone(),
        year: store.term.year,
    };
    store.grades.push(grade.clone());
    Ok(grade)
}
