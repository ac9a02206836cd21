//! Core data model types for gradebook.
//!
//! Students, courses, and the per-course enrollment records a student owns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a student at creation. Starts at 1 and never repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub u32);

/// Identifier assigned to a course at creation. Starts at 1 and never repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub u32);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered student.
#[derive(Debug, Clone)]
pub struct Student {
    /// Unique identifier.
    pub id: StudentId,
    /// Full name.
    pub name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Free-form contact string (usually an email address).
    pub contact_info: String,
    /// Courses this student is enrolled in, in enrollment order.
    enrollments: Vec<Enrollment>,
}

impl Student {
    pub fn new(id: StudentId, name: &str, date_of_birth: NaiveDate, contact_info: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            date_of_birth,
            contact_info: contact_info.to_string(),
            enrollments: Vec::new(),
        }
    }

    /// All enrollments, oldest first.
    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    /// The enrollment record for `course_id`, if any.
    pub fn enrollment(&self, course_id: CourseId) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.course_id == course_id)
    }

    pub(crate) fn enrollment_mut(&mut self, course_id: CourseId) -> Option<&mut Enrollment> {
        self.enrollments.iter_mut().find(|e| e.course_id == course_id)
    }

    pub fn is_enrolled(&self, course_id: CourseId) -> bool {
        self.enrollment(course_id).is_some()
    }

    /// Append a fresh enrollment. Returns `false` (and changes nothing) if
    /// the student is already enrolled in `course_id`.
    pub(crate) fn enroll(&mut self, course_id: CourseId) -> bool {
        if self.is_enrolled(course_id) {
            return false;
        }
        self.enrollments.push(Enrollment::new(course_id));
        true
    }
}

/// A registered course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Unique identifier.
    pub id: CourseId,
    /// Course name. Duplicates are allowed.
    pub name: String,
}

impl Course {
    pub fn new(id: CourseId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// One student's record in one course.
///
/// Grades and attendance live together so a course either has both
/// sequences or neither. Both are append-only, in call order.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    /// The course this record belongs to.
    pub course_id: CourseId,
    grades: Vec<f64>,
    attendance: Vec<bool>,
}

impl Enrollment {
    fn new(course_id: CourseId) -> Self {
        Self {
            course_id,
            grades: Vec::new(),
            attendance: Vec::new(),
        }
    }

    /// Recorded grades, in the order they were added.
    pub fn grades(&self) -> &[f64] {
        &self.grades
    }

    /// Recorded presence flags, in the order they were recorded.
    pub fn attendance(&self) -> &[bool] {
        &self.attendance
    }

    pub(crate) fn push_grade(&mut self, grade: f64) {
        self.grades.push(grade);
    }

    pub(crate) fn push_attendance(&mut self, is_present: bool) {
        self.attendance.push(is_present);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Student {
        Student::new(
            StudentId(1),
            "Alice Johnson",
            NaiveDate::from_ymd_opt(2000, 5, 21).unwrap(),
            "alice.j@example.com",
        )
    }

    #[test]
    fn ids_display_as_bare_numbers() {
        assert_eq!(StudentId(7).to_string(), "7");
        assert_eq!(CourseId(12).to_string(), "12");
    }

    #[test]
    fn new_student_has_no_enrollments() {
        let s = alice();
        assert!(s.enrollments().is_empty());
        assert!(!s.is_enrolled(CourseId(1)));
    }

    #[test]
    fn enroll_creates_both_sequences_once() {
        let mut s = alice();
        assert!(s.enroll(CourseId(1)));
        let e = s.enrollment(CourseId(1)).unwrap();
        assert!(e.grades().is_empty());
        assert!(e.attendance().is_empty());

        s.enrollment_mut(CourseId(1)).unwrap().push_grade(70.0);
        assert!(!s.enroll(CourseId(1)));
        assert_eq!(s.enrollment(CourseId(1)).unwrap().grades(), &[70.0]);
        assert_eq!(s.enrollments().len(), 1);
    }

    #[test]
    fn enrollments_keep_insertion_order() {
        let mut s = alice();
        s.enroll(CourseId(3));
        s.enroll(CourseId(1));
        s.enroll(CourseId(2));
        let order: Vec<u32> = s.enrollments().iter().map(|e| e.course_id.0).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn ids_serialize_transparently() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            student: StudentId,
        }
        let parsed: Wrapper = toml::from_str("student = 4").unwrap();
        assert_eq!(parsed.student, StudentId(4));
    }
}
