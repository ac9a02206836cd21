//! Report card types and plain-text rendering.

use std::fmt;

use crate::model::{CourseId, StudentId};
use crate::statistics::AttendanceTally;

/// Default number of decimals for average grades.
pub const DEFAULT_GRADE_PRECISION: usize = 2;

/// Per-course summary for one student. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseSummary {
    pub course_id: CourseId,
    /// Mean of recorded grades, `0.0` if none.
    pub average_grade: f64,
    pub attendance: AttendanceTally,
}

/// A student's report card.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportCard {
    pub student_id: StudentId,
    pub student_name: String,
    /// One entry per enrollment, in enrollment order.
    pub courses: Vec<CourseSummary>,
}

impl ReportCard {
    /// Header line naming the student.
    pub fn header(&self) -> String {
        format!(
            "Report Card for Student ID {}: {}",
            self.student_id, self.student_name
        )
    }

    /// Render the card with averages shown to `precision` decimals.
    ///
    /// Starts with a blank line, then the header, then one line per course.
    pub fn render(&self, precision: usize) -> String {
        let mut out = String::new();
        out.push('\n');
        out.push_str(&self.header());
        for course in &self.courses {
            out.push('\n');
            out.push_str(&format!(
                "Course ID: {} - Average Grade: {:.*}, Attendance: {}",
                course.course_id, precision, course.average_grade, course.attendance
            ));
        }
        out
    }
}

impl fmt::Display for ReportCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_GRADE_PRECISION))
    }
}
