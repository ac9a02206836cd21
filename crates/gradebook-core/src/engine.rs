//! Script runner.
//!
//! Replays a [`Script`] against a [`Registry`], turning every outcome into a
//! status line for a [`StatusReporter`]. Rejected calls are reported and the
//! run continues.

use chrono::NaiveDate;

use crate::config::DEFAULT_DATE_FORMAT;
use crate::error::RegistryError;
use crate::model::{CourseId, StudentId};
use crate::registry::Registry;
use crate::report::ReportCard;
use crate::script::{resolve_date, Script, Step};

/// A successfully applied registry call.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    CourseAdded {
        course_id: CourseId,
        name: String,
    },
    StudentAdded {
        student_id: StudentId,
        name: String,
    },
    Enrolled {
        student_id: StudentId,
        course_id: CourseId,
    },
    AttendanceRecorded {
        student_id: StudentId,
        course_id: CourseId,
        date: NaiveDate,
        is_present: bool,
    },
    GradeAdded {
        student_id: StudentId,
        course_id: CourseId,
        assessment: String,
        grade: f64,
    },
}

impl Status {
    /// The status line, with dates formatted by `date_format` (chrono syntax).
    ///
    /// `date_format` must pass [`crate::config::validate_date_format`];
    /// chrono panics while rendering an invalid specifier.
    pub fn line(&self, date_format: &str) -> String {
        match self {
            Status::CourseAdded { course_id, name } => {
                format!("Course added: {name}, ID: {course_id}")
            }
            Status::StudentAdded { student_id, name } => {
                format!("Student added: {name}, ID: {student_id}")
            }
            Status::Enrolled {
                student_id,
                course_id,
            } => format!("Student ID {student_id} enrolled in course ID {course_id}."),
            Status::AttendanceRecorded {
                student_id,
                course_id,
                date,
                is_present,
            } => format!(
                "Attendance recorded for Student ID {student_id} in Course ID {course_id} on {}: {}",
                date.format(date_format),
                if *is_present { "Present" } else { "Absent" }
            ),
            Status::GradeAdded {
                student_id,
                course_id,
                assessment,
                grade,
            } => format!(
                "Grade added for Student ID {student_id} in Course ID {course_id}: {assessment} - {grade}"
            ),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.line(DEFAULT_DATE_FORMAT))
    }
}

/// Counts for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Steps executed.
    pub steps: usize,
    /// Steps that changed the registry.
    pub applied: usize,
    /// Steps the registry rejected.
    pub rejected: usize,
    /// Report cards produced.
    pub report_cards: usize,
}

/// Receives the outcome of every step.
pub trait StatusReporter {
    fn on_applied(&self, status: &Status);
    fn on_rejected(&self, error: &RegistryError);
    fn on_report_card(&self, card: &ReportCard);
    fn on_script_complete(&self, summary: &RunSummary);
}

/// Discards everything.
pub struct NoopReporter;

impl StatusReporter for NoopReporter {
    fn on_applied(&self, _: &Status) {}
    fn on_rejected(&self, _: &RegistryError) {}
    fn on_report_card(&self, _: &ReportCard) {}
    fn on_script_complete(&self, _: &RunSummary) {}
}

/// Executes scripts. `today` anchors attendance steps without an explicit date.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    today: NaiveDate,
}

impl ScriptRunner {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Run every step of `script` in order.
    pub fn run(
        &self,
        registry: &mut Registry,
        script: &Script,
        reporter: &dyn StatusReporter,
    ) -> RunSummary {
        tracing::debug!(script = %script.name, steps = script.steps.len(), "running script");

        let mut summary = RunSummary::default();
        for step in &script.steps {
            summary.steps += 1;
            match self.apply(registry, step) {
                Ok(Outcome::Applied(status)) => {
                    summary.applied += 1;
                    reporter.on_applied(&status);
                }
                Ok(Outcome::Report(card)) => {
                    summary.report_cards += 1;
                    reporter.on_report_card(&card);
                }
                Err(e) => {
                    summary.rejected += 1;
                    reporter.on_rejected(&e);
                }
            }
        }

        reporter.on_script_complete(&summary);
        summary
    }

    /// Apply a single step.
    pub fn apply(&self, registry: &mut Registry, step: &Step) -> Result<Outcome, RegistryError> {
        let status = match step {
            Step::AddCourse { name } => Status::CourseAdded {
                course_id: registry.add_course(name),
                name: name.clone(),
            },
            Step::AddStudent {
                name,
                date_of_birth,
                contact_info,
            } => Status::StudentAdded {
                student_id: registry.add_student(name, *date_of_birth, contact_info),
                name: name.clone(),
            },
            Step::Enroll { student, course } => {
                registry.enroll_student_in_course(*student, *course)?;
                Status::Enrolled {
                    student_id: *student,
                    course_id: *course,
                }
            }
            Step::RecordAttendance {
                student,
                course,
                date,
                offset_days,
                present,
            } => {
                let date = resolve_date(*date, *offset_days, self.today);
                registry.record_attendance(*student, *course, date, *present)?;
                Status::AttendanceRecorded {
                    student_id: *student,
                    course_id: *course,
                    date,
                    is_present: *present,
                }
            }
            Step::AddGrade {
                student,
                course,
                assessment,
                grade,
            } => {
                registry.add_grade(*student, *course, assessment, *grade)?;
                Status::GradeAdded {
                    student_id: *student,
                    course_id: *course,
                    assessment: assessment.clone(),
                    grade: *grade,
                }
            }
            Step::ReportCard { student } => {
                return registry.generate_report_card(*student).map(Outcome::Report);
            }
        };
        Ok(Outcome::Applied(status))
    }
}

/// What a successful step produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied(Status),
    Report(ReportCard),
}
