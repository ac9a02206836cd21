//! Driver scripts: ordered lists of registry calls.
//!
//! Scripts come from the built-in demonstration or from TOML files:
//!
//! ```toml
//! [script]
//! name = "Term one"
//!
//! [[steps]]
//! op = "add_course"
//! name = "Mathematics"
//!
//! [[steps]]
//! op = "record_attendance"
//! student = 1
//! course = 1
//! date = "2024-09-02"
//! present = true
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeDelta};
use serde::Deserialize;

use crate::model::{CourseId, StudentId};

/// One registry call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    AddCourse {
        name: String,
    },
    AddStudent {
        name: String,
        date_of_birth: NaiveDate,
        #[serde(default)]
        contact_info: String,
    },
    Enroll {
        student: StudentId,
        course: CourseId,
    },
    /// The recorded date is `date` (or the run date when absent) shifted by
    /// `offset_days`.
    RecordAttendance {
        student: StudentId,
        course: CourseId,
        #[serde(default)]
        date: Option<NaiveDate>,
        #[serde(default)]
        offset_days: i64,
        present: bool,
    },
    AddGrade {
        student: StudentId,
        course: CourseId,
        #[serde(default)]
        assessment: String,
        grade: f64,
    },
    ReportCard {
        student: StudentId,
    },
}

impl Step {
    /// The `op` tag this step is written with.
    pub fn op(&self) -> &'static str {
        match self {
            Step::AddCourse { .. } => "add_course",
            Step::AddStudent { .. } => "add_student",
            Step::Enroll { .. } => "enroll",
            Step::RecordAttendance { .. } => "record_attendance",
            Step::AddGrade { .. } => "add_grade",
            Step::ReportCard { .. } => "report_card",
        }
    }
}

/// Resolve an attendance date against the run date.
///
/// Falls back to the unshifted date if the offset leaves chrono's range.
pub fn resolve_date(date: Option<NaiveDate>, offset_days: i64, today: NaiveDate) -> NaiveDate {
    let base = date.unwrap_or(today);
    match TimeDelta::try_days(offset_days).and_then(|delta| base.checked_add_signed(delta)) {
        Some(resolved) => resolved,
        None => {
            tracing::warn!("offset of {offset_days} days from {base} is out of range, ignoring");
            base
        }
    }
}

/// A named sequence of steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub name: String,
    pub description: String,
    pub steps: Vec<Step>,
}

impl Script {
    /// The fixed demonstration: two courses, two students, a few
    /// enrollments, attendance marks, grades, and both report cards.
    pub fn demo() -> Self {
        let student = |name: &str, (y, m, d): (i32, u32, u32), contact: &str| Step::AddStudent {
            name: name.into(),
            date_of_birth: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            contact_info: contact.into(),
        };
        let attendance = |s: u32, c: u32, offset_days: i64, present: bool| Step::RecordAttendance {
            student: StudentId(s),
            course: CourseId(c),
            date: None,
            offset_days,
            present,
        };
        let grade = |s: u32, c: u32, assessment: &str, grade: f64| Step::AddGrade {
            student: StudentId(s),
            course: CourseId(c),
            assessment: assessment.into(),
            grade,
        };
        let enroll = |s: u32, c: u32| Step::Enroll {
            student: StudentId(s),
            course: CourseId(c),
        };

        Self {
            name: "Demonstration".into(),
            description: "Built-in walkthrough of every registry operation".into(),
            steps: vec![
                Step::AddCourse {
                    name: "Mathematics".into(),
                },
                Step::AddCourse {
                    name: "Science".into(),
                },
                student("Alice Johnson", (2000, 5, 21), "alice.j@example.com"),
                student("Bob Smith", (2001, 8, 10), "bob.s@example.com"),
                enroll(1, 1),
                enroll(1, 2),
                enroll(2, 1),
                attendance(1, 1, 0, true),
                attendance(1, 1, -1, false),
                attendance(2, 1, 0, true),
                grade(1, 1, "Midterm", 88.5),
                grade(1, 1, "Final", 92.0),
                grade(2, 1, "Midterm", 75.0),
                Step::ReportCard {
                    student: StudentId(1),
                },
                Step::ReportCard {
                    student: StudentId(2),
                },
            ],
        }
    }
}

/// Intermediate TOML structure for script files.
#[derive(Debug, Deserialize)]
struct TomlScriptFile {
    script: TomlScriptHeader,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct TomlScriptHeader {
    name: String,
    #[serde(default)]
    description: String,
}

/// Parse a single TOML script file.
pub fn parse_script(path: &Path) -> Result<Script> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script file: {}", path.display()))?;

    parse_script_str(&content, path)
}

/// Parse a TOML string into a `Script`.
pub fn parse_script_str(content: &str, source_path: &Path) -> Result<Script> {
    let parsed: TomlScriptFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(Script {
        name: parsed.script.name,
        description: parsed.script.description,
        steps: parsed.steps,
    })
}

/// A `.toml` file in a script directory that failed to load.
#[derive(Debug, Clone)]
pub struct SkippedScript {
    pub path: PathBuf,
    pub error: String,
}

/// Scripts found under a directory, plus the files that were skipped.
#[derive(Debug, Default)]
pub struct ScriptDirectory {
    pub scripts: Vec<Script>,
    pub skipped: Vec<SkippedScript>,
}

/// Recursively load all `.toml` scripts from a directory.
///
/// Files that fail to parse are logged and listed in
/// [`ScriptDirectory::skipped`].
pub fn load_script_directory(dir: &Path) -> Result<ScriptDirectory> {
    let mut loaded = ScriptDirectory::default();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            let nested = load_script_directory(&path)?;
            loaded.scripts.extend(nested.scripts);
            loaded.skipped.extend(nested.skipped);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_script(&path) {
                Ok(script) => loaded.scripts.push(script),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                    loaded.skipped.push(SkippedScript {
                        path,
                        error: format!("{e:#}"),
                    });
                }
            }
        }
    }

    Ok(loaded)
}

/// Whether `id` was handed out by a counter that has issued `issued` ids.
fn assigned(id: u32, issued: u32) -> bool {
    (1..=issued).contains(&id)
}

/// A warning from script validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// 1-based step index, if the warning is about a single step.
    pub step: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a script for calls the registry would reject.
///
/// Replays id assignment without touching a registry, so a warning means
/// the step will print a not-found or already-enrolled line when run.
pub fn validate_script(script: &Script) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if script.steps.is_empty() {
        warnings.push(ValidationWarning {
            step: None,
            message: "script has no steps".into(),
        });
        return warnings;
    }

    let mut students = 0u32;
    let mut courses = 0u32;
    let mut enrolled: HashSet<(StudentId, CourseId)> = HashSet::new();

    for (index, step) in script.steps.iter().enumerate() {
        let mut warn = |message: String| {
            warnings.push(ValidationWarning {
                step: Some(index + 1),
                message,
            })
        };

        match step {
            Step::AddCourse { .. } => courses += 1,
            Step::AddStudent { .. } => students += 1,
            Step::Enroll { student, course } => {
                if !assigned(student.0, students) {
                    warn(format!("student ID {student} does not exist yet"));
                    continue;
                }
                if !assigned(course.0, courses) {
                    warn(format!("course ID {course} is not registered"));
                }
                if !enrolled.insert((*student, *course)) {
                    warn(format!(
                        "student ID {student} is already enrolled in course ID {course}"
                    ));
                }
            }
            Step::RecordAttendance {
                student, course, ..
            }
            | Step::AddGrade {
                student, course, ..
            } => {
                if !enrolled.contains(&(*student, *course)) {
                    warn(format!(
                        "student ID {student} is not enrolled in course ID {course}"
                    ));
                }
            }
            Step::ReportCard { student } => {
                if !assigned(student.0, students) {
                    warn(format!("student ID {student} does not exist yet"));
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[script]
name = "Sample"
description = "two students"

[[steps]]
op = "add_course"
name = "Mathematics"

[[steps]]
op = "add_student"
name = "Alice"
date_of_birth = "2000-05-21"
contact_info = "alice@example.com"

[[steps]]
op = "enroll"
student = 1
course = 1

[[steps]]
op = "record_attendance"
student = 1
course = 1
date = "2024-09-02"
present = true

[[steps]]
op = "record_attendance"
student = 1
course = 1
offset_days = -1
present = false

[[steps]]
op = "add_grade"
student = 1
course = 1
assessment = "Quiz"
grade = 90

[[steps]]
op = "report_card"
student = 1
"#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_sample_script() {
        let script = parse_script_str(SAMPLE, Path::new("sample.toml")).unwrap();
        assert_eq!(script.name, "Sample");
        assert_eq!(script.description, "two students");
        assert_eq!(script.steps.len(), 7);
        assert_eq!(
            script.steps[1],
            Step::AddStudent {
                name: "Alice".into(),
                date_of_birth: date(2000, 5, 21),
                contact_info: "alice@example.com".into(),
            }
        );
        assert_eq!(
            script.steps[3],
            Step::RecordAttendance {
                student: StudentId(1),
                course: CourseId(1),
                date: Some(date(2024, 9, 2)),
                offset_days: 0,
                present: true,
            }
        );
        assert!(matches!(
            script.steps[5],
            Step::AddGrade { grade, .. } if grade == 90.0
        ));
        assert!(validate_script(&script).is_empty());
    }

    #[test]
    fn unknown_op_is_rejected() {
        let content = r#"
[script]
name = "Bad"

[[steps]]
op = "delete_student"
student = 1
"#;
        assert!(parse_script_str(content, Path::new("bad.toml")).is_err());
    }

    #[test]
    fn missing_header_is_rejected() {
        let content = r#"
[[steps]]
op = "add_course"
name = "Art"
"#;
        let err = parse_script_str(content, Path::new("nohdr.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("nohdr.toml"));
    }

    #[test]
    fn resolve_date_applies_offset() {
        let today = date(2024, 3, 1);
        assert_eq!(resolve_date(None, 0, today), today);
        assert_eq!(resolve_date(None, -1, today), date(2024, 2, 29));
        assert_eq!(resolve_date(Some(date(2023, 1, 1)), 2, today), date(2023, 1, 3));
        assert_eq!(resolve_date(None, i64::MAX, today), today);
    }

    #[test]
    fn demo_script_validates_cleanly() {
        let demo = Script::demo();
        assert_eq!(demo.steps.len(), 15);
        assert!(validate_script(&demo).is_empty());
    }

    #[test]
    fn validate_flags_problem_steps() {
        let script = Script {
            name: "Problems".into(),
            description: String::new(),
            steps: vec![
                Step::Enroll {
                    student: StudentId(1),
                    course: CourseId(1),
                },
                Step::AddStudent {
                    name: "Alice".into(),
                    date_of_birth: date(2000, 1, 1),
                    contact_info: String::new(),
                },
                Step::Enroll {
                    student: StudentId(1),
                    course: CourseId(4),
                },
                Step::Enroll {
                    student: StudentId(1),
                    course: CourseId(4),
                },
                Step::AddGrade {
                    student: StudentId(1),
                    course: CourseId(2),
                    assessment: "Final".into(),
                    grade: 50.0,
                },
                Step::ReportCard {
                    student: StudentId(999),
                },
            ],
        };

        let warnings = validate_script(&script);
        let steps: Vec<Option<usize>> = warnings.iter().map(|w| w.step).collect();
        assert_eq!(
            steps,
            vec![Some(1), Some(3), Some(4), Some(4), Some(5), Some(6)]
        );
        assert!(warnings[0].message.contains("does not exist"));
        assert!(warnings[1].message.contains("not registered"));
        assert!(warnings[3].message.contains("already enrolled"));
        assert!(warnings[4].message.contains("not enrolled"));
    }

    #[test]
    fn empty_script_warns() {
        let script = Script {
            name: "Empty".into(),
            description: String::new(),
            steps: vec![],
        };
        let warnings = validate_script(&script);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].step, None);
    }

    #[test]
    fn directory_loading_skips_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), SAMPLE).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not = [valid").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/b.toml"), SAMPLE).unwrap();

        let loaded = load_script_directory(dir.path()).unwrap();
        assert_eq!(loaded.scripts.len(), 2);
        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].path, dir.path().join("broken.toml"));
        assert!(loaded.skipped[0].error.contains("failed to parse TOML"));
    }
}
