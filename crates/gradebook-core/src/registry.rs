//! The student registry.
//!
//! Owns every student and course, hands out sequential ids, and exposes the
//! mutating operations plus report card generation. Lookups are linear scans.

use chrono::NaiveDate;

use crate::error::RegistryError;
use crate::model::{Course, CourseId, Student, StudentId};
use crate::report::{CourseSummary, ReportCard};
use crate::statistics::{average, AttendanceTally};

/// Whether enrollment checks the course id against registered courses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnrollmentPolicy {
    /// Accept any course id, registered or not.
    #[default]
    Permissive,
    /// Reject course ids that were never added.
    RequireCourse,
}

/// In-memory owner of all student and course records.
#[derive(Debug)]
pub struct Registry {
    students: Vec<Student>,
    courses: Vec<Course>,
    next_student_id: u32,
    next_course_id: u32,
    policy: EnrollmentPolicy,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_policy(EnrollmentPolicy::default())
    }

    pub fn with_policy(policy: EnrollmentPolicy) -> Self {
        Self {
            students: Vec::new(),
            courses: Vec::new(),
            next_student_id: 1,
            next_course_id: 1,
            policy,
        }
    }

    pub fn policy(&self) -> EnrollmentPolicy {
        self.policy
    }

    /// Register a new student and return its id.
    pub fn add_student(
        &mut self,
        name: &str,
        date_of_birth: NaiveDate,
        contact_info: &str,
    ) -> StudentId {
        let id = StudentId(self.next_student_id);
        self.next_student_id += 1;
        self.students
            .push(Student::new(id, name, date_of_birth, contact_info));
        tracing::debug!(student_id = %id, name, "student added");
        id
    }

    /// Register a new course and return its id.
    pub fn add_course(&mut self, name: &str) -> CourseId {
        let id = CourseId(self.next_course_id);
        self.next_course_id += 1;
        self.courses.push(Course::new(id, name));
        tracing::debug!(course_id = %id, name, "course added");
        id
    }

    /// Enroll a student in a course, creating empty grade and attendance
    /// records for it.
    ///
    /// Re-enrolling is rejected with [`RegistryError::AlreadyEnrolled`] and
    /// keeps the existing records.
    pub fn enroll_student_in_course(
        &mut self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<(), RegistryError> {
        let course_known = self.course(course_id).is_some();
        let policy = self.policy;

        let student = self
            .student_mut(student_id)
            .ok_or(RegistryError::StudentNotFound(student_id))
            .inspect_err(|e| tracing::debug!("enrollment rejected: {e}"))?;

        if policy == EnrollmentPolicy::RequireCourse && !course_known {
            tracing::debug!(course_id = %course_id, "enrollment rejected: unknown course");
            return Err(RegistryError::CourseNotFound(course_id));
        }

        if !student.enroll(course_id) {
            tracing::debug!(student_id = %student_id, course_id = %course_id, "already enrolled");
            return Err(RegistryError::AlreadyEnrolled {
                student_id,
                course_id,
            });
        }

        tracing::debug!(student_id = %student_id, course_id = %course_id, "enrolled");
        Ok(())
    }

    /// Append a presence flag to the student's attendance for a course.
    ///
    /// `date` is only used for logging; records stay in call order.
    pub fn record_attendance(
        &mut self,
        student_id: StudentId,
        course_id: CourseId,
        date: NaiveDate,
        is_present: bool,
    ) -> Result<(), RegistryError> {
        let enrollment = self
            .student_mut(student_id)
            .and_then(|s| s.enrollment_mut(course_id))
            .ok_or(RegistryError::NotEnrolled {
                student_id,
                course_id,
            })
            .inspect_err(|e| tracing::debug!("attendance rejected: {e}"))?;

        enrollment.push_attendance(is_present);
        tracing::debug!(
            student_id = %student_id,
            course_id = %course_id,
            %date,
            is_present,
            "attendance recorded"
        );
        Ok(())
    }

    /// Append a grade to the student's record for a course. The assessment
    /// label is not stored.
    pub fn add_grade(
        &mut self,
        student_id: StudentId,
        course_id: CourseId,
        assessment: &str,
        grade: f64,
    ) -> Result<(), RegistryError> {
        let enrollment = self
            .student_mut(student_id)
            .and_then(|s| s.enrollment_mut(course_id))
            .ok_or(RegistryError::NotEnrolled {
                student_id,
                course_id,
            })
            .inspect_err(|e| tracing::debug!("grade rejected: {e}"))?;

        enrollment.push_grade(grade);
        tracing::debug!(
            student_id = %student_id,
            course_id = %course_id,
            assessment,
            grade,
            "grade added"
        );
        Ok(())
    }

    /// Summarise every enrollment of a student, in enrollment order.
    pub fn generate_report_card(&self, student_id: StudentId) -> Result<ReportCard, RegistryError> {
        let student = self
            .student(student_id)
            .ok_or(RegistryError::StudentNotFound(student_id))?;

        let courses = student
            .enrollments()
            .iter()
            .map(|e| CourseSummary {
                course_id: e.course_id,
                average_grade: average(e.grades()),
                attendance: AttendanceTally::from_records(e.attendance()),
            })
            .collect();

        Ok(ReportCard {
            student_id: student.id,
            student_name: student.name.clone(),
            courses,
        })
    }

    /// First student with the given id.
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// First course with the given id.
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// All students, in creation order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// All courses, in creation order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    fn student_mut(&mut self, id: StudentId) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id == id)
    }
}
