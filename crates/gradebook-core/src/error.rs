//! Registry error types.
//!
//! Every variant is recoverable: the rejected call leaves the registry
//! untouched. The `Display` text is the status line shown to the user.

use thiserror::Error;

use crate::model::{CourseId, StudentId};

/// Reasons a registry operation can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No student has the given id.
    #[error("Student ID {0} not found.")]
    StudentNotFound(StudentId),

    /// The student does not exist or is not enrolled in the course.
    #[error("Student ID {student_id} not found or not enrolled in Course ID {course_id}.")]
    NotEnrolled {
        student_id: StudentId,
        course_id: CourseId,
    },

    /// The student is already enrolled in the course.
    #[error("Student ID {student_id} is already enrolled in course ID {course_id}.")]
    AlreadyEnrolled {
        student_id: StudentId,
        course_id: CourseId,
    },

    /// No course has the given id. Only raised under
    /// [`EnrollmentPolicy::RequireCourse`](crate::registry::EnrollmentPolicy).
    #[error("Course ID {0} not found.")]
    CourseNotFound(CourseId),
}

impl RegistryError {
    /// Returns `true` for the idempotent re-enrollment case.
    pub fn is_conflict(&self) -> bool {
        matches!(self, RegistryError::AlreadyEnrolled { .. })
    }

    /// The student the rejected call referred to, if any.
    pub fn student_id(&self) -> Option<StudentId> {
        match self {
            RegistryError::StudentNotFound(id) => Some(*id),
            RegistryError::NotEnrolled { student_id, .. }
            | RegistryError::AlreadyEnrolled { student_id, .. } => Some(*student_id),
            RegistryError::CourseNotFound(_) => None,
        }
    }
}
