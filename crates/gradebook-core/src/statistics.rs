//! Grade averaging and attendance tallies.

use std::fmt;

/// Arithmetic mean of `grades`, or exactly `0.0` when there are none.
pub fn average(grades: &[f64]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    grades.iter().sum::<f64>() / grades.len() as f64
}

/// Attended and total class counts for one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttendanceTally {
    /// Classes marked present.
    pub attended: usize,
    /// Classes recorded.
    pub total: usize,
}

impl AttendanceTally {
    /// Count present flags in `attendance`.
    pub fn from_records(attendance: &[bool]) -> Self {
        Self {
            attended: attendance.iter().filter(|&&present| present).count(),
            total: attendance.len(),
        }
    }

    /// Fraction of classes attended. `None` when nothing was recorded.
    pub fn ratio(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.attended as f64 / self.total as f64)
        }
    }
}

// Printed as raw counts so an empty record shows as "0/0".
impl fmt::Display for AttendanceTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.attended, self.total)
    }
}
