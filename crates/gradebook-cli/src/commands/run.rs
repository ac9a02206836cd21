//! The `gradebook run` command.

use std::path::PathBuf;

use anyhow::Result;

use gradebook_core::config::{load_config_from, GradebookConfig};
use gradebook_core::engine::{RunSummary, ScriptRunner, Status, StatusReporter};
use gradebook_core::error::RegistryError;
use gradebook_core::report::ReportCard;
use gradebook_core::script::{parse_script, Script};
use gradebook_core::Registry;

/// Prints status lines and report cards to stdout.
struct ConsoleReporter<'a> {
    config: &'a GradebookConfig,
}

impl StatusReporter for ConsoleReporter<'_> {
    fn on_applied(&self, status: &Status) {
        println!("{}", status.line(&self.config.date_format));
    }

    fn on_rejected(&self, error: &RegistryError) {
        println!("{error}");
    }

    fn on_report_card(&self, card: &ReportCard) {
        println!("{}", card.render(self.config.grade_precision));
    }

    fn on_script_complete(&self, summary: &RunSummary) {
        tracing::info!(
            steps = summary.steps,
            applied = summary.applied,
            rejected = summary.rejected,
            report_cards = summary.report_cards,
            "script complete"
        );
    }
}

pub fn execute(script_path: PathBuf, config_path: Option<PathBuf>, roster: bool) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let script = parse_script(&script_path)?;
    run_script(&script, &config, roster);
    Ok(())
}

/// Run `script` against a fresh registry, printing every outcome.
pub fn run_script(script: &Script, config: &GradebookConfig, roster: bool) -> RunSummary {
    let mut registry = Registry::with_policy(config.enrollment_policy());
    let runner = ScriptRunner::new(chrono::Local::now().date_naive());
    let reporter = ConsoleReporter { config };

    let summary = runner.run(&mut registry, script, &reporter);

    if roster {
        print_roster(&registry);
    }

    summary
}

fn print_roster(registry: &Registry) {
    use comfy_table::{Cell, Table};

    let mut students = Table::new();
    students.set_header(vec!["ID", "Name", "Date of Birth", "Contact", "Courses"]);
    for s in registry.students() {
        let courses: Vec<String> = s
            .enrollments()
            .iter()
            .map(|e| e.course_id.to_string())
            .collect();
        students.add_row(vec![
            Cell::new(s.id),
            Cell::new(&s.name),
            Cell::new(s.date_of_birth),
            Cell::new(&s.contact_info),
            Cell::new(courses.join(", ")),
        ]);
    }

    let mut courses = Table::new();
    courses.set_header(vec!["ID", "Course"]);
    for c in registry.courses() {
        courses.add_row(vec![Cell::new(c.id), Cell::new(&c.name)]);
    }

    println!("\n{students}");
    println!("{courses}");
}
