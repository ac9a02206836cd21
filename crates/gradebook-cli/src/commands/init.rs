//! The `gradebook init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create gradebook.toml
    if std::path::Path::new("gradebook.toml").exists() {
        println!("gradebook.toml already exists, skipping.");
    } else {
        std::fs::write("gradebook.toml", SAMPLE_CONFIG)?;
        println!("Created gradebook.toml");
    }

    // Create example script
    std::fs::create_dir_all("scripts")?;
    let example_path = std::path::Path::new("scripts/example.toml");
    if example_path.exists() {
        println!("scripts/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_SCRIPT)?;
        println!("Created scripts/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit scripts/example.toml");
    println!("  2. Run: gradebook validate --script scripts/example.toml");
    println!("  3. Run: gradebook run --script scripts/example.toml --roster");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradebook configuration

# chrono format for dates in status lines
date_format = "%-m/%-d/%Y"

# decimals shown for average grades
grade_precision = 2

# reject enrollment in course ids that were never added
require_registered_course = false
"#;

const EXAMPLE_SCRIPT: &str = r#"[script]
name = "Example Term"
description = "One course, two students"

[[steps]]
op = "add_course"
name = "Mathematics"

[[steps]]
op = "add_student"
name = "Alice Johnson"
date_of_birth = "2000-05-21"
contact_info = "alice.j@example.com"

[[steps]]
op = "add_student"
name = "Bob Smith"
date_of_birth = "2001-08-10"
contact_info = "bob.s@example.com"

[[steps]]
op = "enroll"
student = 1
course = 1

[[steps]]
op = "enroll"
student = 2
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
date = "2024-09-03"
present = false

[[steps]]
op = "add_grade"
student = 1
course = 1
assessment = "Midterm"
grade = 88.5

[[steps]]
op = "add_grade"
student = 1
course = 1
assessment = "Final"
grade = 92.0

[[steps]]
op = "report_card"
student = 1

[[steps]]
op = "report_card"
student = 2
"#;
