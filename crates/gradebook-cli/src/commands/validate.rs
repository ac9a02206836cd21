//! The `gradebook validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gradebook_core::script::ScriptDirectory;

pub fn execute(script_path: PathBuf) -> Result<()> {
    let loaded = if script_path.is_dir() {
        gradebook_core::script::load_script_directory(&script_path)?
    } else {
        ScriptDirectory {
            scripts: vec![gradebook_core::script::parse_script(&script_path)?],
            skipped: Vec::new(),
        }
    };

    let mut total_warnings = 0;

    for skipped in &loaded.skipped {
        println!("Skipped: {}", skipped.path.display());
        println!("   WARNING: {}", skipped.error);
    }
    total_warnings += loaded.skipped.len();

    for script in &loaded.scripts {
        println!("Script: {} ({} steps)", script.name, script.steps.len());

        let warnings = gradebook_core::script::validate_script(script);
        for w in &warnings {
            let prefix = w
                .step
                .map(|step| format!("  [step {step}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All scripts valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
