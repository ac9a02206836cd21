//! The `gradebook demo` command.

use std::path::PathBuf;

use anyhow::Result;

use gradebook_core::config::load_config_from;
use gradebook_core::script::Script;

use super::run::run_script;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    run_script(&Script::demo(), &config, false);
    Ok(())
}
