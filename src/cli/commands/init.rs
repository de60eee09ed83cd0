use std::{fs, io, path::Path};

use anyhow::{Context, Result};

use super::super::{exit_status::ExitStatus, report};
use crate::config::{CONFIG_FILE_NAME, Config, default_config_json};
use crate::core::languages::{default_languages, write_languages};

pub fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    let mut stdout = io::stdout();

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    fs::write(config_path, format!("{}\n", default_config_json()?))
        .with_context(|| format!("Failed to write file: {}", CONFIG_FILE_NAME))?;
    report::print_success_to(&format!("Created {}", CONFIG_FILE_NAME), &mut stdout);

    let languages_file = Config::default().languages_file;
    let languages_path = Path::new(&languages_file);
    if !languages_path.exists() {
        write_languages(languages_path, &default_languages())?;
        report::print_success_to(&format!("Created {}", languages_file), &mut stdout);
    }

    Ok(ExitStatus::Success)
}
