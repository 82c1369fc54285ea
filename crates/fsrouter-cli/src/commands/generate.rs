use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::io;
use std::path::Path;

use super::{write_if_changed, Project};

pub fn execute(root: Option<&Path>, out: Option<&Path>, stdout: bool, check: bool) -> Result<()> {
    let project = Project::load(root)?;
    let module = project.router.generate()?;

    if stdout {
        print!("{}", module.code);
        return Ok(());
    }

    let output = project.output_path(out);

    if check {
        if !is_up_to_date(&output, &module.code)? {
            bail!(
                "{} is out of date, run `fsrouter generate`",
                project.display_path(&output)
            );
        }
        println!(
            "{} {} is up to date",
            "✓".green(),
            project.display_path(&output)
        );
        return Ok(());
    }

    let written = write_if_changed(&output, &module.code)?;
    let status = if written { "Generated" } else { "Unchanged" };
    println!(
        "{} {} {} ({} routes)",
        "✓".green(),
        status.bold(),
        project.display_path(&output).to_string().cyan(),
        module.table.len()
    );

    for (route, files) in module.table.collisions() {
        println!(
            "  {} {} is served by {} files",
            "⚠".yellow(),
            route.yellow(),
            files.len()
        );
    }

    Ok(())
}

/// Whether `path` holds exactly `code`; a missing file is out of date
fn is_up_to_date(path: &Path, code: &str) -> Result<bool> {
    match fs::read_to_string(path) {
        Ok(current) => Ok(current == code),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("Failed to read {:?}", path)),
    }
}
