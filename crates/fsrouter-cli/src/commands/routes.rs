use anyhow::Result;
use colored::Colorize;
use fsrouter::{HttpMethod, RouteEntry};
use std::path::Path;

use super::Project;

pub fn execute(root: Option<&Path>) -> Result<()> {
    let project = Project::load(root)?;
    let table = project.router.scan()?;

    println!(
        "{} {}",
        "Routes in".green().bold(),
        project.display_path(project.router.routes_dir())
    );
    println!();

    if table.is_empty() {
        println!("  {}", "No route files found".yellow());
        return Ok(());
    }

    let width = table
        .entries()
        .iter()
        .map(|e| e.route.route_path.chars().count())
        .max()
        .unwrap_or(0);

    for entry in table.entries() {
        println!(
            "  {}  {:<32}  {}",
            format!("{:<width$}", entry.route.route_path).cyan(),
            handlers(entry),
            project.display_path(&entry.route.file_path).to_string().dimmed(),
        );
    }

    let collisions = table.collisions();
    if !collisions.is_empty() {
        println!();
        for (route, files) in collisions {
            println!("{} {} is served by:", "⚠".yellow(), route.yellow());
            for (i, file) in files.iter().enumerate() {
                let note = if i == 0 { "" } else { " (shadowed)" };
                println!("    {}{}", project.display_path(file), note);
            }
        }
    }

    Ok(())
}

/// "GET POST mount", or "-" for a file that registers nothing
fn handlers(entry: &RouteEntry) -> String {
    let mut parts: Vec<&str> = entry
        .exports
        .methods()
        .map(HttpMethod::export_name)
        .collect();
    if entry.exports.has_default() {
        parts.push("mount");
    }
    if parts.is_empty() {
        return "-".to_string();
    }
    parts.join(" ")
}
