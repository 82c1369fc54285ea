use anyhow::Result;
use colored::Colorize;
use std::path::Path;

#[cfg(feature = "dev")]
pub fn execute(root: Option<&Path>) -> Result<()> {
    use super::Project;
    use crate::dev::{watcher::RouteWatcher, OutputModule};

    println!("{}", "Starting route watcher...".green().bold());
    println!();

    let project = Project::load(root)?;
    let output = project.output_path(None);
    let debounce = std::time::Duration::from_millis(project.config.dev.debounce_ms);

    let mut module = OutputModule::new(project.router.clone(), output);
    if let Err(e) = module.regenerate() {
        eprintln!("{} Initial generation failed: {}", "❌".red(), e);
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { RouteWatcher::new(project.router, debounce).run(module).await })
}

#[cfg(not(feature = "dev"))]
pub fn execute(_root: Option<&Path>) -> Result<()> {
    println!("{}", "⚠ Route watcher not available".yellow());
    println!();
    println!("The watcher requires the 'dev' feature.");
    println!("Rebuild with: cargo build --features dev");
    Ok(())
}
