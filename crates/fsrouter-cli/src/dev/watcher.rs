use anyhow::{Context, Result};
use colored::Colorize;
use fsrouter::{FileRouter, WatchEvent, WatchEventKind};
use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;

use super::OutputModule;

/// Translates a notify event into the router's event vocabulary
pub fn to_watch_events(event: &Event) -> Vec<WatchEvent> {
    let kind_for = |kind: WatchEventKind| {
        event
            .paths
            .iter()
            .map(|path| WatchEvent::new(kind, path))
            .collect::<Vec<_>>()
    };

    match event.kind {
        EventKind::Create(CreateKind::Folder) => kind_for(WatchEventKind::AddDir),
        EventKind::Create(_) => event
            .paths
            .iter()
            .map(|path| {
                let kind = if path.is_dir() {
                    WatchEventKind::AddDir
                } else {
                    WatchEventKind::Add
                };
                WatchEvent::new(kind, path)
            })
            .collect(),
        EventKind::Remove(RemoveKind::Folder) => kind_for(WatchEventKind::UnlinkDir),
        EventKind::Remove(_) => kind_for(WatchEventKind::Unlink),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => kind_for(WatchEventKind::Unlink),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => kind_for(WatchEventKind::Add),
        // paths = [from, to]
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => event
            .paths
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let kind = if i == 0 {
                    WatchEventKind::Unlink
                } else {
                    WatchEventKind::Add
                };
                WatchEvent::new(kind, path)
            })
            .collect(),
        EventKind::Modify(ModifyKind::Name(_)) => event
            .paths
            .iter()
            .map(|path| {
                let kind = if path.exists() {
                    WatchEventKind::Add
                } else {
                    WatchEventKind::Unlink
                };
                WatchEvent::new(kind, path)
            })
            .collect(),
        // mtime/chmod noise
        EventKind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
        EventKind::Modify(_) => kind_for(WatchEventKind::Change),
        _ => Vec::new(),
    }
}

/// Directory to register with notify for `root`: the root itself, or its
/// nearest existing ancestor so a routes directory created later is seen
pub fn watch_target(root: &Path) -> Option<&Path> {
    root.ancestors().find(|dir| dir.is_dir())
}

/// Watches the routes directory and keeps the output module current
pub struct RouteWatcher {
    router: FileRouter,
    debounce: Duration,
}

impl RouteWatcher {
    pub fn new(router: FileRouter, debounce: Duration) -> Self {
        Self { router, debounce }
    }

    /// Runs until the watcher channel closes
    pub async fn run(&self, mut module: OutputModule) -> Result<()> {
        let (tx, mut rx) = mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                for watch_event in to_watch_events(&event) {
                    let _ = tx.blocking_send(watch_event);
                }
            }
        })?;

        for root in self.router.watch_roots() {
            let Some(target) = watch_target(&root) else {
                println!("  {} Nothing to watch for {}", "⚠".yellow(), root.display());
                continue;
            };
            watcher
                .watch(target, RecursiveMode::Recursive)
                .with_context(|| format!("Failed to watch {:?}", target))?;
            if target == root {
                println!("  {} Watching: {}", "👀".cyan(), root.display());
            } else {
                println!(
                    "  {} {} does not exist yet, watching {}",
                    "👀".cyan(),
                    root.display(),
                    target.display()
                );
            }
        }
        println!();

        while let Some(first) = rx.recv().await {
            // Coalesce a burst of events into one pass
            let mut batch = vec![first];
            while let Ok(Some(event)) = tokio::time::timeout(self.debounce, rx.recv()).await {
                batch.push(event);
            }

            let mut regenerate = false;
            for event in &batch {
                if self.router.handle_event(event, &mut module) {
                    tracing::debug!("{:?} {:?} changed the route set", event.kind, event.path);
                } else if event.kind == WatchEventKind::Change && module.is_tracked(&event.path) {
                    println!("{} Route file changed: {}", "🔄".yellow(), event.path.display());
                    regenerate = true;
                }
            }

            if module.take_reload() || regenerate {
                if let Err(e) = module.regenerate() {
                    eprintln!("{} Failed to regenerate: {}", "❌".red(), e);
                }
            }
        }

        drop(watcher);
        Ok(())
    }
}
