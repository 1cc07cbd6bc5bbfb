//! Filesystem-driven hook discovery.
//!
//! Layout contract: `<root>/<event>/<hook>.<ext>`, one level deep. Each
//! immediate subdirectory of the root names an event; each file directly
//! inside it binds a hook whose identifier is the file stem and whose
//! factory key equals that identifier.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use hookhub_core::error::AppError;
use hookhub_core::result::AppResult;

use crate::registry::{HookRegistry, HookSource};

/// Scans a directory tree and populates the registry.
#[derive(Debug)]
pub struct HookDiscovery {
    registry: Arc<HookRegistry>,
    discovered: AtomicBool,
}

impl HookDiscovery {
    /// Creates a discovery bound to the given registry.
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self {
            registry,
            discovered: AtomicBool::new(false),
        }
    }

    /// Scans `root` and binds every discovered hook, returning the number
    /// of bindings created.
    ///
    /// File names within an event directory are sorted lexicographically
    /// before binding, so firing order is deterministic across platforms.
    /// Dot-entries, symlinks, and nested directories are skipped. A second
    /// call is a warned no-op: rescanning would duplicate every binding.
    pub fn discover(&self, root: &Path) -> AppResult<usize> {
        if !root.is_dir() {
            return Err(AppError::configuration(format!(
                "Hook folder does not exist or is not a directory: {}",
                root.display()
            )));
        }

        if self.discovered.swap(true, Ordering::SeqCst) {
            warn!(root = %root.display(), "discovery already ran, skipping rescan");
            return Ok(0);
        }

        let mut event_dirs: Vec<(String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                debug!(path = %entry.path().display(), "skipping undecodable entry name");
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            // file_type() does not follow symlinks, so symlinked
            // directories are skipped here as well.
            if entry.file_type()?.is_dir() {
                event_dirs.push((name, entry.path()));
            }
        }
        event_dirs.sort_by(|a, b| a.0.cmp(&b.0));

        let mut bound = 0usize;
        for (event, dir) in &event_dirs {
            let mut hook_files: Vec<(String, PathBuf)> = Vec::new();
            for entry in fs::read_dir(dir)? {
                let entry = entry?;
                if !entry.file_type()?.is_file() {
                    continue;
                }
                let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                    debug!(path = %entry.path().display(), "skipping undecodable file name");
                    continue;
                };
                if name.starts_with('.') {
                    continue;
                }
                hook_files.push((name, entry.path()));
            }
            hook_files.sort_by(|a, b| a.0.cmp(&b.0));

            for (_, path) in hook_files {
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                self.registry.bind(
                    event,
                    stem,
                    HookSource::Discovered {
                        key: stem.to_string(),
                        origin: path.clone(),
                    },
                );
                bound += 1;
            }
        }

        info!(root = %root.display(), events = event_dirs.len(), bound, "hook discovery complete");
        Ok(bound)
    }

    /// Whether discovery has already run.
    pub fn has_discovered(&self) -> bool {
        self.discovered.load(Ordering::SeqCst)
    }
}
