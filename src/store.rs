//! File-backed task store with walk-up discovery.
//!
//! Tasks live in a JSON array at `.gitdo/tasks.json` under the project root.
//! Every operation is a self-contained load → mutate → whole-file rewrite
//! cycle; nothing is cached between calls and there is no locking, so two
//! concurrent writers resolve as last-writer-wins.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::task::Task;

/// Fixed name of the hidden store directory under the project root.
pub const STORE_DIR: &str = ".gitdo";

/// Fixed name of the tasks file inside the store directory.
pub const TASKS_FILE: &str = "tasks.json";

/// Counters returned by a bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Tasks appended to the collection.
    pub imported: usize,
    /// Tasks dropped as duplicate titles.
    pub skipped: usize,
}

/// Handle on a project's task store.
///
/// Holds only paths. Each operation reloads the collection from disk on
/// entry and rewrites the file on exit, so callers always see independent
/// snapshots.
pub struct TaskStore {
    base_dir: PathBuf,
    store_dir: PathBuf,
    tasks_file: PathBuf,
}

impl TaskStore {
    /// Store rooted at an explicit base directory. No discovery.
    pub fn new(base_dir: PathBuf) -> Self {
        let store_dir = base_dir.join(STORE_DIR);
        let tasks_file = store_dir.join(TASKS_FILE);
        Self {
            base_dir,
            store_dir,
            tasks_file,
        }
    }

    /// Store for the current directory's project, found by walking up.
    pub fn discover() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(discover_root(&cwd))
    }

    /// Explicit base directory if given, otherwise walk-up discovery.
    pub fn open(base_dir: Option<PathBuf>) -> Self {
        match base_dir {
            Some(dir) => Self::new(dir),
            None => Self::discover(),
        }
    }

    /// The project root this store is bound to.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the tasks file (`<base>/.gitdo/tasks.json`).
    pub fn tasks_file(&self) -> &Path {
        &self.tasks_file
    }

    /// Path of the store directory (`<base>/.gitdo`).
    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    /// Create the store directory and an empty tasks file. Idempotent:
    /// an existing directory is left alone and an existing tasks file is
    /// never overwritten.
    pub fn init(&self) -> StoreResult<()> {
        std::fs::create_dir_all(&self.store_dir).map_err(|e| StoreError::Io {
            path: self.store_dir.display().to_string(),
            source: e,
        })?;
        if !self.tasks_file.exists() {
            self.save(&[])?;
        }
        tracing::debug!(root = %self.base_dir.display(), "store initialized");
        Ok(())
    }

    /// True iff both the store directory and the tasks file exist.
    pub fn is_initialized(&self) -> bool {
        self.store_dir.is_dir() && self.tasks_file.exists()
    }

    /// Typed guard for the shell to call before mutating operations.
    pub fn ensure_initialized(&self) -> StoreResult<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(StoreError::NotInitialized {
                path: self.base_dir.display().to_string(),
            })
        }
    }

    /// Load the full task collection, in insertion order.
    ///
    /// A missing tasks file is an empty collection; unparsable contents or
    /// records missing required fields are `StoreError::Corrupt`.
    pub fn load(&self) -> StoreResult<Vec<Task>> {
        if !self.tasks_file.exists() {
            return Ok(Vec::new());
        }
        let data = std::fs::read_to_string(&self.tasks_file).map_err(|e| StoreError::Io {
            path: self.tasks_file.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&data).map_err(|e| StoreError::Corrupt {
            path: self.tasks_file.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Rewrite the tasks file with the given collection.
    fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(tasks).map_err(|e| StoreError::Serialize {
            message: e.to_string(),
        })?;
        std::fs::write(&self.tasks_file, json).map_err(|e| StoreError::Io {
            path: self.tasks_file.display().to_string(),
            source: e,
        })?;
        tracing::debug!(count = tasks.len(), path = %self.tasks_file.display(), "saved tasks");
        Ok(())
    }

    /// Append a new task with the given title. Returns the created task.
    pub fn add(&self, title: &str) -> StoreResult<Task> {
        let mut tasks = self.load()?;
        let task = Task::new(title);
        tasks.push(task.clone());
        self.save(&tasks)?;
        Ok(task)
    }

    /// First task in collection order whose id starts with the prefix.
    ///
    /// A short prefix that matches several tasks returns the first match
    /// silently; no ambiguity error is raised.
    pub fn get(&self, id_prefix: &str) -> StoreResult<Option<Task>> {
        let tasks = self.load()?;
        Ok(tasks.into_iter().find(|t| t.id.starts_with(id_prefix)))
    }

    /// Mark the first prefix match as in progress. False when nothing
    /// matches; the file is untouched in that case.
    pub fn start(&self, id_prefix: &str) -> StoreResult<bool> {
        let mut tasks = self.load()?;
        match tasks.iter_mut().find(|t| t.id.starts_with(id_prefix)) {
            Some(task) => {
                task.start();
                self.save(&tasks)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Mark the first prefix match as completed. False when nothing matches.
    pub fn complete(&self, id_prefix: &str) -> StoreResult<bool> {
        let mut tasks = self.load()?;
        match tasks.iter_mut().find(|t| t.id.starts_with(id_prefix)) {
            Some(task) => {
                task.complete();
                self.save(&tasks)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete the first prefix match, preserving the order of the rest.
    /// False when nothing matches; the file is untouched in that case.
    pub fn remove(&self, id_prefix: &str) -> StoreResult<bool> {
        let mut tasks = self.load()?;
        match tasks.iter().position(|t| t.id.starts_with(id_prefix)) {
            Some(pos) => {
                tasks.remove(pos);
                self.save(&tasks)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Append a batch of tasks, saving once at the end.
    ///
    /// With `skip_duplicates`, an incoming task is dropped when its title
    /// exactly matches (case-sensitive) a pre-existing title or one already
    /// accepted earlier in the batch.
    pub fn import(&self, incoming: Vec<Task>, skip_duplicates: bool) -> StoreResult<ImportOutcome> {
        let mut tasks = self.load()?;
        let mut seen: HashSet<String> = if skip_duplicates {
            tasks.iter().map(|t| t.title.clone()).collect()
        } else {
            HashSet::new()
        };

        let mut imported = 0;
        let mut skipped = 0;
        for task in incoming {
            if skip_duplicates && !seen.insert(task.title.clone()) {
                skipped += 1;
                continue;
            }
            tasks.push(task);
            imported += 1;
        }

        self.save(&tasks)?;
        tracing::debug!(imported, skipped, "import finished");
        Ok(ImportOutcome { imported, skipped })
    }
}

/// Walk-up discovery: find the nearest ancestor of `start` containing a
/// `.gitdo` directory.
///
/// `start` is resolved to an absolute, symlink-free path first so relative
/// segments don't cut the walk short. When no ancestor matches, the original
/// `start` is returned (an uninitialized store, not an error).
pub fn discover_root(start: &Path) -> PathBuf {
    let resolved = start
        .canonicalize()
        .unwrap_or_else(|_| start.to_path_buf());
    for dir in resolved.ancestors() {
        if dir.join(STORE_DIR).is_dir() {
            tracing::debug!(root = %dir.display(), "found task store");
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}
