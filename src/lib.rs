//! # gitdo
//!
//! A per-project task tracker. Tasks live in a hidden `.gitdo/` directory
//! at the project root, stored as a single JSON file, and are managed from
//! the command line.
//!
//! ## Architecture
//!
//! - **Task entity** (`task`): the data record and its lifecycle transitions
//! - **Storage engine** (`store`): walk-up store discovery, JSON persistence,
//!   and all mutating operations with id-prefix lookup
//! - **Markdown extractor** (`markdown`): checkbox items → tasks, for bulk import
//! - **Config** (`config`): optional per-store TOML settings
//! - **Rendering** (`render`): stateless table formatting for the CLI
//!
//! ## Library usage
//!
//! ```no_run
//! use gitdo::store::TaskStore;
//!
//! let store = TaskStore::new("/path/to/project".into());
//! store.init().unwrap();
//!
//! let task = store.add("write the report").unwrap();
//! store.complete(&task.id[..8]).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod markdown;
pub mod render;
pub mod store;
pub mod task;
