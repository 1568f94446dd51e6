//! gitdo CLI: per-project task tracking.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use gitdo::config::{CONFIG_FILE, StoreConfig};
use gitdo::markdown::parse_markdown_file;
use gitdo::render::{RenderOptions, render_import_preview, render_task_table, sort_for_display};
use gitdo::store::TaskStore;
use gitdo::task::TaskStatus;

#[derive(Parser)]
#[command(name = "gitdo", version, about = "Per-project task tracker")]
struct Cli {
    /// Project directory to operate on (skips store discovery).
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a .gitdo/ store in the current directory.
    Init,

    /// Add a new task.
    Add {
        /// Task title.
        title: String,
    },

    /// List tasks.
    List {
        /// Filter by status (pending, inprogress, completed).
        #[arg(long, short)]
        status: Option<String>,

        /// Show all tasks, including completed ones.
        #[arg(long, short)]
        all: bool,
    },

    /// Mark a task as in progress.
    Start {
        /// Leading characters of the task id.
        id_prefix: String,
    },

    /// Mark a task as completed.
    Complete {
        /// Leading characters of the task id.
        id_prefix: String,
    },

    /// Remove a task.
    Remove {
        /// Leading characters of the task id.
        id_prefix: String,
    },

    /// Import tasks from markdown checkbox items (`- [ ]` / `- [x]`).
    ImportMd {
        /// Path to the markdown file.
        file: PathBuf,

        /// Skip tasks whose titles already exist in the store.
        #[arg(long)]
        skip_duplicates: bool,

        /// Preview the extracted tasks without importing.
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            // The current directory explicitly, not discovery: running init
            // inside an existing project must still create a nested store.
            let base = match cli.dir {
                Some(dir) => dir,
                None => std::env::current_dir().into_diagnostic()?,
            };
            let store = TaskStore::new(base);
            if store.is_initialized() {
                println!("gitdo is already initialized in this directory.");
                return Ok(());
            }
            store.init()?;
            println!("gitdo initialized successfully!");
            println!("Created .gitdo/ in {}", store.base_dir().display());
        }

        Commands::Add { title } => {
            let store = TaskStore::open(cli.dir);
            store.ensure_initialized()?;

            let task = store.add(&title)?;
            println!("Added task: {}", task.title);
            println!("ID: {}", task.short_id(8));
        }

        Commands::List { status, all } => {
            let store = TaskStore::open(cli.dir);
            store.ensure_initialized()?;
            let config = StoreConfig::load_or_default(&store.store_dir().join(CONFIG_FILE))?;

            let status = match status.as_deref() {
                Some(tag) => match TaskStatus::from_tag(tag) {
                    Some(s) => Some(s),
                    None => miette::bail!(
                        "unknown status \"{tag}\" (expected pending, inprogress, or completed)"
                    ),
                },
                None => None,
            };

            let mut tasks = store.load()?;
            if !all {
                match status {
                    Some(wanted) => tasks.retain(|t| t.status == wanted),
                    None if config.shows_all_by_default() => {}
                    None => tasks.retain(|t| t.is_open()),
                }
            }

            if tasks.is_empty() {
                println!("No tasks found.");
                return Ok(());
            }

            sort_for_display(&mut tasks);
            let opts = RenderOptions {
                id_width: config.id_width,
            };
            print!("{}", render_task_table(&tasks, &opts));
        }

        Commands::Start { id_prefix } => {
            let store = TaskStore::open(cli.dir);
            store.ensure_initialized()?;

            if store.start(&id_prefix)? {
                println!("Task {id_prefix} marked as in progress!");
            } else {
                miette::bail!("no task matches prefix \"{id_prefix}\"");
            }
        }

        Commands::Complete { id_prefix } => {
            let store = TaskStore::open(cli.dir);
            store.ensure_initialized()?;

            if store.complete(&id_prefix)? {
                println!("Task {id_prefix} marked as completed!");
            } else {
                miette::bail!("no task matches prefix \"{id_prefix}\"");
            }
        }

        Commands::Remove { id_prefix } => {
            let store = TaskStore::open(cli.dir);
            store.ensure_initialized()?;

            if store.remove(&id_prefix)? {
                println!("Task {id_prefix} removed!");
            } else {
                miette::bail!("no task matches prefix \"{id_prefix}\"");
            }
        }

        Commands::ImportMd {
            file,
            skip_duplicates,
            dry_run,
        } => {
            let store = TaskStore::open(cli.dir);
            store.ensure_initialized()?;

            let tasks = parse_markdown_file(&file)?;
            if tasks.is_empty() {
                println!("No checkbox items found in {}", file.display());
                return Ok(());
            }

            println!("Found {} task(s) in {}:", tasks.len(), file.display());
            print!("{}", render_import_preview(&tasks));

            if dry_run {
                println!("Dry run - no tasks were imported");
                return Ok(());
            }

            let outcome = store.import(tasks, skip_duplicates)?;
            println!("Imported {} task(s)", outcome.imported);
            if outcome.skipped > 0 {
                println!("Skipped {} duplicate(s)", outcome.skipped);
            }
        }
    }

    Ok(())
}
