//! Diagnostic error types for gitdo.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for gitdo.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum GitdoError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Markdown(#[from] MarkdownError),
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("no task store found at {path}")]
    #[diagnostic(
        code(gitdo::store::not_initialized),
        help("Run `gitdo init` in the project root to create a .gitdo/ store.")
    )]
    NotInitialized { path: String },

    #[error("I/O error on {path}: {source}")]
    #[diagnostic(
        code(gitdo::store::io),
        help(
            "A filesystem operation on the task store failed. Check that the \
             .gitdo/ directory exists, has correct permissions, and that the \
             disk is not full."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt task store: {path}: {message}")]
    #[diagnostic(
        code(gitdo::store::corrupt),
        help(
            "The tasks file is not a valid JSON array of task records. \
             If it was edited by hand, fix the JSON; otherwise restore it \
             from version control or re-run `gitdo init` on a clean directory."
        )
    )]
    Corrupt { path: String, message: String },

    #[error("failed to serialize task collection: {message}")]
    #[diagnostic(
        code(gitdo::store::serialize),
        help("This indicates a bug in gitdo rather than a problem with your data.")
    )]
    Serialize { message: String },
}

/// Convenience alias for storage engine results.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// ---------------------------------------------------------------------------
// Markdown import errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum MarkdownError {
    #[error("file not found: {path}")]
    #[diagnostic(
        code(gitdo::markdown::not_found),
        help("Check the path passed to `gitdo import-md`.")
    )]
    FileNotFound { path: String },

    #[error("cannot read file: {path}")]
    #[diagnostic(
        code(gitdo::markdown::access),
        help("The file exists but could not be read. Check its permissions.")
    )]
    AccessDenied {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for markdown extraction results.
pub type MarkdownResult<T> = std::result::Result<T, MarkdownError>;

/// Convenience alias for functions returning gitdo results.
pub type GitdoResult<T> = std::result::Result<T, GitdoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_converts_to_gitdo_error() {
        let err = StoreError::NotInitialized {
            path: "/tmp/project".into(),
        };
        let gitdo: GitdoError = err.into();
        assert!(matches!(
            gitdo,
            GitdoError::Store(StoreError::NotInitialized { .. })
        ));
    }

    #[test]
    fn markdown_error_converts_to_gitdo_error() {
        let err = MarkdownError::FileNotFound {
            path: "todo.md".into(),
        };
        let gitdo: GitdoError = err.into();
        assert!(matches!(
            gitdo,
            GitdoError::Markdown(MarkdownError::FileNotFound { .. })
        ));
    }

    #[test]
    fn not_found_and_access_are_distinguishable() {
        let not_found = MarkdownError::FileNotFound {
            path: "a.md".into(),
        };
        let access = MarkdownError::AccessDenied {
            path: "b.md".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(matches!(not_found, MarkdownError::FileNotFound { .. }));
        assert!(matches!(access, MarkdownError::AccessDenied { .. }));
    }

    #[test]
    fn error_display_messages_are_descriptive() {
        let err = StoreError::Corrupt {
            path: "/tmp/.gitdo/tasks.json".into(),
            message: "expected value at line 1".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("tasks.json"));
        assert!(msg.contains("expected value"));
    }
}
