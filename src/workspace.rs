//! Access to the files of a build workspace.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::collector::FilesParser;
use crate::error::Result;
use crate::model::ParserResult;

/// Cooperative cancellation flag shared between a build and its workers.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The file system a build runs in.
pub trait Workspace {
    /// Root directory of the workspace.
    fn root(&self) -> &Path;

    /// Run the collector against this workspace.
    ///
    /// # Errors
    /// Propagates scan failures (`Io`) and cancellation (`Interrupted`).
    fn act(&self, collector: &FilesParser) -> Result<ParserResult>;

    fn cancellation(&self) -> &CancellationToken;
}

/// Workspace on the local disk.
#[derive(Debug, Clone)]
pub struct LocalWorkspace {
    root: PathBuf,
    cancel: CancellationToken,
}

impl LocalWorkspace {
    /// Open a workspace rooted at `root`.
    ///
    /// # Errors
    /// Returns an error if the root cannot be resolved.
    pub fn open(root: &Path) -> Result<Self> {
        Ok(Self {
            root: dunce::canonicalize(root)?,
            cancel: CancellationToken::new(),
        })
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

impl Workspace for LocalWorkspace {
    fn root(&self) -> &Path {
        &self.root
    }

    fn act(&self, collector: &FilesParser) -> Result<ParserResult> {
        collector.parse(&self.root, &self.cancel)
    }

    fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }
}
