use std::path::Path;

use unhold_domain::{Error, LockHolder, ProcessId, RemoveError};

/// Answers "which processes hold this path open right now?"
///
/// Purely observational; performs no mutation. The result is a snapshot
/// and may be stale by the time it is acted on.
#[async_trait::async_trait]
pub trait LockQueryInfra: Send + Sync {
    /// Returns the processes currently holding an open handle to `path`,
    /// deduplicated by pid. The path is not required to exist.
    ///
    /// Fails with [`Error::LockQueryUnavailable`] when the enumeration
    /// mechanism itself cannot be queried; callers must not treat that
    /// as an empty set.
    async fn find_locking_processes(&self, path: &Path) -> Result<Vec<LockHolder>, Error>;
}

/// Forced termination of a single process.
#[async_trait::async_trait]
pub trait ProcessTerminatorInfra: Send + Sync {
    /// Signals `pid` to terminate. An error means the attempt itself
    /// failed: the process already exited, access was denied, or the
    /// process is protected.
    async fn terminate(&self, pid: ProcessId) -> anyhow::Result<()>;
}

/// Identity of the calling process, injected so tests can fake it.
pub trait ProcessInfoInfra: Send + Sync {
    fn current_pid(&self) -> ProcessId;
}

/// Existence checks for target paths.
#[async_trait::async_trait]
pub trait FileInfoInfra: Send + Sync {
    /// Whether `path` resolves to an existing regular file. Directories
    /// do not count.
    async fn is_file(&self, path: &Path) -> bool;
}

/// File deletion with classified failures.
#[async_trait::async_trait]
pub trait FileRemoverInfra: Send + Sync {
    async fn remove(&self, path: &Path) -> Result<(), RemoveError>;
}

/// File rename with classified failures.
#[async_trait::async_trait]
pub trait FileMoverInfra: Send + Sync {
    async fn rename(&self, from: &Path, to: &Path) -> Result<(), RemoveError>;
}

/// Registration of deferred operations the OS performs at next boot.
///
/// The pending-operation record is owned and persisted by the operating
/// system, not by this crate.
#[async_trait::async_trait]
pub trait RebootScheduleInfra: Send + Sync {
    /// Schedules `path` for deletion before the next restart completes.
    async fn schedule_remove_on_reboot(&self, path: &Path) -> anyhow::Result<()>;

    /// Schedules `from` to be renamed to `to` at the next restart.
    async fn schedule_rename_on_reboot(&self, from: &Path, to: &Path) -> anyhow::Result<()>;
}
