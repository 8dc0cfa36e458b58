use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};
use unhold_domain::{Error, Outcome, RemoveError};

use crate::resolution::{failure_outcome, resolve_blockers};
use crate::{
    FileInfoInfra, FileRemoverInfra, LockQueryInfra, ProcessInfoInfra, ProcessTerminatorInfra,
    RebootScheduleInfra,
};

/// Drives the end-to-end forced deletion of a single file.
///
/// Queries the lock snapshot, terminates blocking processes (never the
/// calling process itself), attempts the delete, and on failure either
/// reports the classified failure or registers a boot-time delete.
pub struct ForceDelete<F> {
    infra: Arc<F>,
}

impl<F> ForceDelete<F> {
    pub fn new(infra: Arc<F>) -> Self {
        Self { infra }
    }
}

impl<F> ForceDelete<F>
where
    F: LockQueryInfra
        + ProcessTerminatorInfra
        + ProcessInfoInfra
        + FileInfoInfra
        + FileRemoverInfra
        + RebootScheduleInfra,
{
    /// Deletes `path`, killing any process that holds it open first.
    ///
    /// Exactly one [`Outcome`] is returned; no error escapes. When
    /// `schedule_on_failure` is set, an undeletable file is registered
    /// for deletion at the next boot instead of being reported as a
    /// plain failure.
    pub async fn force_delete(&self, path: &Path, schedule_on_failure: bool) -> Outcome {
        if !self.infra.is_file(path).await {
            return Outcome::FileNotFound;
        }

        let holders = match self.infra.find_locking_processes(path).await {
            Ok(holders) => holders,
            Err(Error::LockQueryUnavailable(reason)) => {
                // Unknown lock state is not "no blockers"; killing
                // nothing and reporting failure is the only safe move.
                warn!(path = %path.display(), %reason, "lock enumeration unavailable");
                return Outcome::Failed;
            }
        };

        let resolution = resolve_blockers(self.infra.as_ref(), path, holders).await;
        if !resolution.clean() {
            warn!(
                path = %path.display(),
                observed = resolution.observed,
                failed = resolution.failed,
                "blocking processes survived the termination pass"
            );
        }

        // The delete attempt itself is the arbiter of whether a lock
        // persists; it runs whether or not the pass was clean.
        let failure = match self.infra.remove(path).await {
            Ok(()) => return Outcome::Deleted,
            // The file is already gone; deletion has nothing left to do.
            Err(RemoveError::NotFound) => return Outcome::Deleted,
            Err(error) => {
                debug!(path = %path.display(), %error, "delete attempt failed");
                failure_outcome(&error)
            }
        };

        if !schedule_on_failure {
            return failure;
        }

        match self.infra.schedule_remove_on_reboot(path).await {
            Ok(()) => Outcome::AfterReboot,
            Err(error) => {
                warn!(path = %path.display(), %error, "boot-time delete registration failed");
                Outcome::FailedUnableToScheduleForReboot
            }
        }
    }
}
