use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};
use unhold_domain::{LockHolder, Outcome, RemoveError};

use crate::{ProcessInfoInfra, ProcessTerminatorInfra};

/// Result of one termination pass over a lock snapshot.
///
/// The snapshot is authoritative for the pass: there is no re-query
/// after individual kills. The delete or rename attempt that follows is
/// what decides whether a surviving lock actually matters.
pub(crate) struct Resolution {
    /// Blocking processes observed, excluding the calling process.
    pub observed: usize,
    /// Termination attempts that themselves errored.
    pub failed: usize,
}

impl Resolution {
    /// Every observed blocker was signalled without error.
    pub fn clean(&self) -> bool {
        self.failed == 0
    }
}

/// Terminates every process in the snapshot except the calling process,
/// swallowing and recording per-process failures.
pub(crate) async fn resolve_blockers<F>(
    infra: &F,
    path: &Path,
    holders: Vec<LockHolder>,
) -> Resolution
where
    F: ProcessTerminatorInfra + ProcessInfoInfra,
{
    let own_pid = infra.current_pid();
    let mut seen = HashSet::new();
    let mut resolution = Resolution { observed: 0, failed: 0 };

    for holder in holders {
        // Killing ourselves would abort the very request.
        if holder.pid == own_pid || !seen.insert(holder.pid) {
            continue;
        }
        resolution.observed += 1;

        match infra.terminate(holder.pid).await {
            Ok(()) => {
                debug!(
                    pid = %holder.pid,
                    name = holder.name.as_deref(),
                    path = %path.display(),
                    "terminated blocking process"
                );
            }
            Err(error) => {
                resolution.failed += 1;
                warn!(
                    pid = %holder.pid,
                    name = holder.name.as_deref(),
                    %error,
                    "failed to terminate blocking process"
                );
            }
        }
    }

    resolution
}

/// Maps a classified delete/rename failure to its outcome.
pub(crate) fn failure_outcome(error: &RemoveError) -> Outcome {
    match error {
        RemoveError::SecurityViolation => Outcome::FailedSecurityException,
        RemoveError::AuthorizationViolation => Outcome::FailedUnauthorizedAccessException,
        RemoveError::Busy | RemoveError::NotFound | RemoveError::Other(_) => Outcome::Failed,
    }
}
