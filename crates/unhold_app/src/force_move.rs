use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};
use unhold_domain::{Error, Outcome};

use crate::resolution::{failure_outcome, resolve_blockers};
use crate::{
    FileInfoInfra, FileMoverInfra, LockQueryInfra, ProcessInfoInfra, ProcessTerminatorInfra,
    RebootScheduleInfra,
};

/// Companion to [`crate::ForceDelete`]: relocates a held-open file
/// instead of deleting it.
///
/// Same lock resolution, rename semantics instead of delete. A source
/// that vanishes between the existence check and the rename is a
/// failure here, unlike the delete flow where a missing file is the
/// requested end state.
pub struct ForceMove<F> {
    infra: Arc<F>,
}

impl<F> ForceMove<F> {
    pub fn new(infra: Arc<F>) -> Self {
        Self { infra }
    }
}

impl<F> ForceMove<F>
where
    F: LockQueryInfra
        + ProcessTerminatorInfra
        + ProcessInfoInfra
        + FileInfoInfra
        + FileMoverInfra
        + RebootScheduleInfra,
{
    /// Moves `from` to `to`, killing any process that holds `from` open
    /// first. Returns exactly one [`Outcome`]; no error escapes.
    pub async fn force_move(&self, from: &Path, to: &Path, schedule_on_failure: bool) -> Outcome {
        if !self.infra.is_file(from).await {
            return Outcome::FileNotFound;
        }

        let holders = match self.infra.find_locking_processes(from).await {
            Ok(holders) => holders,
            Err(Error::LockQueryUnavailable(reason)) => {
                warn!(path = %from.display(), %reason, "lock enumeration unavailable");
                return Outcome::Failed;
            }
        };

        let resolution = resolve_blockers(self.infra.as_ref(), from, holders).await;
        if !resolution.clean() {
            warn!(
                path = %from.display(),
                observed = resolution.observed,
                failed = resolution.failed,
                "blocking processes survived the termination pass"
            );
        }

        let failure = match self.infra.rename(from, to).await {
            Ok(()) => return Outcome::Moved,
            Err(error) => {
                debug!(
                    from = %from.display(),
                    to = %to.display(),
                    %error,
                    "rename attempt failed"
                );
                failure_outcome(&error)
            }
        };

        if !schedule_on_failure {
            return failure;
        }

        match self.infra.schedule_rename_on_reboot(from, to).await {
            Ok(()) => Outcome::AfterReboot,
            Err(error) => {
                warn!(path = %from.display(), %error, "boot-time rename registration failed");
                Outcome::FailedUnableToScheduleForReboot
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use unhold_domain::{LockHolder, ProcessId, RemoveError};

    use super::*;

    const SELF_PID: u32 = 42;

    #[derive(Default)]
    struct TestInfra {
        files: Mutex<HashSet<PathBuf>>,
        holders: Vec<LockHolder>,
        killed: Mutex<Vec<ProcessId>>,
        rename_failure: Option<fn() -> RemoveError>,
        schedule_denied: bool,
        schedule_renames: Mutex<Vec<(PathBuf, PathBuf)>>,
    }

    #[async_trait::async_trait]
    impl FileInfoInfra for TestInfra {
        async fn is_file(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains(path)
        }
    }

    #[async_trait::async_trait]
    impl LockQueryInfra for TestInfra {
        async fn find_locking_processes(&self, _path: &Path) -> Result<Vec<LockHolder>, Error> {
            Ok(self.holders.clone())
        }
    }

    #[async_trait::async_trait]
    impl ProcessTerminatorInfra for TestInfra {
        async fn terminate(&self, pid: ProcessId) -> anyhow::Result<()> {
            self.killed.lock().unwrap().push(pid);
            Ok(())
        }
    }

    impl ProcessInfoInfra for TestInfra {
        fn current_pid(&self) -> ProcessId {
            ProcessId::new(SELF_PID)
        }
    }

    #[async_trait::async_trait]
    impl FileMoverInfra for TestInfra {
        async fn rename(&self, from: &Path, to: &Path) -> Result<(), RemoveError> {
            if let Some(failure) = self.rename_failure {
                return Err(failure());
            }
            let mut files = self.files.lock().unwrap();
            if files.remove(from) {
                files.insert(to.to_path_buf());
                Ok(())
            } else {
                Err(RemoveError::NotFound)
            }
        }
    }

    #[async_trait::async_trait]
    impl RebootScheduleInfra for TestInfra {
        async fn schedule_remove_on_reboot(&self, _path: &Path) -> anyhow::Result<()> {
            unreachable!("force move never schedules a delete")
        }

        async fn schedule_rename_on_reboot(&self, from: &Path, to: &Path) -> anyhow::Result<()> {
            self.schedule_renames
                .lock()
                .unwrap()
                .push((from.to_path_buf(), to.to_path_buf()));
            if self.schedule_denied {
                anyhow::bail!("registration rejected");
            }
            Ok(())
        }
    }

    fn source() -> PathBuf {
        PathBuf::from("/tmp/a.lock")
    }

    fn destination() -> PathBuf {
        PathBuf::from("/tmp/a.moved")
    }

    fn infra_with_source() -> TestInfra {
        TestInfra {
            files: Mutex::new(HashSet::from([source()])),
            ..Default::default()
        }
    }

    fn fixture(infra: TestInfra) -> (ForceMove<TestInfra>, Arc<TestInfra>) {
        let infra = Arc::new(infra);
        (ForceMove::new(infra.clone()), infra)
    }

    #[tokio::test]
    async fn test_unlocked_file_is_moved() {
        let (service, infra) = fixture(infra_with_source());

        let actual = service.force_move(&source(), &destination(), false).await;

        assert_eq!(actual, Outcome::Moved);
        let files = infra.files.lock().unwrap();
        assert!(!files.contains(&source()));
        assert!(files.contains(&destination()));
    }

    #[tokio::test]
    async fn test_missing_source_returns_file_not_found() {
        let (service, infra) = fixture(TestInfra::default());

        let actual = service.force_move(&source(), &destination(), true).await;

        assert_eq!(actual, Outcome::FileNotFound);
        assert_eq!(infra.killed.lock().unwrap().len(), 0);
        assert_eq!(infra.schedule_renames.lock().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_blockers_terminated_before_move() {
        let mut infra = infra_with_source();
        infra.holders = vec![LockHolder::new(SELF_PID), LockHolder::new(7u32)];
        let (service, infra) = fixture(infra);

        let actual = service.force_move(&source(), &destination(), false).await;

        assert_eq!(actual, Outcome::Moved);
        assert_eq!(*infra.killed.lock().unwrap(), vec![ProcessId::new(7)]);
    }

    #[tokio::test]
    async fn test_busy_rename_schedules_reboot_move() {
        let mut infra = infra_with_source();
        infra.rename_failure = Some(|| RemoveError::Busy);
        let (service, infra) = fixture(infra);

        let actual = service.force_move(&source(), &destination(), true).await;

        assert_eq!(actual, Outcome::AfterReboot);
        assert_eq!(
            *infra.schedule_renames.lock().unwrap(),
            vec![(source(), destination())]
        );
    }

    #[tokio::test]
    async fn test_vanished_source_is_a_failure() {
        let mut infra = infra_with_source();
        infra.rename_failure = Some(|| RemoveError::NotFound);
        let (service, _) = fixture(infra);

        let actual = service.force_move(&source(), &destination(), false).await;

        assert_eq!(actual, Outcome::Failed);
    }

    #[tokio::test]
    async fn test_failed_registration_is_reported_distinctly() {
        let mut infra = infra_with_source();
        infra.rename_failure = Some(|| RemoveError::Busy);
        infra.schedule_denied = true;
        let (service, _) = fixture(infra);

        let actual = service.force_move(&source(), &destination(), true).await;

        assert_eq!(actual, Outcome::FailedUnableToScheduleForReboot);
    }
}
