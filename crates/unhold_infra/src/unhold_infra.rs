use std::path::Path;
use std::sync::Arc;

use unhold_app::{
    FileInfoInfra, FileMoverInfra, FileRemoverInfra, LockQueryInfra, ProcessInfoInfra,
    ProcessTerminatorInfra, RebootScheduleInfra,
};
use unhold_domain::{Error, LockHolder, ProcessId, RemoveError};

use crate::fs_info::UnholdFileMetaService;
use crate::fs_remove::UnholdFileRemoveService;
use crate::lock_query::UnholdLockQueryService;
use crate::process::UnholdProcessService;
use crate::reboot::UnholdRebootScheduleService;

/// Aggregate of every platform capability, injected into the services
/// as a single unit.
#[derive(Clone, Default)]
pub struct UnholdInfra {
    lock_query_service: Arc<UnholdLockQueryService>,
    process_service: Arc<UnholdProcessService>,
    file_meta_service: Arc<UnholdFileMetaService>,
    file_remove_service: Arc<UnholdFileRemoveService>,
    reboot_schedule_service: Arc<UnholdRebootScheduleService>,
}

impl UnholdInfra {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl LockQueryInfra for UnholdInfra {
    async fn find_locking_processes(&self, path: &Path) -> Result<Vec<LockHolder>, Error> {
        self.lock_query_service.find_locking_processes(path).await
    }
}

#[async_trait::async_trait]
impl ProcessTerminatorInfra for UnholdInfra {
    async fn terminate(&self, pid: ProcessId) -> anyhow::Result<()> {
        self.process_service.terminate(pid).await
    }
}

impl ProcessInfoInfra for UnholdInfra {
    fn current_pid(&self) -> ProcessId {
        self.process_service.current_pid()
    }
}

#[async_trait::async_trait]
impl FileInfoInfra for UnholdInfra {
    async fn is_file(&self, path: &Path) -> bool {
        self.file_meta_service.is_file(path).await
    }
}

#[async_trait::async_trait]
impl FileRemoverInfra for UnholdInfra {
    async fn remove(&self, path: &Path) -> Result<(), RemoveError> {
        self.file_remove_service.remove(path).await
    }
}

#[async_trait::async_trait]
impl FileMoverInfra for UnholdInfra {
    async fn rename(&self, from: &Path, to: &Path) -> Result<(), RemoveError> {
        self.file_remove_service.rename(from, to).await
    }
}

#[async_trait::async_trait]
impl RebootScheduleInfra for UnholdInfra {
    async fn schedule_remove_on_reboot(&self, path: &Path) -> anyhow::Result<()> {
        self.reboot_schedule_service
            .schedule_remove_on_reboot(path)
            .await
    }

    async fn schedule_rename_on_reboot(&self, from: &Path, to: &Path) -> anyhow::Result<()> {
        self.reboot_schedule_service
            .schedule_rename_on_reboot(from, to)
            .await
    }
}
