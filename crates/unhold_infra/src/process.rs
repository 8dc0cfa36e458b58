use anyhow::Context;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use unhold_app::{ProcessInfoInfra, ProcessTerminatorInfra};
use unhold_domain::ProcessId;

/// Process termination and identity backed by sysinfo.
#[derive(Default)]
pub struct UnholdProcessService;

impl UnholdProcessService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ProcessTerminatorInfra for UnholdProcessService {
    async fn terminate(&self, pid: ProcessId) -> anyhow::Result<()> {
        tokio::task::spawn_blocking(move || kill(pid)).await?
    }
}

impl ProcessInfoInfra for UnholdProcessService {
    fn current_pid(&self) -> ProcessId {
        ProcessId::new(std::process::id())
    }
}

fn kill(pid: ProcessId) -> anyhow::Result<()> {
    let sys_pid = sysinfo::Pid::from_u32(pid.as_u32());
    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[sys_pid]),
        false,
        ProcessRefreshKind::nothing(),
    );

    let process = system
        .process(sys_pid)
        .with_context(|| format!("Process {pid} has already exited"))?;
    if !process.kill() {
        anyhow::bail!("Process {pid} could not be signalled to terminate");
    }

    Ok(())
}
