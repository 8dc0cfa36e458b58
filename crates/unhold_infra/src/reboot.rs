use std::path::Path;

use unhold_app::RebootScheduleInfra;

/// Deferred delete/rename registration with the operating system.
///
/// Windows keeps a pending-rename list that the session manager replays
/// during boot; a registration with a null destination is a delete.
/// Nothing equivalent exists on unix, so registration fails there.
#[derive(Default)]
pub struct UnholdRebootScheduleService;

impl UnholdRebootScheduleService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl RebootScheduleInfra for UnholdRebootScheduleService {
    async fn schedule_remove_on_reboot(&self, path: &Path) -> anyhow::Result<()> {
        register_pending(path, None)
    }

    async fn schedule_rename_on_reboot(&self, from: &Path, to: &Path) -> anyhow::Result<()> {
        register_pending(from, Some(to))
    }
}

#[cfg(windows)]
fn register_pending(from: &Path, to: Option<&Path>) -> anyhow::Result<()> {
    use std::os::windows::ffi::OsStrExt;

    use windows_sys::Win32::Storage::FileSystem::{MOVEFILE_DELAY_UNTIL_REBOOT, MoveFileExW};

    let mut source: Vec<u16> = from.as_os_str().encode_wide().collect();
    source.push(0);
    let destination: Option<Vec<u16>> = to.map(|to| {
        let mut wide: Vec<u16> = to.as_os_str().encode_wide().collect();
        wide.push(0);
        wide
    });
    let destination_ptr = destination
        .as_ref()
        .map_or(std::ptr::null(), |wide| wide.as_ptr());

    let registered =
        unsafe { MoveFileExW(source.as_ptr(), destination_ptr, MOVEFILE_DELAY_UNTIL_REBOOT) };
    if registered == 0 {
        return Err(std::io::Error::last_os_error().into());
    }

    Ok(())
}

#[cfg(not(windows))]
fn register_pending(from: &Path, _to: Option<&Path>) -> anyhow::Result<()> {
    anyhow::bail!(
        "No boot-time pending-operation facility on this platform; cannot defer {}",
        from.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[tokio::test]
    async fn test_registration_fails_where_unsupported() {
        let actual = UnholdRebootScheduleService::new()
            .schedule_remove_on_reboot(Path::new("/tmp/b.lock"))
            .await;

        assert!(actual.is_err());
    }
}
