use std::path::Path;

use tracing::debug;
use unhold_app::LockQueryInfra;
use unhold_domain::{Error, LockHolder};

/// Open-handle enumeration against the live system.
///
/// Linux walks `/proc/<pid>/fd`; macOS asks `lsof`. Everything else
/// reports the query as unavailable rather than guessing "no blockers".
#[derive(Default)]
pub struct UnholdLockQueryService;

impl UnholdLockQueryService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl LockQueryInfra for UnholdLockQueryService {
    async fn find_locking_processes(&self, path: &Path) -> Result<Vec<LockHolder>, Error> {
        let target = path.to_path_buf();
        let holders = tokio::task::spawn_blocking(move || scan(&target))
            .await
            .map_err(|error| Error::LockQueryUnavailable(error.to_string()))??;

        debug!(path = %path.display(), holders = holders.len(), "open-handle snapshot");
        Ok(holders)
    }
}

#[cfg(target_os = "linux")]
fn scan(path: &Path) -> Result<Vec<LockHolder>, Error> {
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::PathBuf;

    let target = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    // An open handle can outlive the directory entry; /proc then reports
    // the link target with a "(deleted)" suffix.
    let unlinked = PathBuf::from(format!("{} (deleted)", target.display()));

    let entries =
        fs::read_dir("/proc").map_err(|error| Error::LockQueryUnavailable(error.to_string()))?;

    let mut holders = BTreeMap::new();
    for entry in entries.flatten() {
        let Some(pid) = entry
            .file_name()
            .to_str()
            .and_then(|name| name.parse::<u32>().ok())
        else {
            continue;
        };

        // Processes may exit mid-scan or deny fd access; either way they
        // are simply not observed holding the file.
        let Ok(fds) = fs::read_dir(entry.path().join("fd")) else {
            continue;
        };
        for fd in fds.flatten() {
            let Ok(link) = fs::read_link(fd.path()) else {
                continue;
            };
            if link == target || link == unlinked {
                let mut holder = LockHolder::new(pid);
                if let Some(name) = process_name(pid) {
                    holder = holder.name(name);
                }
                holders.insert(pid, holder);
                break;
            }
        }
    }

    Ok(holders.into_values().collect())
}

#[cfg(target_os = "linux")]
fn process_name(pid: u32) -> Option<String> {
    std::fs::read_to_string(format!("/proc/{pid}/comm"))
        .ok()
        .map(|name| name.trim().to_string())
}

#[cfg(target_os = "macos")]
fn scan(path: &Path) -> Result<Vec<LockHolder>, Error> {
    use std::collections::BTreeSet;
    use std::process::Command;

    let output = Command::new("lsof")
        .arg("-t")
        .arg("--")
        .arg(path)
        .output()
        .map_err(|error| Error::LockQueryUnavailable(error.to_string()))?;

    // lsof exits non-zero when nothing holds the file open; only a
    // missing or unusable binary reaches the Err arm above.
    let stdout = String::from_utf8_lossy(&output.stdout);
    let pids: BTreeSet<u32> = stdout
        .lines()
        .filter_map(|line| line.trim().parse().ok())
        .collect();

    Ok(pids.into_iter().map(LockHolder::new).collect())
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn scan(_path: &Path) -> Result<Vec<LockHolder>, Error> {
    Err(Error::LockQueryUnavailable(
        "open-handle enumeration is not implemented for this platform".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_observes_own_open_handle() {
        use unhold_domain::ProcessId;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("held.txt");
        std::fs::write(&path, b"held").unwrap();
        let _handle = std::fs::File::open(&path).unwrap();

        let holders = UnholdLockQueryService::new()
            .find_locking_processes(&path)
            .await
            .unwrap();

        let own_pid = ProcessId::new(std::process::id());
        assert!(holders.iter().any(|holder| holder.pid == own_pid));
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_unheld_file_has_no_holders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idle.txt");
        std::fs::write(&path, b"idle").unwrap();

        let holders = UnholdLockQueryService::new()
            .find_locking_processes(&path)
            .await
            .unwrap();

        assert!(holders.is_empty());
    }
}
