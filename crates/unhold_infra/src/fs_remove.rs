use std::io;
use std::path::Path;

use unhold_app::{FileMoverInfra, FileRemoverInfra};
use unhold_domain::RemoveError;

/// Low-level delete and rename with errno-level failure classification.
///
/// Outcome selection upstream depends on distinguishing "held open"
/// from "security policy" from "ACL denial", so the raw OS error code
/// is inspected before falling back to the generic [`io::ErrorKind`].
#[derive(Default)]
pub struct UnholdFileRemoveService;

impl UnholdFileRemoveService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl FileRemoverInfra for UnholdFileRemoveService {
    async fn remove(&self, path: &Path) -> Result<(), RemoveError> {
        tokio::fs::remove_file(path).await.map_err(classify)
    }
}

#[async_trait::async_trait]
impl FileMoverInfra for UnholdFileRemoveService {
    async fn rename(&self, from: &Path, to: &Path) -> Result<(), RemoveError> {
        tokio::fs::rename(from, to).await.map_err(classify)
    }
}

fn classify(error: io::Error) -> RemoveError {
    if error.kind() == io::ErrorKind::NotFound {
        return RemoveError::NotFound;
    }

    #[cfg(unix)]
    if let Some(code) = error.raw_os_error() {
        // EACCES is an ACL denial; EPERM and EROFS come from policy
        // (immutable flags, read-only mounts, LSM rejections).
        return match code {
            libc::EBUSY | libc::ETXTBSY => RemoveError::Busy,
            libc::EACCES => RemoveError::AuthorizationViolation,
            libc::EPERM | libc::EROFS => RemoveError::SecurityViolation,
            _ => RemoveError::Other(error),
        };
    }

    #[cfg(windows)]
    if let Some(code) = error.raw_os_error() {
        use windows_sys::Win32::Foundation::{
            ERROR_ACCESS_DENIED, ERROR_LOCK_VIOLATION, ERROR_SHARING_VIOLATION,
        };

        return match code as u32 {
            ERROR_SHARING_VIOLATION | ERROR_LOCK_VIOLATION => RemoveError::Busy,
            ERROR_ACCESS_DENIED => RemoveError::AuthorizationViolation,
            _ => RemoveError::Other(error),
        };
    }

    match error.kind() {
        io::ErrorKind::ResourceBusy => RemoveError::Busy,
        io::ErrorKind::PermissionDenied => RemoveError::AuthorizationViolation,
        _ => RemoveError::Other(error),
    }
}
