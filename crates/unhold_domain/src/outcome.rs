use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Terminal result of one forced delete or move invocation.
///
/// Exactly one value is produced per call; it is the sole observable
/// return of the operation. Nothing escapes as an error or panic.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// The file was deleted.
    Deleted,
    /// The operation was blocked by an OS security policy.
    FailedSecurityException,
    /// The operation could not be completed now and was registered with
    /// the OS to run before the next restart completes.
    AfterReboot,
    /// The file was moved.
    Moved,
    /// Generic success, reserved for companion operations.
    Success,
    /// The path did not resolve to an existing file.
    FileNotFound,
    /// The operation was blocked by an access-control denial.
    FailedUnauthorizedAccessException,
    /// The operation failed and the boot-time registration failed too.
    FailedUnableToScheduleForReboot,
    /// The operation failed for any other reason.
    Failed,
}

impl Outcome {
    /// Whether the invocation left the file in the requested state or
    /// registered the deferred equivalent with the OS.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Deleted | Outcome::Moved | Outcome::Success | Outcome::AfterReboot
        )
    }

    /// Process exit code for the CLI. The success family maps to zero,
    /// each failure kind to its own non-zero code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Deleted | Outcome::Moved | Outcome::Success | Outcome::AfterReboot => 0,
            Outcome::Failed => 1,
            Outcome::FileNotFound => 2,
            Outcome::FailedSecurityException => 3,
            Outcome::FailedUnauthorizedAccessException => 4,
            Outcome::FailedUnableToScheduleForReboot => 5,
        }
    }
}
