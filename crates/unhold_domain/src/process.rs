use std::fmt::Display;

use derive_more::From;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Operating-system process identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, From, Serialize, Deserialize,
)]
pub struct ProcessId(u32);

impl ProcessId {
    pub fn new(pid: u32) -> Self {
        Self(pid)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl Display for ProcessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A process observed holding an open handle to the target file.
///
/// Identity is the pid; the name is carried for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Setters, Serialize, Deserialize)]
#[setters(strip_option, into)]
pub struct LockHolder {
    pub pid: ProcessId,
    pub name: Option<String>,
}

impl LockHolder {
    pub fn new(pid: impl Into<ProcessId>) -> Self {
        Self { pid: pid.into(), name: None }
    }
}
