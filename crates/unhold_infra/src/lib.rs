mod fs_info;
mod fs_remove;
mod lock_query;
mod process;
mod reboot;
mod unhold_infra;

pub use unhold_infra::*;
