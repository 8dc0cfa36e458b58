mod force_delete;
mod force_move;
mod infra;
mod resolution;

pub use force_delete::*;
pub use force_move::*;
pub use infra::*;

pub mod domain {
    pub use unhold_domain::*;
}
