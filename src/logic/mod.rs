pub mod filter_eval;
pub mod project;
pub mod update_apply;

pub use filter_eval::*;
pub use project::*;
pub use update_apply::*;
