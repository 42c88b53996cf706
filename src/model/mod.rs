pub mod common;
pub mod document;
pub mod filter;
pub mod projection;
pub mod record;
pub mod update;

pub use common::*;
pub use document::*;
pub use filter::*;
pub use projection::*;
pub use record::*;
pub use update::*;
