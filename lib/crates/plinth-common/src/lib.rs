pub mod constants;
pub mod tag;
pub mod types;

pub use constants::*;
pub use tag::{ParseTagError, Tag};
pub use types::*;
