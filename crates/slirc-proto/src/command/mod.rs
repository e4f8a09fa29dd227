//! IRC command classification.

mod types;

pub use self::types::Command;
