pub mod atomic;
pub mod metadata;
pub mod png;
