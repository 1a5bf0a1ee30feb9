//! Command implementations

pub mod export;
pub mod init;
pub mod remind;
pub mod validate;
