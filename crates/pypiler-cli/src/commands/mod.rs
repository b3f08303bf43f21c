//! Command implementations for the PyPiler CLI.

pub mod check;
pub mod init;
pub mod lower;
