//! Side-effecting capabilities used by exports: clipboard, print and file delivery

pub mod clipboard;
pub mod download;
pub mod printer;
