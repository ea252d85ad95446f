//! Configuration types.
//!
//! `LaunchArgs` is the opaque payload handed to the pre-start hook;
//! `ShellConfig` configures the desktop host binding.

mod launch;
mod shell;

pub use launch::LaunchArgs;
pub use shell::ShellConfig;
