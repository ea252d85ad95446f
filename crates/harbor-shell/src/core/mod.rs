//! Core lifecycle contract.
//!
//! This module defines the controller that mediates between the host's
//! lifecycle notifications and engine bring-up, the extension points an
//! integrator overrides, and the errors raised when the launch sequence is
//! driven out of order.

mod controller;
mod ctx;
mod error;
mod hooks;
mod phase;

pub use controller::AppController;
pub use ctx::{ControllerCtx, QuitHandler};
pub use error::LifecycleError;
pub use hooks::{ControllerHooks, NoHooks};
pub use phase::{Hook, LifecyclePhase};
