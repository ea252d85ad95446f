use super::phase::{Hook, LifecyclePhase};

/// Errors raised by the lifecycle controller.
///
/// Every variant is terminal for the current launch attempt. Launch is a
/// one-shot sequence, so nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// A step was requested while the controller was somewhere else in the
    /// sequence.
    #[error("`{hook}` invoked out of order (controller is {phase})")]
    OutOfOrder { hook: Hook, phase: LifecyclePhase },

    /// The render delegate was reassigned after the engine consumed it.
    #[error("render delegate reassigned after the engine attached it (controller is {phase})")]
    LateDelegateAssignment { phase: LifecyclePhase },

    /// The controller reached a final phase and accepts no further changes.
    #[error("controller is {phase}; no further lifecycle changes are accepted")]
    Finished { phase: LifecyclePhase },

    /// An engine call failed during bring-up.
    #[error("engine failed during `{hook}`")]
    Engine {
        hook: Hook,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl LifecycleError {
    pub(crate) fn engine(hook: Hook, err: anyhow::Error) -> Self {
        LifecycleError::Engine {
            hook,
            source: err.into(),
        }
    }

    /// True for errors caused by driving the controller in the wrong order,
    /// as opposed to a collaborator failing.
    pub fn is_sequencing_violation(&self) -> bool {
        !matches!(self, LifecycleError::Engine { .. })
    }
}
