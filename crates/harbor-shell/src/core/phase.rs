use std::fmt;

/// Position of a controller in the launch sequence.
///
/// The sequence is linear and never re-entered:
/// `Created -> DelegateAttachPending -> PreStartPending -> Running -> Terminated`.
/// `Failed` is a terminal side exit taken when the engine fails during bring-up.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LifecyclePhase {
    /// Controller exists; the host has not delivered the launch notification.
    Created,
    /// Launch notification received; the delegate hook has not completed.
    DelegateAttachPending,
    /// Delegate hook completed; views, pre-start and engine start remain.
    PreStartPending,
    /// Engine run loop is live.
    Running,
    /// Termination notification handled. Final.
    Terminated,
    /// Bring-up aborted by an engine failure. Final.
    Failed,
}

impl LifecyclePhase {
    /// Phase entered when the transition out of `self` completes.
    ///
    /// Final phases have no successor.
    pub fn next(self) -> Option<LifecyclePhase> {
        match self {
            LifecyclePhase::Created => Some(LifecyclePhase::DelegateAttachPending),
            LifecyclePhase::DelegateAttachPending => Some(LifecyclePhase::PreStartPending),
            LifecyclePhase::PreStartPending => Some(LifecyclePhase::Running),
            LifecyclePhase::Running => Some(LifecyclePhase::Terminated),
            LifecyclePhase::Terminated | LifecyclePhase::Failed => None,
        }
    }

    pub fn is_final(self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecyclePhase::Created => "created",
            LifecyclePhase::DelegateAttachPending => "delegate-attach-pending",
            LifecyclePhase::PreStartPending => "pre-start-pending",
            LifecyclePhase::Running => "running",
            LifecyclePhase::Terminated => "terminated",
            LifecyclePhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A single step the controller performs on behalf of the host.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Hook {
    /// Host launch notification.
    Launch,
    /// `should_attach_render_delegate` extension point.
    AttachRenderDelegate,
    /// Engine builds its view hierarchy and takes the delegate.
    ConstructViews,
    /// `pre_start` extension point.
    PreStart,
    /// Engine run loop start.
    StartEngine,
    /// Host termination notification.
    Terminate,
}

impl Hook {
    /// Phase the controller must be in for this step to run.
    pub fn required_phase(self) -> LifecyclePhase {
        match self {
            Hook::Launch => LifecyclePhase::Created,
            Hook::AttachRenderDelegate => LifecyclePhase::DelegateAttachPending,
            Hook::ConstructViews | Hook::PreStart | Hook::StartEngine => {
                LifecyclePhase::PreStartPending
            }
            Hook::Terminate => LifecyclePhase::Running,
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Hook::Launch => "launch",
            Hook::AttachRenderDelegate => "should_attach_render_delegate",
            Hook::ConstructViews => "construct_views",
            Hook::PreStart => "pre_start",
            Hook::StartEngine => "start_engine",
            Hook::Terminate => "terminate",
        };
        f.write_str(name)
    }
}
