use anyhow::{Context, Result};

/// Startup configuration passed to [`ControllerHooks::pre_start`](crate::core::ControllerHooks::pre_start).
///
/// The controller does not interpret or validate these values; their meaning
/// belongs to the integrator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaunchArgs {
    pub integer: i64,
    pub real: f32,
    pub text: String,
}

impl LaunchArgs {
    pub const INTEGER_VAR: &'static str = "HARBOR_LAUNCH_INT";
    pub const REAL_VAR: &'static str = "HARBOR_LAUNCH_REAL";
    pub const TEXT_VAR: &'static str = "HARBOR_LAUNCH_TEXT";

    pub fn new(integer: i64, real: f32, text: impl Into<String>) -> Self {
        Self {
            integer,
            real,
            text: text.into(),
        }
    }

    /// Reads `HARBOR_LAUNCH_INT`, `HARBOR_LAUNCH_REAL` and `HARBOR_LAUNCH_TEXT`.
    ///
    /// Unset variables keep their defaults; values that fail to parse are errors.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut args = Self::default();

        if let Some(raw) = lookup(Self::INTEGER_VAR) {
            args.integer = raw
                .trim()
                .parse::<i64>()
                .with_context(|| format!("{} is not an integer: {raw:?}", Self::INTEGER_VAR))?;
        }

        if let Some(raw) = lookup(Self::REAL_VAR) {
            args.real = raw
                .trim()
                .parse::<f32>()
                .with_context(|| format!("{} is not a number: {raw:?}", Self::REAL_VAR))?;
        }

        if let Some(raw) = lookup(Self::TEXT_VAR) {
            args.text = raw;
        }

        Ok(args)
    }
}
