//! Typed CLI errors.

/// Typed failure for command-line parsing and fixture loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// No command given, or the command name is unrecognized.
    UsageError,

    /// `--fixture` was missing or the file at that path failed to load.
    FixtureLoadFailed { path: String },

    /// A command-specific required argument was missing.
    MissingArg { detail: String },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UsageError => write!(f, "usage error"),
            Self::FixtureLoadFailed { path } => write!(f, "missing or invalid --fixture: {path}"),
            Self::MissingArg { detail } => write!(f, "{detail}"),
        }
    }
}

impl std::error::Error for CliError {}
