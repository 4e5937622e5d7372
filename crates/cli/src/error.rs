//! Failures of an `aura` invocation and the exit code each one maps to.
//!
//! | code | kind         | cause                                          |
//! |------|--------------|------------------------------------------------|
//! | 2    |              | argument parsing (clap, before `run`)          |
//! | 10   | `simulation` | bad viewport, or the animator was torn down    |
//! | 11   | `io`         | seed file unreadable, PNG not writable         |
//! | 12   | `input`      | bad `--params`, seed file, schedule or palette |
//! | 13   | `output`     | JSON report could not be encoded               |

use aura_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot simulate: {0}")]
    Simulation(EngineError),
    #[error("animator stopped before the run finished")]
    Stopped,
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Input(String),
    #[error("invalid input schedule: {0}")]
    Schedule(String),
    #[error("cannot encode report: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Simulation(_) | CliError::Stopped => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) | CliError::Schedule(_) => 12,
            CliError::Output(_) => 13,
        }
    }

    /// Short machine-readable label for `--json` error output.
    pub fn kind(&self) -> &'static str {
        match self.exit_code() {
            10 => "simulation",
            11 => "io",
            12 => "input",
            _ => "output",
        }
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Stopped => CliError::Stopped,
            EngineError::Io(msg) => CliError::Io(msg),
            EngineError::InvalidSchedule(msg) => CliError::Schedule(msg),
            EngineError::InvalidColor(msg) | EngineError::InvalidPalette(msg) => {
                CliError::Input(msg)
            }
            other => CliError::Simulation(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_viewport_is_a_simulation_failure() {
        let err = CliError::from(EngineError::InvalidDimensions);
        assert_eq!((err.exit_code(), err.kind()), (10, "simulation"));
        assert!(err.to_string().starts_with("cannot simulate"));
    }

    #[test]
    fn torn_down_animator_shares_the_simulation_code() {
        let err = CliError::from(EngineError::Stopped);
        assert!(matches!(err, CliError::Stopped));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn unordered_schedule_is_user_input() {
        let err = CliError::from(EngineError::InvalidSchedule("frame 2 after 5".into()));
        assert_eq!((err.exit_code(), err.kind()), (12, "input"));
        assert!(err.to_string().contains("schedule: frame 2"), "{err}");
    }

    #[test]
    fn palette_and_color_errors_are_user_input() {
        for e in [
            EngineError::InvalidPalette("unknown palette 'teal'".into()),
            EngineError::InvalidColor("#zz0000".into()),
        ] {
            assert_eq!(CliError::from(e).exit_code(), 12);
        }
    }

    #[test]
    fn snapshot_write_failure_keeps_its_message() {
        let err = CliError::from(EngineError::Io("disk full".into()));
        assert_eq!((err.exit_code(), err.kind()), (11, "io"));
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn json_encoding_failure_is_an_output_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CliError = json_err.into();
        assert_eq!((err.exit_code(), err.kind()), (13, "output"));
    }
}
