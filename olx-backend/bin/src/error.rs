use snafu::Snafu;

use crate::config;

/// Result type alias for the CLI.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type for the CLI.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Application { source: olx_backend_server::Error },

    #[snafu(display("Could not initialize tokio runtime, error: {source}"))]
    InitializeTokioRuntime { source: tokio::io::Error },

    #[snafu(display("Could not initialize logger, error: {source}"))]
    InitializeLogger { source: olx_cli_common::config::LogError },

    #[snafu(display("{source}"))]
    Config { source: config::Error },

    #[snafu(display("Could not load `.env` file, error: {source}"))]
    LoadEnvFile { source: dotenvy::Error },

    #[snafu(display("Could not serialize {what}, error: {source}"))]
    Serialize { what: &'static str, source: serde_yaml::Error },

    #[snafu(display("Could not generate OpenAPI document, error: {message}"))]
    GenerateOpenApi { message: String },

    #[snafu(display("Could not write to stdout, error: {source}"))]
    WriteStdout { source: std::io::Error },
}

impl From<config::Error> for Error {
    fn from(source: config::Error) -> Self { Self::Config { source } }
}

impl From<olx_backend_server::Error> for Error {
    fn from(source: olx_backend_server::Error) -> Self { Self::Application { source } }
}

pub trait CommandError {
    fn exit_code(&self) -> exitcode::ExitCode;
}

impl CommandError for Error {
    fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Self::Application { .. } | Self::Serialize { .. } | Self::GenerateOpenApi { .. } => {
                exitcode::SOFTWARE
            }
            Self::Config { .. } | Self::LoadEnvFile { .. } | Self::InitializeLogger { .. } => {
                exitcode::CONFIG
            }
            Self::InitializeTokioRuntime { .. } | Self::WriteStdout { .. } => exitcode::IOERR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = Error::from(config::Error::InvalidEnvironmentVariable {
            name: "PORT",
            value: "eighty".to_string(),
        });
        assert_eq!(err.exit_code(), exitcode::CONFIG);

        let err = Error::WriteStdout { source: std::io::Error::other("closed") };
        assert_eq!(err.exit_code(), exitcode::IOERR);

        let err = Error::GenerateOpenApi { message: "unsupported schema".to_string() };
        assert_eq!(err.exit_code(), exitcode::SOFTWARE);
        assert_eq!(
            err.to_string(),
            "Could not generate OpenAPI document, error: unsupported schema"
        );
    }
}
