use std::{io, io::Write, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use olx_backend_server::ApiDoc;
use snafu::ResultExt;
use utoipa::OpenApi;

use crate::{command::run_server, config::Config, error, shadow};

#[derive(Debug, Parser)]
#[command(author,
    version,
    long_version = shadow::CLAP_LONG_VERSION,
    about,
    long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(
        long = "config",
        short = 'c',
        env = "OLX_BACKEND_CONFIG_FILE_PATH",
        help = "Specify a configuration file"
    )]
    config_file_path: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(about = "Print version information")]
    Version,

    #[clap(about = "Output shell completion code for the specified shell (bash, zsh, fish)")]
    Completion { shell: Shell },

    #[clap(about = "Output default configuration")]
    DefaultConfig,

    #[clap(about = "Run server")]
    #[command(visible_alias = "run")]
    Server,

    #[clap(about = "Output `OpenApi` document")]
    OpenApi,
}

impl Cli {
    pub fn run(self) -> Result<(), Box<error::Error>> {
        match self.command {
            Command::Version => {
                write_stdout(Self::command().render_long_version().as_bytes())?;
            }
            Command::Completion { shell } => {
                let mut command = Self::command();
                let bin_name = command.get_name().to_string();
                clap_complete::generate(shell, &mut command, bin_name, &mut io::stdout());
            }
            Command::DefaultConfig => {
                let config_text = serde_yaml::to_string(&Config::default())
                    .context(error::SerializeSnafu { what: "default configuration" })?;
                write_stdout(config_text.as_bytes())?;
            }
            Command::Server => {
                let config = self.load_config()?;
                run_server(config)?;
            }
            Command::OpenApi => {
                write_stdout(openapi_document()?.as_bytes())?;
            }
        }

        Ok(())
    }

    /// Reads the configuration file, then applies `.env` and process
    /// environment overrides.
    ///
    /// A missing file at the default location falls back to the defaults, a
    /// missing file given explicitly is an error.
    #[allow(clippy::result_large_err)]
    fn load_config(&self) -> Result<Config, error::Error> {
        let mut config = match self.config_file_path {
            Some(ref path) => Config::load(path)?,
            None => {
                let path = Config::default_path();
                if path.exists() {
                    Config::load(&path)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;

        Ok(config)
    }
}

fn openapi_document() -> Result<String, error::Error> {
    ApiDoc::openapi()
        .to_yaml()
        .map_err(|err| error::Error::GenerateOpenApi { message: err.to_string() })
}

fn write_stdout(bytes: &[u8]) -> Result<(), error::Error> {
    io::stdout().write_all(bytes).context(error::WriteStdoutSnafu)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_lists_send_email() {
        let document = openapi_document().unwrap();

        assert!(document.contains("/sendEmail"));
        assert!(document.contains("/health"));
    }
}
