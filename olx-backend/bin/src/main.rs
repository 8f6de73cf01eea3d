mod cli;
mod command;
mod config;
mod error;
mod shadow {
    #![allow(clippy::needless_raw_string_hashes)]
    use shadow_rs::shadow;
    shadow!(build);

    pub use self::build::*;
}

use clap::Parser;

use self::{cli::Cli, error::CommandError};

fn main() {
    if let Err(err) = load_env_file(dotenvy::dotenv()) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }

    if let Err(err) = Cli::parse().run() {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}

/// A missing `.env` is fine, the environment may be set directly. A file that
/// exists but cannot be read or parsed is reported.
fn load_env_file<T>(result: dotenvy::Result<T>) -> error::Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(source) => Err(error::Error::LoadEnvFile { source }),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn env_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("olx-backend-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_env_file_is_ignored() {
        let path = std::env::temp_dir().join("olx-backend-no-such-file.env");

        assert!(load_env_file(dotenvy::from_path(path)).is_ok());
    }

    #[test]
    fn test_malformed_env_file_is_reported() {
        let path = env_file("malformed.env", "OLX_TEST_MALFORMED=\"unterminated\n");

        let err = load_env_file(dotenvy::from_path(&path)).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, error::Error::LoadEnvFile { .. }));
        assert_eq!(err.exit_code(), exitcode::CONFIG);
    }
}
