// SPDX-License-Identifier: MPL-2.0
//! Crate error type.
//!
//! The presenter itself never fails: ignored requests are silent no-ops.
//! Errors only come from the ambient surface (configuration files, frame
//! assets, a runtime task that has shut down or failed).

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Image Error: {0}")]
    Image(String),
    /// The runtime task has stopped and can no longer receive requests.
    #[error("Presenter runtime is closed")]
    RuntimeClosed,
    /// The runtime task panicked or was cancelled before finishing.
    #[error("Presenter task failed: {0}")]
    TaskFailed(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::TaskFailed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn toml_parse_error_maps_to_config() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("not = valid = toml");
        let err: Error = parse.expect_err("invalid toml must fail").into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn panicked_task_maps_to_task_failed() {
        let join = tokio::spawn(async { panic!("renderer exploded") }).await;
        let err: Error = join.expect_err("task must panic").into();
        match err {
            Error::TaskFailed(message) => assert!(message.contains("panic")),
            other => panic!("expected TaskFailed variant, got {other:?}"),
        }
    }

    #[test]
    fn runtime_closed_display() {
        assert_eq!(Error::RuntimeClosed.to_string(), "Presenter runtime is closed");
    }
}
