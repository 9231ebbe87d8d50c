//! Error types for the background animation.
//!
//! None of these are fatal to the page: the animation simply does not start
//! and the static background color is applied instead.

use std::fmt;

/// Reasons the background animation could not start.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundError {
	/// The canvas element was not found or has not been mounted.
	MissingSurface,
	/// The canvas refused a 2D rendering context.
	UnsupportedBackend(String),
	/// A configuration override could not be parsed.
	InvalidConfig(String),
}

impl fmt::Display for BackgroundError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			BackgroundError::MissingSurface => write!(f, "background canvas not found"),
			BackgroundError::UnsupportedBackend(msg) => {
				write!(f, "canvas 2D context unavailable: {}", msg)
			}
			BackgroundError::InvalidConfig(msg) => {
				write!(f, "invalid background config: {}", msg)
			}
		}
	}
}

impl std::error::Error for BackgroundError {}

impl From<serde_json::Error> for BackgroundError {
	fn from(e: serde_json::Error) -> Self {
		BackgroundError::InvalidConfig(e.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_failure() {
		assert_eq!(
			BackgroundError::MissingSurface.to_string(),
			"background canvas not found"
		);
		assert!(
			BackgroundError::UnsupportedBackend("null".into())
				.to_string()
				.contains("2D context")
		);
	}

	#[test]
	fn json_errors_become_config_errors() {
		let err: BackgroundError = serde_json::from_str::<u32>("nope").unwrap_err().into();
		assert!(matches!(err, BackgroundError::InvalidConfig(_)));
	}
}
