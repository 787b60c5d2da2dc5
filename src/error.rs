use thiserror::Error;

/// Errors surfaced while talking to the portal backend.
#[derive(Error, Debug)]
pub enum PortalError {
	/// Transport or body decoding failure.
	#[error("HTTP error: {0}")]
	Http(#[from] reqwest::Error),

	/// The backend answered with a non-success status.
	#[error("{path} returned HTTP {status}")]
	Status { status: u16, path: String },
}

impl PortalError {
	/// Status code for backend rejections, `None` for transport errors.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			Self::Http(err) => err.status().map(|s| s.as_u16()),
		}
	}
}

pub type PortalResult<T> = Result<T, PortalError>;
