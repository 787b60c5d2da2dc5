//! Authenticated citizen identity, read once at start-up.

use log::{info, warn};

use crate::config::PortalConfig;

const SESSION_KEY: &str = "portal.citizenId";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUser {
	pub citizen_id: String,
}

/// The signed-in citizen from browser storage, else the configured demo citizen.
pub fn restore_session(config: &PortalConfig) -> Option<SessionUser> {
	let stored = web_sys::window()
		.and_then(|w| w.local_storage().ok().flatten())
		.and_then(|storage| match storage.get_item(SESSION_KEY) {
			Ok(value) => value,
			Err(err) => {
				warn!("session storage unreadable: {:?}", err);
				None
			}
		});
	let citizen_id = stored
		.filter(|id| !id.trim().is_empty())
		.or_else(|| config.demo_citizen_id.clone())?;
	info!("session restored for citizen {}", citizen_id);
	Some(SessionUser { citizen_id })
}
