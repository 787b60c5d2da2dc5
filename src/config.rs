//! Build-time portal configuration.

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_FAMILY_GRAPH_DEPTH: u32 = 2;
const DEFAULT_APPLICATION_PAGE_SIZE: u32 = 100;

/// Settings shared by every page, provided through context.
#[derive(Clone, Debug, PartialEq)]
pub struct PortalConfig {
	/// Backend root, without a trailing slash.
	pub api_base_url: String,
	/// Hops the backend walks when assembling the family graph.
	pub family_graph_depth: u32,
	/// Applications requested when deriving enrolled schemes.
	pub application_page_size: u32,
	/// Citizen shown when no session is stored in the browser.
	pub demo_citizen_id: Option<String>,
}

impl Default for PortalConfig {
	fn default() -> Self {
		Self {
			api_base_url: DEFAULT_API_BASE_URL.into(),
			family_graph_depth: DEFAULT_FAMILY_GRAPH_DEPTH,
			application_page_size: DEFAULT_APPLICATION_PAGE_SIZE,
			demo_citizen_id: None,
		}
	}
}

impl PortalConfig {
	/// Defaults overridden by `PORTAL_API_BASE_URL` and `PORTAL_DEMO_CITIZEN_ID`
	/// at compile time.
	pub fn from_env() -> Self {
		let mut config = Self::default();
		if let Some(url) = option_env!("PORTAL_API_BASE_URL") {
			config.api_base_url = url.trim_end_matches('/').to_string();
		}
		config.demo_citizen_id = option_env!("PORTAL_DEMO_CITIZEN_ID")
			.filter(|id| !id.is_empty())
			.map(String::from);
		config
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_backend_contract() {
		let config = PortalConfig::default();
		assert_eq!(config.family_graph_depth, 2);
		assert_eq!(config.application_page_size, 100);
		assert!(!config.api_base_url.ends_with('/'));
	}
}
