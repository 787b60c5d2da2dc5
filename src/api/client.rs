use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::models::{Application, BenefitAllocation, PagedResult, Profile, Scheme};
use crate::error::{PortalError, PortalResult};
use crate::family::FamilyGraphData;

/// Backend operations the profile dashboard depends on.
#[async_trait(?Send)]
pub trait CitizenApi {
	async fn get_citizen_by_id(&self, citizen_id: &str) -> PortalResult<Profile>;

	async fn get_applications_by_citizen(
		&self,
		citizen_id: &str,
		page: u32,
		size: u32,
	) -> PortalResult<PagedResult<Application>>;

	async fn get_scheme_by_id(&self, scheme_id: &str) -> PortalResult<Scheme>;

	/// Family graph reachable within `depth` hops of the citizen.
	async fn get_family_relationships(
		&self,
		citizen_id: &str,
		depth: u32,
	) -> PortalResult<FamilyGraphData>;

	async fn get_family_benefits(&self, citizen_id: &str) -> PortalResult<Vec<BenefitAllocation>>;
}

/// JSON-over-HTTP client for the portal backend.
#[derive(Clone, Debug)]
pub struct HttpCitizenApi {
	base_url: String,
	http: Client,
}

impl HttpCitizenApi {
	pub fn new(base_url: &str) -> Self {
		Self {
			base_url: base_url.trim_end_matches('/').to_string(),
			http: Client::new(),
		}
	}

	async fn get<T: DeserializeOwned>(&self, path: &str) -> PortalResult<T> {
		let url = format!("{}{}", self.base_url, path);
		debug!("GET {}", url);
		let response = self.http.get(&url).send().await?;
		if !response.status().is_success() {
			return Err(PortalError::Status {
				status: response.status().as_u16(),
				path: path.to_string(),
			});
		}
		Ok(response.json::<T>().await?)
	}
}

#[async_trait(?Send)]
impl CitizenApi for HttpCitizenApi {
	async fn get_citizen_by_id(&self, citizen_id: &str) -> PortalResult<Profile> {
		self.get(&format!("/api/citizens/{}", citizen_id)).await
	}

	async fn get_applications_by_citizen(
		&self,
		citizen_id: &str,
		page: u32,
		size: u32,
	) -> PortalResult<PagedResult<Application>> {
		self.get(&format!(
			"/api/applications/citizen/{}?page={}&size={}",
			citizen_id, page, size
		))
		.await
	}

	async fn get_scheme_by_id(&self, scheme_id: &str) -> PortalResult<Scheme> {
		self.get(&format!("/api/schemes/{}", scheme_id)).await
	}

	async fn get_family_relationships(
		&self,
		citizen_id: &str,
		depth: u32,
	) -> PortalResult<FamilyGraphData> {
		self.get(&format!("/api/citizens/{}/family?depth={}", citizen_id, depth))
			.await
	}

	async fn get_family_benefits(&self, citizen_id: &str) -> PortalResult<Vec<BenefitAllocation>> {
		self.get(&format!("/api/citizens/{}/family/benefits", citizen_id))
			.await
	}
}
