//! Data orchestration for the profile dashboard.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::join_all;
use log::{debug, warn};

use crate::api::{Application, BenefitAllocation, CitizenApi, PagedResult, Profile, Scheme};
use crate::config::PortalConfig;
use crate::error::PortalResult;
use crate::family::FamilyGraphData;
use crate::i18n::{Locale, Msg};

/// Everything the dashboard renders for one citizen.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfilePageData {
	pub profile: Profile,
	pub schemes: Vec<Scheme>,
	pub family: FamilyGraphData,
	pub benefits: Vec<BenefitAllocation>,
}

/// Loads the dashboard's four sources concurrently.
///
/// Only the profile is required; its failure is returned. Schemes, family
/// graph, and benefits degrade to empty (or a single-node graph) and are
/// logged instead.
pub async fn load_profile_page<A: CitizenApi + ?Sized>(
	api: &A,
	citizen_id: &str,
	config: &PortalConfig,
) -> PortalResult<ProfilePageData> {
	let (profile, schemes, family, benefits) = futures::join!(
		api.get_citizen_by_id(citizen_id),
		load_enrolled_schemes(api, citizen_id, config.application_page_size),
		load_family_graph(api, citizen_id, config.family_graph_depth),
		load_benefits(api, citizen_id),
	);

	let profile = profile?;
	let family = family.unwrap_or_else(|| FamilyGraphData::single(profile.as_family_member()));

	Ok(ProfilePageData {
		profile,
		schemes,
		family,
		benefits,
	})
}

/// Every application of the citizen, page by page.
///
/// Stops once `total_elements` are collected or a page comes back empty. A
/// failed page ends the walk and keeps what earlier pages returned.
async fn load_applications<A: CitizenApi + ?Sized>(
	api: &A,
	citizen_id: &str,
	page_size: u32,
) -> Vec<Application> {
	let mut applications = Vec::new();
	let mut page = 0;
	loop {
		let batch: PagedResult<Application> =
			match api.get_applications_by_citizen(citizen_id, page, page_size).await {
				Ok(batch) => batch,
				Err(err) => {
					warn!(
						"applications page {} for {} unavailable: {}",
						page, citizen_id, err
					);
					break;
				}
			};
		let total = batch.total_elements;
		let received = batch.content.len();
		applications.extend(batch.content);
		if received == 0 || applications.len() as u64 >= total {
			debug!(
				"{} of {} applications fetched for {} in {} pages",
				applications.len(),
				total,
				citizen_id,
				page + 1
			);
			break;
		}
		page += 1;
	}
	applications
}

/// Schemes referenced by the citizen's applications, in first-seen order.
async fn load_enrolled_schemes<A: CitizenApi + ?Sized>(
	api: &A,
	citizen_id: &str,
	page_size: u32,
) -> Vec<Scheme> {
	let applications = load_applications(api, citizen_id, page_size).await;
	if applications.is_empty() {
		return Vec::new();
	}

	let mut seen = HashSet::new();
	let scheme_ids: Vec<String> = applications
		.into_iter()
		.map(|app| app.scheme_id)
		.filter(|id| seen.insert(id.clone()))
		.collect();

	let lookups = scheme_ids.iter().map(|id| api.get_scheme_by_id(id));
	join_all(lookups)
		.await
		.into_iter()
		.zip(&scheme_ids)
		.filter_map(|(result, id)| match result {
			Ok(scheme) => Some(scheme),
			Err(err) => {
				warn!("scheme {} skipped: {}", id, err);
				None
			}
		})
		.collect()
}

/// `None` when the backend errors or knows no members.
async fn load_family_graph<A: CitizenApi + ?Sized>(
	api: &A,
	citizen_id: &str,
	depth: u32,
) -> Option<FamilyGraphData> {
	match api.get_family_relationships(citizen_id, depth).await {
		Ok(graph) if graph.members.is_empty() => {
			debug!("family graph for {} is empty", citizen_id);
			None
		}
		Ok(graph) => Some(graph),
		Err(err) => {
			warn!("family graph for {} unavailable: {}", citizen_id, err);
			None
		}
	}
}

async fn load_benefits<A: CitizenApi + ?Sized>(api: &A, citizen_id: &str) -> Vec<BenefitAllocation> {
	api.get_family_benefits(citizen_id)
		.await
		.unwrap_or_else(|err| {
			warn!("benefit allocations for {} unavailable: {}", citizen_id, err);
			Vec::new()
		})
}

/// Monotonic load counter; results carrying an outdated ticket are dropped.
#[derive(Clone, Debug, Default)]
pub struct LoadGeneration(Arc<AtomicU64>);

/// Proof that a load was started at a particular generation.
#[derive(Clone, Debug)]
pub struct LoadTicket {
	counter: Arc<AtomicU64>,
	generation: u64,
}

impl LoadGeneration {
	/// Starts a load, superseding every earlier ticket.
	pub fn begin(&self) -> LoadTicket {
		let generation = self.0.fetch_add(1, Ordering::SeqCst) + 1;
		LoadTicket {
			counter: self.0.clone(),
			generation,
		}
	}

	/// Supersedes all outstanding tickets without starting a load.
	pub fn invalidate(&self) {
		self.0.fetch_add(1, Ordering::SeqCst);
	}
}

impl LoadTicket {
	pub fn is_current(&self) -> bool {
		self.counter.load(Ordering::SeqCst) == self.generation
	}
}

/// Dashboard sections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProfileTab {
	#[default]
	Overview,
	Schemes,
	Family,
	Benefits,
}

impl ProfileTab {
	pub const ALL: [Self; 4] = [Self::Overview, Self::Schemes, Self::Family, Self::Benefits];

	pub fn key(self) -> &'static str {
		match self {
			Self::Overview => "overview",
			Self::Schemes => "schemes",
			Self::Family => "family",
			Self::Benefits => "benefits",
		}
	}

	pub fn title(self, locale: Locale) -> &'static str {
		locale.text(match self {
			Self::Overview => Msg::Overview,
			Self::Schemes => Msg::Schemes,
			Self::Family => Msg::Family,
			Self::Benefits => Msg::Benefits,
		})
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::collections::HashMap;

	use async_trait::async_trait;

	use super::*;
	use crate::error::PortalError;
	use crate::family::{FamilyMember, RelationshipKind};

	fn server_error(path: &str) -> PortalError {
		PortalError::Status {
			status: 500,
			path: path.into(),
		}
	}

	#[derive(Default)]
	struct FakeApi {
		profile: Option<Profile>,
		applications: Option<Vec<Application>>,
		schemes: HashMap<String, Scheme>,
		family: Option<FamilyGraphData>,
		benefits: Option<Vec<BenefitAllocation>>,
		scheme_calls: RefCell<Vec<String>>,
		pages_requested: RefCell<Vec<u32>>,
		/// Pages at or past this index fail.
		failing_page: Option<u32>,
		depth_seen: RefCell<Option<u32>>,
	}

	#[async_trait(?Send)]
	impl CitizenApi for FakeApi {
		async fn get_citizen_by_id(&self, _citizen_id: &str) -> PortalResult<Profile> {
			self.profile.clone().ok_or_else(|| server_error("/citizens"))
		}

		async fn get_applications_by_citizen(
			&self,
			_citizen_id: &str,
			page: u32,
			size: u32,
		) -> PortalResult<PagedResult<Application>> {
			self.pages_requested.borrow_mut().push(page);
			if self.failing_page.is_some_and(|failing| page >= failing) {
				return Err(server_error("/applications"));
			}
			let all = self.applications.as_ref().ok_or_else(|| server_error("/applications"))?;
			let start = (page as usize).saturating_mul(size as usize).min(all.len());
			let end = start.saturating_add(size as usize).min(all.len());
			Ok(PagedResult {
				total_elements: all.len() as u64,
				content: all[start..end].to_vec(),
			})
		}

		async fn get_scheme_by_id(&self, scheme_id: &str) -> PortalResult<Scheme> {
			self.scheme_calls.borrow_mut().push(scheme_id.to_string());
			self.schemes
				.get(scheme_id)
				.cloned()
				.ok_or_else(|| server_error("/schemes"))
		}

		async fn get_family_relationships(&self, _citizen_id: &str, depth: u32) -> PortalResult<FamilyGraphData> {
			*self.depth_seen.borrow_mut() = Some(depth);
			self.family.clone().ok_or_else(|| server_error("/family"))
		}

		async fn get_family_benefits(&self, _citizen_id: &str) -> PortalResult<Vec<BenefitAllocation>> {
			self.benefits.clone().ok_or_else(|| server_error("/benefits"))
		}
	}

	fn profile() -> Profile {
		Profile {
			id: "c1".into(),
			full_name: "Ravi Kumar".into(),
			full_name_local: None,
			age: Some(41),
			gender: None,
			phone: None,
			district: Some("Pune".into()),
		}
	}

	fn scheme(id: &str) -> Scheme {
		Scheme {
			id: id.into(),
			name: format!("Scheme {id}"),
			name_local: None,
			category: None,
			description: None,
		}
	}

	fn application(scheme_id: &str) -> Application {
		Application {
			scheme_id: scheme_id.into(),
		}
	}

	fn spouse() -> FamilyMember {
		FamilyMember {
			id: "c2".into(),
			name: "Meena".into(),
			name_local: None,
			age: None,
			gender: None,
			relationship: RelationshipKind::Spouse,
			confidence: None,
		}
	}

	fn healthy_api() -> FakeApi {
		FakeApi {
			profile: Some(profile()),
			applications: Some(vec![application("s1"), application("s2")]),
			schemes: [("s1".to_string(), scheme("s1")), ("s2".to_string(), scheme("s2"))].into(),
			family: Some(FamilyGraphData {
				members: vec![profile().as_family_member(), spouse()],
				relationships: serde_json::from_str(
					r#"[{"from": "c1", "to": "c2", "relationship": "Spouse"}]"#,
				)
				.unwrap(),
			}),
			benefits: Some(Vec::new()),
			..Default::default()
		}
	}

	fn load(api: &FakeApi) -> PortalResult<ProfilePageData> {
		pollster::block_on(load_profile_page(api, "c1", &PortalConfig::default()))
	}

	#[test]
	fn loads_every_section() {
		let api = healthy_api();
		let data = load(&api).unwrap();
		assert_eq!(data.profile.id, "c1");
		assert_eq!(data.schemes.len(), 2);
		assert_eq!(data.family.members.len(), 2);
		assert_eq!(*api.depth_seen.borrow(), Some(2));
	}

	#[test]
	fn profile_failure_is_fatal() {
		let api = FakeApi {
			profile: None,
			..healthy_api()
		};
		let err = load(&api).unwrap_err();
		assert_eq!(err.status(), Some(500));
	}

	#[test]
	fn benefit_failure_is_silent() {
		let api = FakeApi {
			benefits: None,
			..healthy_api()
		};
		let data = load(&api).unwrap();
		assert!(data.benefits.is_empty());
		assert_eq!(data.schemes.len(), 2);
		assert_eq!(data.family.relationships.len(), 1);
	}

	#[test]
	fn scheme_ids_are_fetched_once_each_and_failures_dropped() {
		let api = FakeApi {
			applications: Some(vec![
				application("s2"),
				application("s1"),
				application("s2"),
				application("gone"),
			]),
			..healthy_api()
		};
		let data = load(&api).unwrap();
		let ids: Vec<&str> = data.schemes.iter().map(|s| s.id.as_str()).collect();
		assert_eq!(ids, vec!["s2", "s1"]);
		assert_eq!(*api.scheme_calls.borrow(), vec!["s2", "s1", "gone"]);
	}

	#[test]
	fn every_application_page_is_read() {
		let applications: Vec<Application> = (0..150).map(|i| application(&format!("s{i}"))).collect();
		let api = FakeApi {
			applications: Some(applications),
			schemes: (0..150)
				.map(|i| (format!("s{i}"), scheme(&format!("s{i}"))))
				.collect(),
			..healthy_api()
		};
		let data = load(&api).unwrap();
		assert_eq!(*api.pages_requested.borrow(), vec![0, 1]);
		assert_eq!(data.schemes.len(), 150);
		assert_eq!(data.schemes[149].id, "s149");
	}

	#[test]
	fn failed_later_page_keeps_earlier_applications() {
		let api = FakeApi {
			applications: Some((0..150).map(|i| application(&format!("s{}", i % 2 + 1))).collect()),
			failing_page: Some(1),
			..healthy_api()
		};
		let data = load(&api).unwrap();
		assert_eq!(*api.pages_requested.borrow(), vec![0, 1]);
		let ids: Vec<&str> = data.schemes.iter().map(|s| s.id.as_str()).collect();
		assert_eq!(ids, vec!["s1", "s2"]);
	}

	#[test]
	fn application_failure_leaves_schemes_empty() {
		let api = FakeApi {
			applications: None,
			..healthy_api()
		};
		let data = load(&api).unwrap();
		assert!(data.schemes.is_empty());
		assert!(api.scheme_calls.borrow().is_empty());
	}

	#[test]
	fn family_failure_falls_back_to_self_only() {
		let api = FakeApi {
			family: None,
			..healthy_api()
		};
		let data = load(&api).unwrap();
		assert_eq!(data.family.members.len(), 1);
		assert_eq!(data.family.members[0].id, "c1");
		assert_eq!(data.family.members[0].relationship, RelationshipKind::Myself);
		assert!(data.family.relationships.is_empty());
	}

	#[test]
	fn empty_family_falls_back_to_self_only() {
		let api = FakeApi {
			family: Some(FamilyGraphData::default()),
			..healthy_api()
		};
		let data = load(&api).unwrap();
		assert_eq!(data.family, FamilyGraphData::single(profile().as_family_member()));
	}

	#[test]
	fn newer_load_supersedes_older_ticket() {
		let generation = LoadGeneration::default();
		let first = generation.begin();
		assert!(first.is_current());
		let second = generation.begin();
		assert!(!first.is_current());
		assert!(second.is_current());
		generation.invalidate();
		assert!(!second.is_current());
	}

	#[test]
	fn tab_titles_follow_locale() {
		assert_eq!(ProfileTab::Family.title(Locale::En), "Family");
		assert_eq!(ProfileTab::Family.title(Locale::Hi), "परिवार");
		assert_eq!(ProfileTab::ALL.len(), 4);
		assert_eq!(ProfileTab::default().key(), "overview");
	}
}
