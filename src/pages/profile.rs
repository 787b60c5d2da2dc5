use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info};

use crate::api::{BenefitAllocation, HttpCitizenApi, Profile, Scheme};
use crate::components::family_graph::FamilyGraphPanel;
use crate::config::PortalConfig;
use crate::controller::{LoadGeneration, ProfilePageData, ProfileTab, load_profile_page};
use crate::family::PositionCache;
use crate::i18n::{Locale, Msg};
use crate::session::SessionUser;

#[derive(Clone, Debug, PartialEq)]
enum PageState {
	SignedOut,
	Loading,
	Ready(ProfilePageData),
	Failed(String),
}

/// The citizen 360° dashboard.
#[component]
pub fn ProfileDashboard() -> impl IntoView {
	let config = use_context::<PortalConfig>().unwrap_or_default();
	let session =
		use_context::<ReadSignal<Option<SessionUser>>>().unwrap_or_else(|| signal(None).0);
	let locale = use_context::<RwSignal<Locale>>().unwrap_or_else(|| RwSignal::new(Locale::En));

	let page = RwSignal::new(PageState::Loading);
	let tab = RwSignal::new(ProfileTab::default());
	let positions = RwSignal::new(PositionCache::new());
	let api = HttpCitizenApi::new(&config.api_base_url);
	let generation = LoadGeneration::default();

	let generation_cleanup = generation.clone();
	on_cleanup(move || generation_cleanup.invalidate());

	Effect::new(move |_| {
		let Some(user) = session.get() else {
			generation.invalidate();
			page.set(PageState::SignedOut);
			return;
		};
		let ticket = generation.begin();
		page.set(PageState::Loading);
		positions.update(PositionCache::clear);

		let (api, config) = (api.clone(), config.clone());
		spawn_local(async move {
			let result = load_profile_page(&api, &user.citizen_id, &config).await;
			if !ticket.is_current() {
				debug!("dropping stale profile load for {}", user.citizen_id);
				return;
			}
			match result {
				Ok(data) => {
					info!(
						"profile {} loaded: {} schemes, {} family members, {} benefits",
						data.profile.id,
						data.schemes.len(),
						data.family.members.len(),
						data.benefits.len()
					);
					page.set(PageState::Ready(data));
				}
				Err(err) => {
					error!(
						"profile load for {} failed (status {:?}): {}",
						user.citizen_id,
						err.status(),
						err
					);
					page.set(PageState::Failed(err.to_string()));
				}
			}
		});
	});

	view! {
		<div class="profile-dashboard">
			<header class="profile-header">
				<h1>{move || locale.get().text(Msg::Title)}</h1>
				<button class="locale-toggle" on:click=move |_| locale.update(|l| *l = l.toggled())>
					{move || locale.get().text(Msg::SwitchLanguage)}
				</button>
			</header>
			{move || match page.get() {
				PageState::SignedOut => {
					view! {
						<p class="notice">{move || locale.get().text(Msg::SignInRequired)}</p>
					}
						.into_any()
				}
				PageState::Loading => {
					view! { <p class="loading">{move || locale.get().text(Msg::Loading)}</p> }
						.into_any()
				}
				PageState::Failed(message) => {
					view! {
						<div class="error-banner" role="alert">
							<h2>{move || locale.get().text(Msg::LoadFailed)}</h2>
							<p>{message}</p>
						</div>
					}
						.into_any()
				}
				PageState::Ready(data) => {
					view! { <ProfileSections data=data tab=tab positions=positions locale=locale /> }
						.into_any()
				}
			}}
		</div>
	}
}

#[component]
fn ProfileSections(
	data: ProfilePageData,
	tab: RwSignal<ProfileTab>,
	positions: RwSignal<PositionCache>,
	locale: RwSignal<Locale>,
) -> impl IntoView {
	let ProfilePageData {
		profile,
		schemes,
		family,
		benefits,
	} = data;
	let current_user = profile.as_family_member();
	let family = RwSignal::new(family);

	view! {
		<nav class="profile-tabs" role="tablist">
			{ProfileTab::ALL
				.into_iter()
				.map(|t| {
					view! {
						<button
							role="tab"
							data-tab=t.key()
							class:active=move || tab.get() == t
							on:click=move |_| tab.set(t)
						>
							{move || t.title(locale.get())}
						</button>
					}
				})
				.collect_view()}
		</nav>
		{move || match tab.get() {
			ProfileTab::Overview => overview(profile.clone(), schemes.len(), locale).into_any(),
			ProfileTab::Schemes => scheme_list(schemes.clone(), locale).into_any(),
			ProfileTab::Family => {
				view! {
					<FamilyGraphPanel
						family=family
						current_user=current_user.clone()
						positions=positions
						locale=locale
					/>
				}
					.into_any()
			}
			ProfileTab::Benefits => benefit_table(benefits.clone(), locale).into_any(),
		}}
	}
}

fn overview(profile: Profile, scheme_count: usize, locale: RwSignal<Locale>) -> impl IntoView {
	let rows: Vec<(Msg, String)> = [
		(Msg::Age, profile.age.map(|a| a.to_string())),
		(Msg::Gender, profile.gender.map(|g| g.to_string())),
		(Msg::Phone, profile.phone.clone()),
		(Msg::District, profile.district.clone()),
	]
	.into_iter()
	.filter_map(|(msg, value)| value.map(|v| (msg, v)))
	.collect();

	view! {
		<section class="overview">
			<h2>{move || profile.display_name(locale.get()).to_string()}</h2>
			<dl>
				{rows
					.into_iter()
					.map(|(msg, value)| {
						view! {
							<dt>{move || locale.get().text(msg)}</dt>
							<dd>{value}</dd>
						}
					})
					.collect_view()}
			</dl>
			<p class="scheme-count">
				{move || format!("{}: {}", locale.get().text(Msg::Schemes), scheme_count)}
			</p>
		</section>
	}
}

fn scheme_list(schemes: Vec<Scheme>, locale: RwSignal<Locale>) -> impl IntoView {
	if schemes.is_empty() {
		return view! { <p class="empty">{move || locale.get().text(Msg::NoSchemes)}</p> }
			.into_any();
	}
	view! {
		<ul class="scheme-list">
			{schemes
				.into_iter()
				.map(|scheme| {
					let category = scheme.category.clone().unwrap_or_default();
					let description = scheme.description.clone().unwrap_or_default();
					let scheme_id = scheme.id.clone();
					view! {
						<li class="scheme" data-scheme=scheme_id>
							<h3>{move || scheme.display_name(locale.get()).to_string()}</h3>
							<span class="category">{category}</span>
							<p>{description}</p>
						</li>
					}
				})
				.collect_view()}
		</ul>
	}
		.into_any()
}

fn benefit_table(benefits: Vec<BenefitAllocation>, locale: RwSignal<Locale>) -> impl IntoView {
	if benefits.is_empty() {
		return view! { <p class="empty">{move || locale.get().text(Msg::NoBenefits)}</p> }
			.into_any();
	}
	view! {
		<table class="benefits">
			<tbody>
				{benefits
					.into_iter()
					.map(|b| {
						let amount = b.amount.map(|a| format!("₹{:.2}", a)).unwrap_or_default();
						view! {
							<tr>
								<td>{b.scheme_name.unwrap_or_default()}</td>
								<td>{b.benefit_type.unwrap_or_default()}</td>
								<td>{amount}</td>
								<td>{b.status.unwrap_or_default()}</td>
							</tr>
						}
					})
					.collect_view()}
			</tbody>
		</table>
	}
		.into_any()
}
