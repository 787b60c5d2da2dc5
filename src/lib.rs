//! Citizen 360° profile dashboard: Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod api;
mod components;
mod config;
mod controller;
mod error;
mod family;
mod i18n;
mod pages;
mod session;

// Top-Level pages
use crate::config::PortalConfig;
use crate::i18n::Locale;
use crate::pages::not_found::NotFound;
use crate::pages::profile::ProfileDashboard;
use crate::session::restore_session;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the profile dashboard and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let config = PortalConfig::from_env();
	let session = RwSignal::new(restore_session(&config));
	let locale = RwSignal::new(Locale::default());
	info!("portal backend at {}", config.api_base_url);
	provide_context(config);
	provide_context(session.read_only());
	provide_context(locale);

	view! {
		<Html attr:lang=move || locale.get().code() attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Citizen 360° Profile" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=ProfileDashboard />
				<Route path=path!("/profile") view=ProfileDashboard />
			</Routes>
		</Router>
	}
}
