use leptos::prelude::*;
use log::debug;

use super::force_graph::{ForceGraphCanvas, PinEvent, group_color};
use crate::family::{FamilyGraphData, FamilyMember, PositionCache, RelationshipKind, build_family_graph};
use crate::i18n::{Locale, Msg};

const LEGEND: [RelationshipKind; 6] = [
	RelationshipKind::Myself,
	RelationshipKind::Spouse,
	RelationshipKind::Parent,
	RelationshipKind::Child,
	RelationshipKind::Sibling,
	RelationshipKind::FamilyMember,
];

/// Interactive family graph with pin controls.
///
/// `positions` belongs to the page so pins outlive tab switches; it is read on
/// every recomposition and written by drag-end and right-click.
#[component]
pub fn FamilyGraphPanel(
	#[prop(into)] family: Signal<FamilyGraphData>,
	current_user: FamilyMember,
	positions: RwSignal<PositionCache>,
	#[prop(into)] locale: Signal<Locale>,
) -> impl IntoView {
	let graph = Memo::new(move |_| {
		let locale = locale.get();
		family.with(|family| {
			positions.with(|pins| {
				build_family_graph(
					&family.members,
					&family.relationships,
					&current_user,
					pins,
					locale,
				)
			})
		})
	});

	let on_pin = Callback::new(move |pin: PinEvent| {
		debug!("pinned {} at ({:.1}, {:.1})", pin.id, pin.x, pin.y);
		positions.update(|cache| cache.pin(pin.id, pin.x, pin.y));
	});
	let on_unpin = Callback::new(move |id: String| {
		positions.update(|cache| {
			if cache.unpin(&id) {
				debug!("unpinned {}", id);
			}
		});
	});

	let pinned_count = move || positions.with(PositionCache::len);
	let pinned_names = move || positions.with(|cache| cache.pinned_ids().join(", "));

	view! {
		<div class="family-graph">
			<div class="graph-toolbar">
				<span class="graph-hint">{move || locale.get().text(Msg::GraphHint)}</span>
				<span class="pin-count" title=pinned_names>
					{move || format!("{} {}", pinned_count(), locale.get().text(Msg::Pinned))}
				</span>
				<button
					class="reset-layout"
					disabled=move || positions.with(PositionCache::is_empty)
					on:click=move |_| positions.update(PositionCache::clear)
				>
					{move || locale.get().text(Msg::ResetLayout)}
				</button>
			</div>
			<div class="graph-stage" style="height: 480px;">
				<ForceGraphCanvas data=graph on_pin=on_pin on_unpin=on_unpin />
			</div>
			<ul class="graph-legend">
				{LEGEND
					.into_iter()
					.map(|kind| {
						let swatch = format!("background: {};", group_color(kind.group()));
						view! {
							<li>
								<span class="swatch" style=swatch></span>
								{move || kind.localized(locale.get()).to_string()}
							</li>
						}
					})
					.collect_view()}
			</ul>
		</div>
	}
}
