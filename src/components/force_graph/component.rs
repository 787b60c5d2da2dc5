use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::ForceGraphState;
use super::types::{GraphData, PinEvent};

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

/// Empties both slots of a finished animation loop, breaking the cycle between
/// the frame callback and the cell that holds it. The callback is handed back
/// because it cannot be dropped while it is running.
fn stop_loop<F>(state: &RefCell<Option<ForceGraphState>>, frame: &RefCell<Option<F>>) -> Option<F> {
	state.borrow_mut().take();
	frame.borrow_mut().take()
}

/// Pointer position relative to the canvas' top-left corner.
fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed graph on a canvas.
///
/// Nodes carrying fixed coordinates start anchored. Dropping a dragged node
/// reports it through `on_pin`; right-clicking a node frees it and reports it
/// through `on_unpin`. New `data` is applied in place, so nodes keep their
/// positions across label or membership changes.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional, into)] on_pin: Option<Callback<PinEvent>>,
	#[prop(optional, into)] on_unpin: Option<Callback<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));
	let (state_init, animate_init, alive_init) = (state.clone(), animate.clone(), alive.clone());

	on_cleanup(move || alive.store(false, Ordering::Relaxed));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = canvas
			.parent_element()
			.map(|p| (p.client_width() as f64, p.client_height() as f64))
			.filter(|&(w, h)| w > 0.0 && h > 0.0)
			.unwrap_or(FALLBACK_SIZE);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			return;
		};
		*state_init.borrow_mut() = Some(ForceGraphState::new(&data.get_untracked(), w, h));

		let (state_anim, animate_inner, alive_anim) =
			(state_init.clone(), animate_init.clone(), alive_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				debug!("graph canvas unmounted, stopping animation");
				if let Some(frame) = stop_loop(&state_anim, &animate_inner) {
					spawn_local(async move { drop(frame) });
				}
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_data = state.clone();
	Effect::new(move |_| {
		let graph = data.get();
		if let Some(ref mut s) = *state_data.borrow_mut() {
			s.rebuild(&graph);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		// Only the primary button drags; right-click is handled by `contextmenu`.
		if ev.button() != 0 {
			return;
		}
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.move_pointer(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let pinned = state_mu.borrow_mut().as_mut().and_then(|s| s.release());
		if let (Some(pin), Some(cb)) = (pinned, on_pin) {
			cb.run(pin);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let pinned = state_ml.borrow_mut().as_mut().and_then(|s| s.leave());
		if let (Some(pin), Some(cb)) = (pinned, on_pin) {
			cb.run(pin);
		}
	};

	let state_cm = state.clone();
	let on_contextmenu = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let released = state_cm
			.borrow_mut()
			.as_mut()
			.and_then(|s| s.release_anchor_at(x, y));
		if let Some(id) = released {
			ev.prevent_default();
			if let Some(cb) = on_unpin {
				cb.run(id);
			}
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:contextmenu=on_contextmenu
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
