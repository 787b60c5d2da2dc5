use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{CONFIDENCE_ALPHA, UNSCORED_ALPHA};
use super::state::{ForceGraphState, LinkInfo};

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

fn link_alpha(link: &LinkInfo) -> f64 {
	link.confidence
		.map(|c| CONFIDENCE_ALPHA.apply(c.value() as f64))
		.unwrap_or(UNSCORED_ALPHA)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);
	let positions = state.node_positions();

	for link in &state.links {
		let (Some(&(x1, y1, r1)), Some(&(x2, y2, r2))) =
			(positions.get(&link.source), positions.get(&link.target))
		else {
			continue;
		};

		let is_highlighted =
			state.is_highlighted(link.source) && state.is_highlighted(link.target);
		let base = link_alpha(link);

		// t=0: all links at their confidence alpha, t=1: highlighted brighten, others fade
		let (edge_alpha, width) = if is_highlighted {
			(base + (1.0 - base) * 0.5 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(base * (1.0 - 0.75 * t), line_width * (1.0 - 0.3 * t))
		};
		let stroke = format!("rgba(100, 180, 255, {})", edge_alpha);
		ctx.set_stroke_style_str(&stroke);
		ctx.set_line_width(width);

		if link.is_loop() {
			ctx.begin_path();
			let _ = ctx.arc(x1, y1 - r1 * 1.8, r1, 0.0, 2.0 * PI);
			ctx.stroke();
			continue;
		}

		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + arrow_size), y2 - uy * (r2 + arrow_size));
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&stroke);
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if is_highlighted && t > 0.01 {
			ctx.set_fill_style_str(&format!("rgba(220, 235, 255, {})", t));
			ctx.set_font(&format!("{}px sans-serif", 9.0 / k.max(0.5)));
			let _ = ctx.fill_text(&link.label, (x1 + x2) / 2.0 + 3.0, (y1 + y2) / 2.0 - 3.0);
		}
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_pin_marker(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, k: f64) {
	let size = 3.0 / k.max(0.5);
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(x + radius * 0.7, y - radius * 0.7 - size, size, size);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (alpha, radius) = (1.0 - 0.7 * t, info.radius() * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();
		if info.is_current_user {
			ctx.set_stroke_style_str("#ffffff");
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}
		if node.data.is_anchor {
			draw_pin_marker(ctx, x, y, radius, k);
		}
		ctx.set_global_alpha(1.0);

		ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.8));
		ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
		let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 3.0);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let base = info.radius();
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(base * (1.0 + 0.35 * t), base * (1.8 + 1.2 * t))
		} else if is_neighbor {
			(base * (1.0 + 0.2 * t), base * (1.4 + 0.6 * t))
		} else {
			(base, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ = gradient
					.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		if (is_hovered && t > 0.01) || info.is_current_user {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			let ring = if is_hovered { 0.7 * t } else { 1.0 };
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", ring));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}
		if node.data.is_anchor {
			draw_pin_marker(ctx, x, y, radius, k);
		}

		ctx.set_fill_style_str("white");
		ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
		let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 3.0);

		if is_hovered && t > 0.01 {
			ctx.set_fill_style_str(&format!("rgba(200, 220, 255, {})", 0.9 * t));
			ctx.set_font(&format!("{}px sans-serif", 8.0 / k.max(0.5)));
			let _ = ctx.fill_text(&info.detail, x + radius + 3.0, y + 3.0 + 11.0 / k.max(0.5));
		}
	});
}
