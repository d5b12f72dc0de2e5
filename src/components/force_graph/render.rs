use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::geometry::{LinkCurve, fit_font_size, label_angle, label_box};
use super::state::{ForceGraphState, LinkInfo};

const BACKGROUND: &str = "#ffffff";
const LINK_COLOR: &str = "rgba(0, 0, 0, 0.2)";
const NODE_COLOR: &str = "rgba(31, 120, 180, 0.92)";
const NODE_HIGHLIGHT: &str = "darkorange";
const TEXT_COLOR: &str = "darkgrey";
const LABEL_BACKGROUND: &str = "rgba(255, 255, 255, 0.8)";

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	draw_link_labels(state, ctx);
	ctx.restore();
	draw_tooltip(state, ctx);
}

fn link_curve(state: &ForceGraphState, link: &LinkInfo) -> Option<LinkCurve> {
	let start = state.position(link.source)?;
	let end = state.position(link.target)?;
	Some(LinkCurve::new(start, end, link.curvature))
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let cfg = &state.config;
	ctx.set_stroke_style_str(LINK_COLOR);
	ctx.set_fill_style_str(LINK_COLOR);
	ctx.set_line_width(1.0 / state.transform.k);

	for link in &state.links {
		let Some(curve) = link_curve(state, link) else {
			continue;
		};

		ctx.begin_path();
		match curve {
			LinkCurve::Line { start, end } => {
				ctx.move_to(start.0, start.1);
				ctx.line_to(end.0, end.1);
			}
			LinkCurve::Quadratic {
				start,
				control,
				end,
			} => {
				ctx.move_to(start.0, start.1);
				ctx.quadratic_curve_to(control.0, control.1, end.0, end.1);
			}
			LinkCurve::Cubic { start, c1, c2, end } => {
				ctx.move_to(start.0, start.1);
				ctx.bezier_curve_to(c1.0, c1.1, c2.0, c2.1, end.0, end.1);
			}
		}
		ctx.stroke();

		if cfg.arrow_length > 0.0 {
			draw_arrow(state, ctx, &curve);
		}

		let particle_width = if link.highlighted {
			cfg.highlight_particle_width
		} else {
			0.0
		};
		if particle_width > 0.0 {
			for i in 0..cfg.particles {
				let t = (state.particle_t + i as f64 / cfg.particles as f64).fract();
				let (x, y) = curve.point_at(t);
				ctx.begin_path();
				let _ = ctx.arc(x, y, particle_width / 2.0, 0.0, 2.0 * PI);
				ctx.fill();
			}
		}
	}
}

fn draw_arrow(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, curve: &LinkCurve) {
	let cfg = &state.config;
	let len = cfg.arrow_length;
	// at the tip the arrow stops at the node boundary
	let inset = cfg.node_radius * cfg.arrow_rel_pos;
	let (tip, (ux, uy)) = curve.anchor_at(cfg.arrow_rel_pos, inset);
	let (back_x, back_y) = (tip.0 - ux * len, tip.1 - uy * len);
	let (px, py) = (-uy * len * 0.4, ux * len * 0.4);
	ctx.begin_path();
	ctx.move_to(tip.0, tip.1);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x + ux * len * 0.2, back_y + uy * len * 0.2);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let cfg = &state.config;
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;

		ctx.begin_path();
		let _ = ctx.arc(x, y, cfg.node_radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(if info.highlighted {
			NODE_HIGHLIGHT
		} else {
			NODE_COLOR
		});
		ctx.fill();

		if info.label.is_empty() {
			return;
		}
		ctx.set_font("1px Sans-Serif");
		let Ok(metrics) = ctx.measure_text(&info.label) else {
			return;
		};
		let font_size = fit_font_size(
			cfg.node_label_max_font,
			cfg.node_label_max_width,
			metrics.width(),
		);
		ctx.set_font(&format!("{font_size}px Sans-Serif"));
		ctx.set_fill_style_str(TEXT_COLOR);
		let _ = ctx.fill_text(&info.label, x, y);
	});
}

fn draw_link_labels(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let cfg = &state.config;
	let margin = cfg.label_node_margin();
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for link in &state.links {
		if link.label.is_empty() {
			continue;
		}
		// unbound until the simulation has placed both ends
		let (Some(start), Some(end)) = (state.position(link.source), state.position(link.target))
		else {
			continue;
		};

		let (dx, dy) = (end.0 - start.0, end.1 - start.1);
		let (mid_x, mid_y) = (start.0 + dx / 2.0, start.1 + dy / 2.0);
		let max_text_length = (dx * dx + dy * dy).sqrt() - margin * 2.0;

		ctx.set_font("1px Sans-Serif");
		let Ok(metrics) = ctx.measure_text(&link.label) else {
			continue;
		};
		let font_size = fit_font_size(cfg.link_label_max_font, max_text_length, metrics.width());
		if font_size.is_nan() || font_size <= 0.0 {
			continue;
		}
		ctx.set_font(&format!("{font_size}px Sans-Serif"));
		let text_width = ctx
			.measure_text(&link.label)
			.map(|m| m.width())
			.unwrap_or(0.0);
		let (bw, bh) = label_box(text_width, font_size);

		ctx.save();
		let _ = ctx.translate(mid_x, mid_y);
		let _ = ctx.rotate(label_angle(dx, dy));
		ctx.set_fill_style_str(LABEL_BACKGROUND);
		ctx.fill_rect(-bw / 2.0, -bh / 2.0, bw, bh);
		ctx.set_fill_style_str(TEXT_COLOR);
		let _ = ctx.fill_text(&link.label, 0.0, 0.0);
		ctx.restore();
	}
}

fn draw_tooltip(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	if state.drag.active {
		return;
	}
	let Some(label) = state.hovered_label() else {
		return;
	};
	let (px, py) = state.hover.pointer;
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("left");
	ctx.set_text_baseline("top");
	let width = ctx.measure_text(label).map(|m| m.width()).unwrap_or(0.0);
	let (x, y) = (px + 12.0, py + 12.0);
	ctx.set_fill_style_str("rgba(0, 0, 0, 0.75)");
	ctx.fill_rect(x, y, width + 8.0, 20.0);
	ctx.set_fill_style_str("white");
	let _ = ctx.fill_text(label, x + 4.0, y + 4.0);
}
