use std::f64::consts::{FRAC_PI_2, PI};

/// Control distance of a self-loop at curvature 1.
const LOOP_SIZE: f64 = 70.0;

/// The path a link is drawn along.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LinkCurve {
	Line {
		start: (f64, f64),
		end: (f64, f64),
	},
	Quadratic {
		start: (f64, f64),
		control: (f64, f64),
		end: (f64, f64),
	},
	Cubic {
		start: (f64, f64),
		c1: (f64, f64),
		c2: (f64, f64),
		end: (f64, f64),
	},
}

impl LinkCurve {
	pub fn new(start: (f64, f64), end: (f64, f64), curvature: f64) -> Self {
		if curvature == 0.0 {
			return LinkCurve::Line { start, end };
		}
		let (dx, dy) = (end.0 - start.0, end.1 - start.1);
		let length = (dx * dx + dy * dy).sqrt();
		if length > 0.0 {
			let angle = dy.atan2(dx) - FRAC_PI_2;
			let d = length * curvature;
			let control = (
				(start.0 + end.0) / 2.0 + d * angle.cos(),
				(start.1 + end.1) / 2.0 + d * angle.sin(),
			);
			LinkCurve::Quadratic {
				start,
				control,
				end,
			}
		} else {
			let d = curvature * LOOP_SIZE;
			LinkCurve::Cubic {
				start,
				c1: (end.0, end.1 - d),
				c2: (end.0 + d, end.1),
				end,
			}
		}
	}

	pub fn point_at(&self, t: f64) -> (f64, f64) {
		let u = 1.0 - t;
		match *self {
			LinkCurve::Line { start, end } => (lerp(start.0, end.0, t), lerp(start.1, end.1, t)),
			LinkCurve::Quadratic {
				start,
				control,
				end,
			} => (
				u * u * start.0 + 2.0 * u * t * control.0 + t * t * end.0,
				u * u * start.1 + 2.0 * u * t * control.1 + t * t * end.1,
			),
			LinkCurve::Cubic { start, c1, c2, end } => {
				let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
				(
					a * start.0 + b * c1.0 + c * c2.0 + d * end.0,
					a * start.1 + b * c1.1 + c * c2.1 + d * end.1,
				)
			}
		}
	}

	/// Unnormalized derivative at `t`.
	pub fn tangent_at(&self, t: f64) -> (f64, f64) {
		let u = 1.0 - t;
		match *self {
			LinkCurve::Line { start, end } => (end.0 - start.0, end.1 - start.1),
			LinkCurve::Quadratic {
				start,
				control,
				end,
			} => (
				2.0 * u * (control.0 - start.0) + 2.0 * t * (end.0 - control.0),
				2.0 * u * (control.1 - start.1) + 2.0 * t * (end.1 - control.1),
			),
			LinkCurve::Cubic { start, c1, c2, end } => (
				3.0 * u * u * (c1.0 - start.0) + 6.0 * u * t * (c2.0 - c1.0) + 3.0 * t * t * (end.0 - c2.0),
				3.0 * u * u * (c1.1 - start.1) + 6.0 * u * t * (c2.1 - c1.1) + 3.0 * t * t * (end.1 - c2.1),
			),
		}
	}

	/// Point `offset` world units back along the tangent from `t`, with the unit direction.
	pub fn anchor_at(&self, t: f64, offset: f64) -> ((f64, f64), (f64, f64)) {
		let (x, y) = self.point_at(t);
		let (tx, ty) = self.tangent_at(t);
		let len = (tx * tx + ty * ty).sqrt();
		if len < 1e-9 {
			return ((x, y), (1.0, 0.0));
		}
		let (ux, uy) = (tx / len, ty / len);
		((x - ux * offset, y - uy * offset), (ux, uy))
	}
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
	a + (b - a) * t
}

/// Rotation for text laid along `(dx, dy)`, kept within [-π/2, π/2] so it is never upside-down.
pub fn label_angle(dx: f64, dy: f64) -> f64 {
	let angle = dy.atan2(dx);
	if angle > FRAC_PI_2 {
		-(PI - angle)
	} else if angle < -FRAC_PI_2 {
		-(-PI - angle)
	} else {
		angle
	}
}

/// Font size that makes text measured at 1px fit `available`, capped at `max`.
pub fn fit_font_size(max: f64, available: f64, width_at_1px: f64) -> f64 {
	if width_at_1px <= 0.0 {
		return max;
	}
	max.min(available / width_at_1px)
}

/// Background box around a label: text extent plus 20% of the font size.
pub fn label_box(text_width: f64, font_size: f64) -> (f64, f64) {
	let pad = font_size * 0.2;
	(text_width + pad, font_size + pad)
}
