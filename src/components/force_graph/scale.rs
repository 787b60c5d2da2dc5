//! Linear value scales for visual encodings.

/// Maps a numeric domain linearly onto an output range, clamping at the ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl LinearScale {
	pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	pub fn apply(&self, value: f64) -> f64 {
		let (d0, d1) = self.domain;
		let (r0, r1) = self.range;
		if (d1 - d0).abs() < f64::EPSILON {
			return r0;
		}
		let t = ((value - d0) / (d1 - d0)).clamp(0.0, 1.0);
		r0 + (r1 - r0) * t
	}
}

/// Link opacity by relationship confidence (0..=100).
pub const CONFIDENCE_ALPHA: LinearScale = LinearScale::new((0.0, 100.0), (0.25, 0.9));

/// Opacity for links without a confidence score.
pub const UNSCORED_ALPHA: f64 = 0.6;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn interpolates_and_clamps() {
		let s = LinearScale::new((0.0, 10.0), (100.0, 200.0));
		assert_eq!(s.apply(5.0), 150.0);
		assert_eq!(s.apply(-1.0), 100.0);
		assert_eq!(s.apply(20.0), 200.0);
	}

	#[test]
	fn degenerate_domain_maps_to_range_start() {
		let s = LinearScale::new((3.0, 3.0), (0.5, 1.0));
		assert_eq!(s.apply(3.0), 0.5);
	}

	#[test]
	fn confidence_alpha_spans_visible_range() {
		assert!((CONFIDENCE_ALPHA.apply(0.0) - 0.25).abs() < 1e-12);
		assert!((CONFIDENCE_ALPHA.apply(100.0) - 0.9).abs() < 1e-12);
	}
}
