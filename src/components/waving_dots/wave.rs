//! Height function driving the vertical motion of the field.

use super::config::FieldConfig;
use super::field::PointField;

/// Shape of the two-term travelling wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
	pub amplitude: f64,
	pub frequency: f64,
}

impl WaveParams {
	pub fn from_config(config: &FieldConfig) -> Self {
		Self {
			amplitude: config.wave_amplitude,
			frequency: config.wave_frequency,
		}
	}
}

impl Default for WaveParams {
	fn default() -> Self {
		Self::from_config(&FieldConfig::default())
	}
}

/// Height of the surface at `(x, z)` after `time` units of simulated time.
///
/// The z term runs at 0.7 of the spatial frequency and 0.8 of the temporal
/// rate so the two ripples drift against each other.
pub fn wave_height(x: f64, z: f64, time: f64, params: WaveParams) -> f64 {
	let half = params.amplitude * 0.5;
	(x * params.frequency + time).sin() * half
		+ (z * params.frequency * 0.7 + time * 0.8).cos() * half
}

/// Recompute every particle's height. x and z are read, never written.
pub fn update_heights(field: &mut PointField, params: WaveParams, time: f64) {
	for (x, z, y) in field.heights_mut() {
		*y = wave_height(x as f64, z as f64, time, params) as f32;
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	#[test]
	fn heights_follow_closed_form_at_time_zero() {
		let mut field = PointField::new(15_000, 40.0, &mut StdRng::seed_from_u64(11));
		update_heights(&mut field, WaveParams::default(), 0.0);

		for p in field.positions() {
			let expected = (p.x as f64 * 0.2).sin() + (p.z as f64 * 0.14).cos();
			assert!((p.y as f64 - expected).abs() < 1e-5, "{p:?}");
		}
	}

	#[test]
	fn update_is_bit_for_bit_reproducible() {
		let mut a = PointField::new(500, 40.0, &mut StdRng::seed_from_u64(5));
		let mut b = PointField::new(500, 40.0, &mut StdRng::seed_from_u64(5));
		update_heights(&mut a, WaveParams::default(), 3.27);
		update_heights(&mut b, WaveParams::default(), 3.27);

		for (pa, pb) in a.positions().iter().zip(b.positions()) {
			assert_eq!(pa.y.to_bits(), pb.y.to_bits());
		}
	}

	#[test]
	fn horizontal_coordinates_never_move() {
		let mut field = PointField::new(300, 40.0, &mut StdRng::seed_from_u64(2));
		let before: Vec<(f32, f32)> = field.positions().iter().map(|p| (p.x, p.z)).collect();

		for frame in 0..50 {
			update_heights(&mut field, WaveParams::default(), frame as f64 * 0.01);
		}

		let after: Vec<(f32, f32)> = field.positions().iter().map(|p| (p.x, p.z)).collect();
		assert_eq!(before, after);
	}

	#[test]
	fn height_stays_within_amplitude() {
		let params = WaveParams::default();
		for i in 0..100 {
			let t = i as f64 * 0.37;
			let y = wave_height(i as f64 - 50.0, 20.0 - i as f64, t, params);
			assert!(y.abs() <= params.amplitude + 1e-12);
		}
	}

	#[test]
	fn origin_at_time_zero_is_half_amplitude() {
		// sin(0) contributes nothing, cos(0) contributes the full half amplitude.
		assert_eq!(wave_height(0.0, 0.0, 0.0, WaveParams::default()), 1.0);
	}
}
