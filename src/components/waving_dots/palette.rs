//! Palette-driven recoloring of the field.
//!
//! Two entry points: a full repaint used at startup and on theme changes, and
//! a rotating repaint run every frame that re-rolls one bucket of particles.
//!
//! The rotating bucket is `floor(time * rate) mod period`, evaluated once per
//! frame. With the default 0.01 time step a bucket stays current for ten
//! frames, so the same particles are re-rolled on each of those frames. How
//! often a particle changes therefore depends on frame rate, not wall-clock
//! time; a full cycle covers `period / rate` units of simulated time (12 with
//! the defaults).

use rand::Rng;

use super::config::FieldConfig;
use super::field::PointField;
use super::theme::Palette;

/// Bucketing of the rotating recolor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecolorSchedule {
	/// Number of buckets. Particle `i` belongs to bucket `i % period`.
	pub period: u32,
	/// Buckets advanced per unit of simulated time.
	pub rate: f64,
}

impl RecolorSchedule {
	pub fn from_config(config: &FieldConfig) -> Self {
		Self {
			period: config.recolor_period.max(1),
			rate: config.recolor_rate,
		}
	}
}

impl Default for RecolorSchedule {
	fn default() -> Self {
		Self::from_config(&FieldConfig::default())
	}
}

/// Bucket selected at `time`.
pub fn recolor_bucket(time: f64, schedule: RecolorSchedule) -> usize {
	let period = schedule.period.max(1) as i64;
	((time * schedule.rate).floor() as i64).rem_euclid(period) as usize
}

/// Give every particle an independent uniform pick from `palette`.
pub fn full_recolor<R: Rng + ?Sized>(field: &mut PointField, palette: &Palette, rng: &mut R) {
	for color in field.colors_mut() {
		*color = palette.sample(rng);
	}
}

/// Re-roll the particles in the bucket selected by `time`.
///
/// Touches exactly the indices `i` with `i % period == bucket`. Returns how
/// many particles were recolored.
pub fn rotating_recolor<R: Rng + ?Sized>(
	field: &mut PointField,
	palette: &Palette,
	time: f64,
	schedule: RecolorSchedule,
	rng: &mut R,
) -> usize {
	let bucket = recolor_bucket(time, schedule);
	let period = schedule.period.max(1) as usize;
	let mut recolored = 0;
	for color in field.colors_mut().iter_mut().skip(bucket).step_by(period) {
		*color = palette.sample(rng);
		recolored += 1;
	}
	recolored
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::super::theme::Color;
	use super::*;

	fn field(count: usize) -> (PointField, StdRng) {
		let mut rng = StdRng::seed_from_u64(21);
		let field = PointField::new(count, 40.0, &mut rng);
		(field, rng)
	}

	#[test]
	fn full_recolor_uses_only_active_palette() {
		let (mut field, mut rng) = field(15_000);
		let palette = Palette::dark();
		full_recolor(&mut field, &palette, &mut rng);

		assert!(field.colors().iter().all(|&c| palette.contains(c)));
		assert!(field.colors().contains(&palette.colors[0]));
		assert!(field.colors().contains(&palette.colors[1]));
	}

	#[test]
	fn bucket_follows_floor_of_scaled_time() {
		let schedule = RecolorSchedule::default();
		assert_eq!(recolor_bucket(0.0, schedule), 0);
		assert_eq!(recolor_bucket(0.09, schedule), 0);
		assert_eq!(recolor_bucket(0.1, schedule), 1);
		assert_eq!(recolor_bucket(5.55, schedule), 55);
		assert_eq!(recolor_bucket(12.0, schedule), 0);
		assert_eq!(recolor_bucket(12.34, schedule), 3);
	}

	#[test]
	fn rotating_recolor_touches_exactly_one_bucket() {
		let (mut field, mut rng) = field(15_000);
		// Marker color that no palette produces, so every touched index is visible.
		let marker = Color::rgb(1, 2, 3);
		for c in field.colors_mut() {
			*c = marker;
		}
		let positions = field.positions().to_vec();
		let time = 7.43;
		let bucket = recolor_bucket(time, RecolorSchedule::default());
		assert_eq!(bucket, 74);

		let n = rotating_recolor(
			&mut field,
			&Palette::light(),
			time,
			RecolorSchedule::default(),
			&mut rng,
		);

		assert_eq!(n, 125);
		for (i, &c) in field.colors().iter().enumerate() {
			if i % 120 == bucket {
				assert!(Palette::light().contains(c), "index {i} not recolored");
			} else {
				assert_eq!(c, marker, "index {i} recolored out of schedule");
			}
		}
		assert_eq!(field.positions(), positions.as_slice());
	}

	#[test]
	fn bucket_past_field_end_recolors_nothing() {
		let (mut field, mut rng) = field(50);
		let n = rotating_recolor(
			&mut field,
			&Palette::dark(),
			9.0,
			RecolorSchedule::default(),
			&mut rng,
		);
		assert_eq!(n, 0);
		assert!(field.colors().iter().all(|&c| c == Color::BLACK));
	}

	#[test]
	fn zero_period_is_treated_as_one_bucket() {
		let schedule = RecolorSchedule {
			period: 0,
			rate: 10.0,
		};
		assert_eq!(recolor_bucket(3.3, schedule), 0);
		let (mut field, mut rng) = field(10);
		assert_eq!(
			rotating_recolor(&mut field, &Palette::dark(), 3.3, schedule, &mut rng),
			10
		);
	}
}
