//! The fixed-size point cloud behind the page.

use glam::Vec3;
use rand::Rng;

use super::theme::Color;

/// Axis-aligned bounding box of the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min: Vec3,
	pub max: Vec3,
}

impl Bounds {
	pub fn center(&self) -> Vec3 {
		(self.min + self.max) * 0.5
	}
}

/// Particle positions and colors, stored as parallel arrays.
///
/// The particle count and every x/z coordinate are fixed at construction.
/// Only heights (via [`PointField::heights_mut`]) and colors change afterwards.
pub struct PointField {
	positions: Vec<Vec3>,
	colors: Vec<Color>,
	plane_size: f32,
}

impl PointField {
	/// Scatter `count` particles uniformly over a `plane_size` square centered
	/// at the origin. Heights start at zero and colors at black until a palette
	/// is applied.
	pub fn new<R: Rng + ?Sized>(count: usize, plane_size: f32, rng: &mut R) -> Self {
		let half = plane_size / 2.0;
		let positions = (0..count)
			.map(|_| {
				Vec3::new(
					sample_axis(rng, half),
					0.0,
					sample_axis(rng, half),
				)
			})
			.collect();

		Self {
			positions,
			colors: vec![Color::BLACK; count],
			plane_size,
		}
	}

	pub fn len(&self) -> usize {
		self.positions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	pub fn plane_size(&self) -> f32 {
		self.plane_size
	}

	pub fn positions(&self) -> &[Vec3] {
		&self.positions
	}

	pub fn colors(&self) -> &[Color] {
		&self.colors
	}

	pub fn colors_mut(&mut self) -> &mut [Color] {
		&mut self.colors
	}

	/// Visit every particle's fixed `(x, z)` alongside a mutable height.
	pub fn heights_mut(&mut self) -> impl Iterator<Item = (f32, f32, &mut f32)> {
		self.positions.iter_mut().map(|p| (p.x, p.z, &mut p.y))
	}

	/// Bounding box over all positions, `None` for an empty field.
	pub fn bounds(&self) -> Option<Bounds> {
		let first = *self.positions.first()?;
		let (min, max) = self
			.positions
			.iter()
			.fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
		Some(Bounds { min, max })
	}
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
	if half > 0.0 {
		rng.random_range(-half..=half)
	} else {
		0.0
	}
}
