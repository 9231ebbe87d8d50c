//! Pointer-driven camera parallax.
//!
//! Input handlers only record a pointer offset. Once per frame [`CameraRig::step`]
//! eases the rotation toward the target derived from that offset, and
//! [`CameraRig::look_at`] re-aims at the field's bounding-box center. The
//! rotation orbits the eye around the look-at point, so the field stays
//! centered while the viewing angle drifts with the pointer.

use std::f32::consts::FRAC_PI_2;

use glam::{DVec2, Mat4, Vec3};

use super::config::CameraConfig;
use super::field::Bounds;

/// Keeps the eye off the poles, where a Y-up look-at degenerates.
const MAX_ELEVATION: f32 = FRAC_PI_2 - 0.05;

/// Output surface size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn center(&self) -> DVec2 {
		DVec2::new(self.width / 2.0, self.height / 2.0)
	}

	pub fn aspect(&self) -> f32 {
		if self.height > 0.0 {
			(self.width / self.height) as f32
		} else {
			1.0
		}
	}
}

/// Exponential smoothing step: move `smoothing` of the way from `current` to `target`.
pub fn approach(current: f64, target: f64, smoothing: f64) -> f64 {
	current + (target - current) * smoothing
}

/// Smoothed camera orientation plus the point it looks at.
#[derive(Clone, Debug)]
pub struct CameraRig {
	config: CameraConfig,
	/// Latest pointer offset from the viewport center, already scaled by the
	/// input's sensitivity. `x` is horizontal, `y` vertical.
	pointer: DVec2,
	/// Smoothed rotation: `x` pitches, `y` yaws.
	rotation: DVec2,
	look_at: Vec3,
}

impl CameraRig {
	pub fn new(config: CameraConfig) -> Self {
		Self {
			config,
			pointer: DVec2::ZERO,
			rotation: DVec2::ZERO,
			look_at: Vec3::ZERO,
		}
	}

	pub fn config(&self) -> &CameraConfig {
		&self.config
	}

	pub fn pointer(&self) -> DVec2 {
		self.pointer
	}

	pub fn rotation(&self) -> DVec2 {
		self.rotation
	}

	pub fn look_target(&self) -> Vec3 {
		self.look_at
	}

	/// Record a mouse position in client coordinates.
	pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64, viewport: Viewport) {
		self.set_pointer(client_x, client_y, viewport, self.config.mouse_sensitivity);
	}

	/// Record a touch position in page coordinates.
	///
	/// Only a single active touch steers the camera. With zero or several
	/// touches the state is left alone and `false` is returned, so the caller
	/// knows not to swallow the event.
	pub fn on_touch(&mut self, touches: &[DVec2], viewport: Viewport) -> bool {
		let [touch] = touches else {
			return false;
		};
		self.set_pointer(touch.x, touch.y, viewport, self.config.touch_sensitivity);
		true
	}

	fn set_pointer(&mut self, x: f64, y: f64, viewport: Viewport, sensitivity: f64) {
		let center = viewport.center();
		self.pointer = DVec2::new((x - center.x) * sensitivity, (y - center.y) * sensitivity);
	}

	/// Rotation the camera is easing toward.
	pub fn target_rotation(&self) -> DVec2 {
		DVec2::new(self.pointer.y, self.pointer.x) * self.config.rotation_gain
	}

	/// Advance the smoothed rotation by one frame.
	pub fn step(&mut self) {
		let target = self.target_rotation();
		let smoothing = self.config.smoothing;
		self.rotation = DVec2::new(
			approach(self.rotation.x, target.x, smoothing),
			approach(self.rotation.y, target.y, smoothing),
		);
	}

	/// Aim at the center of `bounds`, or the origin for an empty field.
	pub fn look_at(&mut self, bounds: Option<Bounds>) {
		self.look_at = bounds.map(|b| b.center()).unwrap_or(Vec3::ZERO);
	}

	/// Eye position after orbiting the configured position by the current rotation.
	pub fn eye(&self) -> Vec3 {
		let base = Vec3::from(self.config.position);
		let offset = base - self.look_at;
		let radius = offset.length();
		if radius < 1e-6 {
			return base;
		}

		let elevation = ((offset.y / radius).clamp(-1.0, 1.0).asin() + self.rotation.x as f32)
			.clamp(-MAX_ELEVATION, MAX_ELEVATION);
		let azimuth = offset.x.atan2(offset.z) + self.rotation.y as f32;

		self.look_at
			+ radius
				* Vec3::new(
					elevation.cos() * azimuth.sin(),
					elevation.sin(),
					elevation.cos() * azimuth.cos(),
				)
	}

	pub fn view_matrix(&self) -> Mat4 {
		Mat4::look_at_rh(self.eye(), self.look_at, Vec3::Y)
	}

	pub fn projection_matrix(&self, viewport: Viewport) -> Mat4 {
		Mat4::perspective_rh(
			self.config.fov_degrees.to_radians(),
			viewport.aspect(),
			self.config.near,
			self.config.far,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn viewport() -> Viewport {
		Viewport::new(1000.0, 800.0)
	}

	#[test]
	fn approach_converges_without_overshoot() {
		for &(start, target) in &[(0.0f64, 1.0f64), (3.0, -2.0), (-0.5, -0.5)] {
			let mut current = start;
			let mut last_gap = (target - current).abs();
			for _ in 0..2000 {
				current = approach(current, target, 0.05);
				let gap = (target - current).abs();
				assert!(gap <= last_gap);
				if start < target {
					assert!(current <= target);
				} else {
					assert!(current >= target);
				}
				last_gap = gap;
			}
			assert!((current - target).abs() < 1e-9);
		}
	}

	#[test]
	fn mouse_offset_uses_mouse_sensitivity() {
		let mut rig = CameraRig::new(CameraConfig::default());
		rig.on_pointer_move(700.0, 300.0, viewport());

		assert!((rig.pointer() - DVec2::new(2.0, -1.0)).length() < 1e-12);
		let target = rig.target_rotation();
		assert!((target - DVec2::new(-0.2, 0.4)).length() < 1e-12);
	}

	#[test]
	fn single_touch_uses_touch_sensitivity() {
		let mut rig = CameraRig::new(CameraConfig::default());
		assert!(rig.on_touch(&[DVec2::new(600.0, 500.0)], viewport()));

		assert!((rig.pointer() - DVec2::new(1.5, 1.5)).length() < 1e-12);
		assert!((rig.target_rotation() - DVec2::new(0.3, 0.3)).length() < 1e-12);
	}

	#[test]
	fn multi_touch_is_ignored() {
		let mut rig = CameraRig::new(CameraConfig::default());
		rig.on_touch(&[DVec2::new(600.0, 500.0)], viewport());
		let before = rig.pointer();

		let handled = rig.on_touch(
			&[DVec2::new(10.0, 10.0), DVec2::new(900.0, 700.0)],
			viewport(),
		);

		assert!(!handled);
		assert_eq!(rig.pointer(), before);
		assert!(!rig.on_touch(&[], viewport()));
		assert_eq!(rig.pointer(), before);
	}

	#[test]
	fn rotation_lags_target() {
		let mut rig = CameraRig::new(CameraConfig::default());
		assert_eq!(rig.rotation(), DVec2::ZERO);

		rig.on_pointer_move(1000.0, 800.0, viewport());
		let target = rig.target_rotation();
		rig.step();

		assert!((rig.rotation() - target * 0.05).length() < 1e-12);
		for _ in 0..1000 {
			rig.step();
		}
		assert!((rig.rotation() - target).length() < 1e-9);
	}

	#[test]
	fn resting_eye_is_configured_position() {
		let rig = CameraRig::new(CameraConfig::default());
		assert!((rig.eye() - Vec3::new(0.0, 5.0, 15.0)).length() < 1e-4);
	}

	#[test]
	fn look_at_tracks_bounds_center() {
		let mut rig = CameraRig::new(CameraConfig::default());
		rig.look_at(Some(Bounds {
			min: Vec3::new(-20.0, -1.0, -20.0),
			max: Vec3::new(20.0, 2.0, 20.0),
		}));
		assert_eq!(rig.look_target(), Vec3::new(0.0, 0.5, 0.0));

		rig.look_at(None);
		assert_eq!(rig.look_target(), Vec3::ZERO);
	}

	#[test]
	fn view_puts_target_straight_ahead() {
		let mut rig = CameraRig::new(CameraConfig::default());
		rig.on_pointer_move(100.0, 700.0, viewport());
		for _ in 0..30 {
			rig.step();
		}
		rig.look_at(Some(Bounds {
			min: Vec3::new(-1.0, 0.0, -1.0),
			max: Vec3::new(1.0, 1.0, 1.0),
		}));

		let eye_distance = (rig.eye() - rig.look_target()).length();
		let ahead = rig.view_matrix().transform_point3(rig.look_target());
		assert!(ahead.x.abs() < 1e-3 && ahead.y.abs() < 1e-3);
		assert!((ahead.z + eye_distance).abs() < 1e-3);
	}

	#[test]
	fn extreme_pitch_is_clamped() {
		let mut rig = CameraRig::new(CameraConfig::default());
		rig.on_pointer_move(500.0, 100_000.0, viewport());
		for _ in 0..500 {
			rig.step();
		}
		let dir = (rig.eye() - rig.look_target()).normalize();
		assert!(dir.y.abs() < 1.0);
		assert!(rig.view_matrix().is_finite());
	}

	#[test]
	fn degenerate_viewport_has_unit_aspect() {
		assert_eq!(Viewport::new(300.0, 0.0).aspect(), 1.0);
		assert_eq!(Viewport::new(300.0, 150.0).aspect(), 2.0);
	}
}
