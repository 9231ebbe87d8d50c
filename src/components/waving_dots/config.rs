//! Tunable parameters for the dot field, camera and rasterizer.
//!
//! Every field has a default matching the shipped animation, so a partial
//! JSON override only needs to name what it changes.

use serde::Deserialize;

/// Point field, wave and recolor schedule parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Number of particles.
	pub count: usize,
	/// Side of the square region x and z are sampled from, centered at the origin.
	pub plane_size: f32,
	/// Peak-to-peak contribution of the two wave terms combined.
	pub wave_amplitude: f64,
	/// Spatial frequency of the wave along x (z uses 0.7 of it).
	pub wave_frequency: f64,
	/// Clock advance per frame.
	pub time_step: f64,
	/// Number of buckets in the rotating recolor schedule.
	pub recolor_period: u32,
	/// Buckets per unit of simulated time.
	pub recolor_rate: f64,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			count: 15_000,
			plane_size: 40.0,
			wave_amplitude: 2.0,
			wave_frequency: 0.2,
			time_step: 0.01,
			recolor_period: 120,
			recolor_rate: 10.0,
		}
	}
}

/// Perspective camera and pointer parallax parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
	/// Vertical field of view in degrees.
	pub fov_degrees: f32,
	pub near: f32,
	pub far: f32,
	/// Eye position before any parallax rotation.
	pub position: [f32; 3],
	/// Radians of pointer offset per pixel of mouse travel.
	pub mouse_sensitivity: f64,
	/// Radians of pointer offset per pixel of single-finger travel.
	pub touch_sensitivity: f64,
	/// Scale from pointer offset to target rotation.
	pub rotation_gain: f64,
	/// Fraction of the remaining distance covered each frame.
	pub smoothing: f64,
}

impl Default for CameraConfig {
	fn default() -> Self {
		Self {
			fov_degrees: 75.0,
			near: 0.1,
			far: 1000.0,
			position: [0.0, 5.0, 15.0],
			mouse_sensitivity: 0.01,
			touch_sensitivity: 0.015,
			rotation_gain: 0.2,
			smoothing: 0.05,
		}
	}
}

/// Canvas drawing parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
	/// Point size in world units, attenuated by distance.
	pub point_size: f64,
	pub opacity: f64,
}

impl Default for RenderConfig {
	fn default() -> Self {
		Self {
			point_size: 0.08,
			opacity: 0.8,
		}
	}
}

/// Complete background configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackgroundConfig {
	pub field: FieldConfig,
	pub camera: CameraConfig,
	pub render: RenderConfig,
	/// Seed for particle placement and palette sampling. Drawn at startup when absent.
	pub seed: Option<u64>,
}

impl BackgroundConfig {
	/// Parse a JSON override on top of the defaults.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_shipped_animation() {
		let config = BackgroundConfig::default();
		assert_eq!(config.field.count, 15_000);
		assert_eq!(config.field.plane_size, 40.0);
		assert_eq!(config.field.recolor_period, 120);
		assert_eq!(config.camera.smoothing, 0.05);
		assert_eq!(config.camera.position, [0.0, 5.0, 15.0]);
		assert_eq!(config.seed, None);
	}

	#[test]
	fn partial_override_keeps_other_defaults() {
		let config =
			BackgroundConfig::from_json(r#"{ "field": { "count": 500 }, "seed": 42 }"#).unwrap();
		assert_eq!(config.field.count, 500);
		assert_eq!(config.field.wave_frequency, 0.2);
		assert_eq!(config.camera, CameraConfig::default());
		assert_eq!(config.seed, Some(42));
	}

	#[test]
	fn malformed_override_is_an_error() {
		assert!(BackgroundConfig::from_json(r#"{ "field": { "count": "many" } }"#).is_err());
	}
}
