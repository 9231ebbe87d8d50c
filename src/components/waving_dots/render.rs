//! Canvas rendering for the dot field.
//!
//! Each frame clears to the theme background, projects every particle through
//! the camera and fills a small square per visible point. Points are drawn in
//! one pass per distinct color so the fill style changes only a handful of
//! times per frame.

use glam::{Mat4, Vec3};
use web_sys::CanvasRenderingContext2d;

use super::camera::Viewport;
use super::config::RenderConfig;
use super::state::SceneState;
use super::theme::Color;

/// A particle projected to canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
	pub x: f64,
	pub y: f64,
	/// Side length in pixels after distance attenuation.
	pub size: f64,
}

/// Project `position` to canvas coordinates.
///
/// Returns `None` for points behind the camera or outside the clip volume.
/// Size attenuation follows the usual point-sprite rule:
/// `size * (height / 2) / distance`, floored at one pixel.
pub fn project_point(
	view_proj: &Mat4,
	position: Vec3,
	viewport: Viewport,
	point_size: f64,
) -> Option<ScreenPoint> {
	let clip = *view_proj * position.extend(1.0);
	if clip.w <= f32::EPSILON {
		return None;
	}
	let ndc = clip.truncate() / clip.w;
	if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || !(0.0..=1.0).contains(&ndc.z) {
		return None;
	}

	Some(ScreenPoint {
		x: (ndc.x as f64 + 1.0) * 0.5 * viewport.width,
		y: (1.0 - ndc.y as f64) * 0.5 * viewport.height,
		size: (point_size * viewport.height * 0.5 / clip.w as f64).max(1.0),
	})
}

/// Distinct colors in first-seen order.
fn distinct_colors(colors: &[Color]) -> Vec<Color> {
	let mut distinct: Vec<Color> = Vec::with_capacity(4);
	for &c in colors {
		if !distinct.contains(&c) {
			distinct.push(c);
		}
	}
	distinct
}

/// Draws the current scene to the canvas.
pub fn render(state: &SceneState, ctx: &CanvasRenderingContext2d, config: &RenderConfig) {
	let viewport = state.viewport;

	ctx.set_global_alpha(1.0);
	ctx.set_fill_style_str(&state.theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);

	let view_proj = state.camera.projection_matrix(viewport) * state.camera.view_matrix();
	let projected: Vec<Option<ScreenPoint>> = state
		.field
		.positions()
		.iter()
		.map(|&p| project_point(&view_proj, p, viewport, config.point_size))
		.collect();

	ctx.set_global_alpha(config.opacity);
	for color in distinct_colors(state.field.colors()) {
		ctx.set_fill_style_str(&color.to_css_rgb());
		for (point, _) in projected
			.iter()
			.zip(state.field.colors())
			.filter(|(_, c)| **c == color)
		{
			if let Some(p) = point {
				let half = p.size * 0.5;
				ctx.fill_rect(p.x - half, p.y - half, p.size, p.size);
			}
		}
	}
	ctx.set_global_alpha(1.0);
}
