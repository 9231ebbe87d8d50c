//! waving-dots: animated particle background and page chrome for the marketing site.
//!
//! This crate provides a WASM-based background component that renders a waving
//! dot field with theme-aware palettes and pointer parallax, plus the theme
//! toggle and the small amount of page wiring around it.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod error;
pub mod page;

pub use components::preference::{LocalStorage, MemoryStore, PreferenceStore};
pub use components::theme_toggle::ThemeToggle;
pub use components::waving_dots::{
	BackgroundConfig, SceneState, SubscriptionId, Theme, ThemeBus, ThemeMode, Viewport,
	WavingDotsCanvas,
};
pub use error::BackgroundError;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("waving-dots: logging initialized");
}

/// Read the JSON override from a script element with id="background-config".
fn config_override() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("background-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Parse a config override, falling back to defaults.
fn parse_config(text: Option<&str>) -> Result<BackgroundConfig, BackgroundError> {
	match text {
		Some(text) if !text.trim().is_empty() => Ok(BackgroundConfig::from_json(text)?),
		_ => Ok(BackgroundConfig::default()),
	}
}

/// Load background configuration from the DOM.
/// Expected format: JSON with optional { field, camera, render, seed } sections.
pub fn load_config() -> BackgroundConfig {
	match parse_config(config_override().as_deref()) {
		Ok(config) => {
			info!(
				"waving-dots: {} particles over a {} unit plane",
				config.field.count, config.field.plane_size
			);
			config
		}
		Err(e) => {
			warn!("waving-dots: {}, using defaults", e);
			BackgroundConfig::default()
		}
	}
}

/// Main application component.
/// Restores the saved theme and attaches the background and the theme toggle
/// to the canvas and button already present in the static page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let initial = components::preference::load_theme(&LocalStorage);
	components::theme_toggle::apply_theme_to_document(initial);
	let mode = RwSignal::new(initial);
	let bus = ThemeBus::new();

	view! {
		<Title text="Prysmi" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<WavingDotsCanvas bus=bus.clone() theme=initial config=config />
		<ThemeToggle mode=mode bus=bus />
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_or_blank_override_uses_defaults() {
		assert_eq!(parse_config(None).unwrap(), BackgroundConfig::default());
		assert_eq!(parse_config(Some("  \n")).unwrap(), BackgroundConfig::default());
	}

	#[test]
	fn override_is_applied() {
		let config = parse_config(Some(r#"{ "render": { "opacity": 0.5 } }"#)).unwrap();
		assert_eq!(config.render.opacity, 0.5);
		assert_eq!(config.field.count, 15_000);
	}

	#[test]
	fn bad_override_reports_config_error() {
		assert!(matches!(
			parse_config(Some("{ not json")),
			Err(BackgroundError::InvalidConfig(_))
		));
	}
}
