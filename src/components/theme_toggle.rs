//! Light/dark toggle button.
//!
//! The button lives in the static page. Clicking flips the mode, persists it,
//! updates the document (body class and footer logo) and publishes the new
//! mode to the background.

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlImageElement};

use super::preference::{LocalStorage, PreferenceStore, save_theme};
use super::waving_dots::{ThemeBus, ThemeMode};

/// Reflect `mode` on the static page: body class and footer logo.
pub fn apply_theme_to_document(mode: ThemeMode) {
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		return;
	};
	if let Some(body) = document.body() {
		let _ = body.class_list().toggle_with_force("light-mode", mode.is_light());
	}
	if let Some(logo) = document
		.get_element_by_id("footer-logo")
		.and_then(|e| e.dyn_into::<HtmlImageElement>().ok())
	{
		logo.set_src(mode.footer_logo_url());
	}
}

/// Persist and broadcast a theme change. Returns how many listeners were notified.
pub fn commit_theme(mode: ThemeMode, store: &impl PreferenceStore, bus: &ThemeBus) -> usize {
	save_theme(store, mode);
	bus.publish(mode)
}

/// Persist, apply and broadcast a theme change.
pub fn set_theme(mode: ThemeMode, store: &impl PreferenceStore, bus: &ThemeBus) {
	apply_theme_to_document(mode);
	let listeners = commit_theme(mode, store, bus);
	info!(
		"waving-dots: theme set to {} ({} listeners)",
		mode.as_str(),
		listeners
	);
}

/// Id of the toggle button in the static page.
pub const TOGGLE_ID: &str = "theme-toggle";

fn show_symbol(button: &Element, mode: ThemeMode) {
	if let Ok(Some(symbol)) = button.query_selector(".theme-symbol") {
		symbol.set_text_content(Some(mode.toggle_symbol()));
	}
}

/// Wires the page's light/dark toggle button.
///
/// The button's `.theme-symbol` shows the mode a click would switch to.
#[component]
pub fn ThemeToggle(
	mode: RwSignal<ThemeMode>,
	bus: ThemeBus,
	#[prop(default = TOGGLE_ID)] button_id: &'static str,
) -> impl IntoView {
	let Some(button) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(button_id))
	else {
		warn!("waving-dots: no #{} button, theme toggle disabled", button_id);
		return;
	};

	let on_click = Closure::<dyn FnMut()>::new(move || {
		let next = mode.get_untracked().toggle();
		set_theme(next, &LocalStorage, &bus);
		mode.set(next);
	});
	let _ = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
	on_click.forget();

	Effect::new(move |_| show_symbol(&button, mode.get()));
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::super::preference::{MemoryStore, THEME_KEY, load_theme};
	use super::*;

	#[test]
	fn commit_persists_and_publishes_once() {
		let store = MemoryStore::default();
		let bus = ThemeBus::new();
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		bus.subscribe(move |mode| sink.borrow_mut().push(mode));

		assert_eq!(commit_theme(ThemeMode::Light, &store, &bus), 1);

		assert_eq!(store.load(THEME_KEY).as_deref(), Some("light"));
		assert_eq!(load_theme(&store), ThemeMode::Light);
		assert_eq!(*seen.borrow(), vec![ThemeMode::Light]);
	}
}
