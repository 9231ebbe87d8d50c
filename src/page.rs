//! Static page chrome: mobile menu, footer year, scroll-dependent header and
//! back-to-top button, nav highlighting and fade-in reveal driven by
//! intersection observers, and the scheduling call-to-action buttons.
//!
//! Every element is looked up by id and is optional; missing elements are
//! skipped. The listeners live for the page, so their closures are leaked.

use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
	ScrollBehavior, ScrollToOptions, Window,
};

/// External scheduling page opened by the call-to-action buttons.
pub const SCHEDULING_LINK: &str = "https://calendly.com/prabhjot-prysmi";

/// Buttons that open [`SCHEDULING_LINK`].
pub const SCHEDULING_BUTTONS: [&str; 4] = [
	"get-started-header-btn",
	"get-started-mobile-btn",
	"hero-cta-btn",
	"schedule-call-footer-btn",
];

/// Scroll offset (px) past which the header floats.
pub const HEADER_SCROLL_THRESHOLD: f64 = 50.0;
/// Scroll offset (px) past which the back-to-top button shows.
pub const BACK_TO_TOP_THRESHOLD: f64 = 300.0;

/// Visible fraction at which a section or fade-in element counts as on screen.
pub const OBSERVER_THRESHOLD: f64 = 0.1;

/// Section whose nav link gets the extra call-to-action styling.
pub const NEXT_STEPS_SECTION: &str = "next-steps";

/// Classes a nav link carries while section `target_id` is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavClasses {
	pub active: bool,
	pub next_steps: bool,
}

/// `href` is the link's `href` attribute, or `None` for links that are not
/// anchors (buttons styled as nav links never light up).
pub fn nav_classes(target_id: &str, href: Option<&str>) -> NavClasses {
	let active = href
		.and_then(|href| href.strip_prefix('#'))
		.is_some_and(|fragment| fragment == target_id);
	NavClasses {
		active,
		next_steps: active && target_id == NEXT_STEPS_SECTION,
	}
}

pub fn header_scrolled(scroll_y: f64) -> bool {
	scroll_y > HEADER_SCROLL_THRESHOLD
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
	scroll_y > BACK_TO_TOP_THRESHOLD
}

fn on_click(element: &Element, handler: impl FnMut() + 'static) {
	let cb = Closure::<dyn FnMut()>::new(handler);
	let _ = element.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
	cb.forget();
}

fn wire_mobile_menu(document: &Document) {
	let (Some(button), Some(menu)) = (
		document.get_element_by_id("mobile-menu-button"),
		document.get_element_by_id("mobile-menu"),
	) else {
		return;
	};

	let menu_toggle = menu.clone();
	on_click(&button, move || {
		let _ = menu_toggle.class_list().toggle("hidden");
	});

	let Ok(links) = document.query_selector_all("#mobile-menu a") else {
		return;
	};
	for link in (0..links.length()).filter_map(|i| links.item(i)) {
		let Ok(link) = link.dyn_into::<Element>() else {
			continue;
		};
		let menu_close = menu.clone();
		on_click(&link, move || {
			let _ = menu_close.class_list().add_1("hidden");
		});
	}
}

fn wire_footer_year(document: &Document) {
	if let Some(span) = document.get_element_by_id("currentYear") {
		let year = js_sys::Date::new_0().get_full_year();
		span.set_text_content(Some(&year.to_string()));
	}
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
	let Ok(list) = document.query_selector_all(selector) else {
		return Vec::new();
	};
	(0..list.length())
		.filter_map(|i| list.item(i))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect()
}

/// Observe `targets`, calling `on_visible` for each entry that starts intersecting.
fn observe_visible(
	targets: &[Element],
	mut on_visible: impl FnMut(&Element) + 'static,
) -> Option<IntersectionObserver> {
	if targets.is_empty() {
		return None;
	}
	let cb = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
		for entry in entries.iter() {
			let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
				continue;
			};
			if entry.is_intersecting() {
				on_visible(&entry.target());
			}
		}
	});
	let options = IntersectionObserverInit::new();
	options.set_root_margin("0px");
	options.set_threshold(&JsValue::from_f64(OBSERVER_THRESHOLD));
	let observer =
		match IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &options) {
			Ok(observer) => observer,
			Err(e) => {
				warn!("waving-dots: intersection observer unavailable: {:?}", e);
				return None;
			}
		};
	cb.forget();
	for target in targets {
		observer.observe(target);
	}
	Some(observer)
}

fn wire_nav_highlight(document: &Document) -> usize {
	let links = query_all(document, ".nav-link");
	if links.is_empty() {
		return 0;
	}
	let sections = query_all(document, "section");
	let observed = sections.len();
	observe_visible(&sections, move |section| {
		let target_id = section.id();
		for link in &links {
			let href = (link.tag_name() == "A")
				.then(|| link.get_attribute("href"))
				.flatten();
			let classes = nav_classes(&target_id, href.as_deref());
			let list = link.class_list();
			let _ = list.remove_2("active", "next-steps-active-style");
			if classes.active {
				let _ = list.add_1("active");
			}
			if classes.next_steps {
				let _ = list.add_1("next-steps-active-style");
			}
		}
	})
	.map_or(0, |_| observed)
}

fn wire_fade_in(document: &Document) -> usize {
	let elements = query_all(document, ".fade-in-up");
	let observed = elements.len();
	observe_visible(&elements, |element| {
		let _ = element.class_list().add_1("is-visible");
	})
	.map_or(0, |_| observed)
}

fn wire_scroll_chrome(window: &Window, document: &Document) {
	let header = document.get_element_by_id("main-header");
	let back_to_top = document.get_element_by_id("back-to-top");
	if header.is_none() && back_to_top.is_none() {
		return;
	}

	if let Some(button) = back_to_top.clone() {
		on_click(&button, || {
			let Some(window) = web_sys::window() else {
				return;
			};
			let options = ScrollToOptions::new();
			options.set_top(0.0);
			options.set_behavior(ScrollBehavior::Smooth);
			window.scroll_to_with_scroll_to_options(&options);
		});
	}

	let on_scroll = Closure::<dyn FnMut()>::new(move || {
		let Some(scroll_y) = web_sys::window().and_then(|w| w.scroll_y().ok()) else {
			return;
		};
		if let Some(ref header) = header {
			let _ = header
				.class_list()
				.toggle_with_force("scrolled", header_scrolled(scroll_y));
		}
		if let Some(ref button) = back_to_top {
			let _ = button
				.class_list()
				.toggle_with_force("show", back_to_top_visible(scroll_y));
		}
	});
	let _ = window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
	on_scroll.forget();
}

fn wire_scheduling_buttons(document: &Document) -> usize {
	let mut wired = 0;
	for id in SCHEDULING_BUTTONS {
		let Some(button) = document.get_element_by_id(id) else {
			continue;
		};
		on_click(&button, || {
			let Some(window) = web_sys::window() else {
				return;
			};
			if window
				.open_with_url_and_target(SCHEDULING_LINK, "_blank")
				.is_err()
			{
				warn!("waving-dots: could not open scheduling link");
			}
		});
		wired += 1;
	}
	wired
}

/// Attach all page chrome listeners to the current document.
pub fn wire_page_chrome() {
	let Some(window) = web_sys::window() else {
		return;
	};
	let Some(document) = window.document() else {
		return;
	};

	wire_mobile_menu(&document);
	wire_footer_year(&document);
	wire_scroll_chrome(&window, &document);
	let sections = wire_nav_highlight(&document);
	let reveals = wire_fade_in(&document);
	let buttons = wire_scheduling_buttons(&document);
	info!(
		"waving-dots: page chrome wired ({} sections, {} fade-ins, {} scheduling buttons)",
		sections, reveals, buttons
	);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn header_floats_strictly_past_threshold() {
		assert!(!header_scrolled(0.0));
		assert!(!header_scrolled(50.0));
		assert!(header_scrolled(50.5));
	}

	#[test]
	fn back_to_top_shows_strictly_past_threshold() {
		assert!(!back_to_top_visible(300.0));
		assert!(back_to_top_visible(301.0));
		assert!(!header_scrolled(-10.0));
	}

	#[test]
	fn nav_link_matches_only_its_section() {
		let on = nav_classes("services", Some("#services"));
		assert!(on.active);
		assert!(!on.next_steps);

		assert_eq!(nav_classes("services", Some("#about")), NavClasses::default());
		assert_eq!(nav_classes("services", Some("services")), NavClasses::default());
		assert_eq!(nav_classes("", Some("#")), NavClasses { active: true, next_steps: false });
	}

	#[test]
	fn next_steps_link_gets_extra_style() {
		let classes = nav_classes("next-steps", Some("#next-steps"));
		assert_eq!(classes, NavClasses { active: true, next_steps: true });
		assert_eq!(nav_classes("next-steps", Some("#services")), NavClasses::default());
	}

	#[test]
	fn non_anchor_links_never_highlight() {
		assert_eq!(nav_classes("next-steps", None), NavClasses::default());
	}

	#[test]
	fn scheduling_buttons_are_distinct() {
		let mut ids = SCHEDULING_BUTTONS.to_vec();
		ids.sort_unstable();
		ids.dedup();
		assert_eq!(ids.len(), SCHEDULING_BUTTONS.len());
		assert!(SCHEDULING_LINK.starts_with("https://"));
	}
}
