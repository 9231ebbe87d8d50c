//! Leptos component driving the dot field canvas.
//!
//! The static page carries the full-viewport canvas; the component adopts it
//! by id once mounted, builds the [`SceneState`], subscribes it to theme
//! changes and wires document-level mouse/touch listeners plus a window resize
//! listener. An animation loop runs via `requestAnimationFrame`, ticking the
//! scene and redrawing each frame. Everything is torn down on a `pagehide`
//! that unloads the page; a page parked in the back/forward cache keeps its
//! loop and resumes when restored.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::DVec2;
use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	AddEventListenerOptions, CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent,
	PageTransitionEvent, TouchEvent, Window,
};

use super::camera::Viewport;
use super::config::BackgroundConfig;
use super::events::{SubscriptionId, ThemeBus};
use super::render;
use super::state::SceneState;
use super::theme::ThemeMode;
use crate::error::BackgroundError;

/// Id of the background canvas in the static page.
pub const CANVAS_ID: &str = "waving-dots-3d-background";

/// Everything registered with the browser for one running background.
struct Runtime {
	scene: Rc<RefCell<SceneState>>,
	frame: Rc<Cell<Option<i32>>>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	on_resize: Closure<dyn FnMut()>,
	on_mousemove: Closure<dyn FnMut(MouseEvent)>,
	on_touch: Closure<dyn FnMut(TouchEvent)>,
	bus: ThemeBus,
	subscription: SubscriptionId,
}

impl Runtime {
	fn start(
		canvas_id: &str,
		config: &BackgroundConfig,
		mode: ThemeMode,
		bus: &ThemeBus,
	) -> Result<Self, BackgroundError> {
		let window = web_sys::window().ok_or(BackgroundError::MissingSurface)?;
		let document = window.document().ok_or(BackgroundError::MissingSurface)?;
		let canvas = require_surface(document.get_element_by_id(canvas_id))?;

		let viewport = window_viewport(&window);
		size_canvas(&canvas, viewport);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.map_err(|e| BackgroundError::UnsupportedBackend(format!("{:?}", e)))?
			.ok_or_else(|| BackgroundError::UnsupportedBackend("no 2d context".into()))?
			.dyn_into()
			.map_err(|_| BackgroundError::UnsupportedBackend("unexpected context type".into()))?;

		let seed = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
		let scene = Rc::new(RefCell::new(SceneState::new(config, mode, viewport, seed)));
		info!(
			"waving-dots: {} particles, {} theme",
			scene.borrow().field.len(),
			mode.as_str()
		);

		let scene_theme = scene.clone();
		let subscription = bus.subscribe(move |mode| {
			scene_theme.borrow_mut().on_theme_change(mode);
			info!("waving-dots: repainted for {} theme", mode.as_str());
		});

		let (scene_resize, canvas_resize) = (scene.clone(), canvas.clone());
		let on_resize = Closure::<dyn FnMut()>::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let viewport = window_viewport(&win);
			size_canvas(&canvas_resize, viewport);
			scene_resize.borrow_mut().resize(viewport.width, viewport.height);
		});
		let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());

		let scene_mm = scene.clone();
		let on_mousemove = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
			scene_mm
				.borrow_mut()
				.on_pointer_move(ev.client_x() as f64, ev.client_y() as f64);
		});
		let _ = document
			.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());

		let scene_touch = scene.clone();
		let on_touch = Closure::<dyn FnMut(TouchEvent)>::new(move |ev: TouchEvent| {
			let list = ev.touches();
			let touches: Vec<DVec2> = (0..list.length())
				.filter_map(|i| list.get(i))
				.map(|t| DVec2::new(t.page_x() as f64, t.page_y() as f64))
				.collect();
			if scene_touch.borrow_mut().on_touch(&touches) {
				ev.prevent_default();
			}
		});
		let options = AddEventListenerOptions::new();
		options.set_passive(false);
		for kind in ["touchstart", "touchmove"] {
			let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
				kind,
				on_touch.as_ref().unchecked_ref(),
				&options,
			);
		}

		let frame = Rc::new(Cell::new(None));
		let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let (scene_anim, animate_inner, frame_anim) = (scene.clone(), animate.clone(), frame.clone());
		let render_config = config.render.clone();
		*animate.borrow_mut() = Some(Closure::new(move || {
			let running = {
				let mut scene = scene_anim.borrow_mut();
				let running = scene.tick();
				if running {
					render::render(&scene, &ctx, &render_config);
					scene.mark_drawn();
				}
				running
			};
			if !running {
				frame_anim.set(None);
				return;
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				frame_anim.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));

		scene.borrow_mut().start();
		if let Some(ref cb) = *animate.borrow() {
			frame.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}

		Ok(Self {
			scene,
			frame,
			animate,
			on_resize,
			on_mousemove,
			on_touch,
			bus: bus.clone(),
			subscription,
		})
	}

	/// Cancel the pending frame, drop every listener and stop the scene.
	fn teardown(self) {
		if let Some(window) = web_sys::window() {
			if let Some(handle) = self.frame.take() {
				let _ = window.cancel_animation_frame(handle);
			}
			let _ = window.remove_event_listener_with_callback(
				"resize",
				self.on_resize.as_ref().unchecked_ref(),
			);
			if let Some(document) = window.document() {
				let _ = document.remove_event_listener_with_callback(
					"mousemove",
					self.on_mousemove.as_ref().unchecked_ref(),
				);
				for kind in ["touchstart", "touchmove"] {
					let _ = document.remove_event_listener_with_callback(
						kind,
						self.on_touch.as_ref().unchecked_ref(),
					);
				}
			}
		}
		self.bus.unsubscribe(self.subscription);
		self.scene.borrow_mut().stop();
		self.animate.borrow_mut().take();
		info!("waving-dots: animation stopped");
	}
}

fn require_surface(element: Option<Element>) -> Result<HtmlCanvasElement, BackgroundError> {
	element
		.and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
		.ok_or(BackgroundError::MissingSurface)
}

/// Whether a `pagehide` ends the page for good. A persisted page sits in the
/// back/forward cache and may be shown again as-is.
fn unloads_on_pagehide(persisted: bool) -> bool {
	!persisted
}

fn window_viewport(window: &Window) -> Viewport {
	let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	Viewport::new(
		dimension(window.inner_width()),
		dimension(window.inner_height()),
	)
}

fn size_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
	canvas.set_width(viewport.width as u32);
	canvas.set_height(viewport.height as u32);
}

/// Paint the page's static background color when the animation cannot run.
fn apply_static_background() {
	let Some(window) = web_sys::window() else {
		return;
	};
	let Some(body) = window.document().and_then(|d| d.body()) else {
		return;
	};
	let color = window
		.get_computed_style(&body)
		.ok()
		.flatten()
		.and_then(|style| style.get_property_value("--color-bg-body").ok())
		.unwrap_or_default();
	if !color.trim().is_empty() {
		let _ = body.style().set_property("background-color", color.trim());
	}
}

/// Animates the page's waving dot field canvas.
///
/// Looks up the `<canvas>` with id `canvas_id` (default [`CANVAS_ID`]). The
/// scene starts with the palette for `theme` and repaints whenever a new mode
/// is published on `bus`. If the canvas is missing or cannot be used the page
/// keeps its static background color.
#[component]
pub fn WavingDotsCanvas(
	bus: ThemeBus,
	#[prop(default = ThemeMode::Dark)] theme: ThemeMode,
	#[prop(optional)] config: BackgroundConfig,
	#[prop(default = CANVAS_ID)] canvas_id: &'static str,
) -> impl IntoView {
	let runtime: Rc<RefCell<Option<Runtime>>> = Rc::new(RefCell::new(None));
	let on_pagehide: Rc<RefCell<Option<Closure<dyn FnMut(PageTransitionEvent)>>>> =
		Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		if runtime.borrow().is_some() {
			return;
		}

		match Runtime::start(canvas_id, &config, theme, &bus) {
			Ok(rt) => *runtime.borrow_mut() = Some(rt),
			Err(BackgroundError::MissingSurface) => {
				warn!("waving-dots: {} (#{})", BackgroundError::MissingSurface, canvas_id);
				apply_static_background();
				return;
			}
			Err(e) => {
				error!("waving-dots: {}", e);
				apply_static_background();
				return;
			}
		}

		let runtime_hide = runtime.clone();
		*on_pagehide.borrow_mut() = Some(Closure::new(move |ev: PageTransitionEvent| {
			if !unloads_on_pagehide(ev.persisted()) {
				info!("waving-dots: page cached, animation kept");
				return;
			}
			if let Some(rt) = runtime_hide.borrow_mut().take() {
				rt.teardown();
			}
		}));
		if let (Some(cb), Some(window)) = (on_pagehide.borrow().as_ref(), web_sys::window()) {
			let _ = window.add_event_listener_with_callback("pagehide", cb.as_ref().unchecked_ref());
		}
	});
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn absent_canvas_is_missing_surface() {
		assert!(matches!(
			require_surface(None),
			Err(BackgroundError::MissingSurface)
		));
	}

	#[test]
	fn cached_page_keeps_running() {
		assert!(!unloads_on_pagehide(true));
		assert!(unloads_on_pagehide(false));
	}
}
