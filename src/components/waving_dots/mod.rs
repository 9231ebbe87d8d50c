//! Waving dot field background.
//!
//! Renders a slowly undulating point cloud on a full-viewport canvas with:
//! - A fixed set of particles whose heights follow a two-term travelling wave
//! - Two-color palettes per theme, with a rotating per-frame shimmer
//! - Pointer and single-finger touch parallax with smoothed camera motion
//! - Theme changes delivered through an explicit [`ThemeBus`] subscription
//!
//! # Example
//!
//! ```ignore
//! use waving_dots::{ThemeBus, ThemeMode, WavingDotsCanvas};
//!
//! let bus = ThemeBus::new();
//! view! { <WavingDotsCanvas bus=bus.clone() theme=ThemeMode::Dark /> }
//!
//! // Later, from the theme toggle:
//! bus.publish(ThemeMode::Light);
//! ```

pub mod camera;
mod component;
pub mod config;
pub mod events;
pub mod field;
pub mod palette;
pub mod render;
pub mod state;
pub mod theme;
pub mod wave;

pub use camera::Viewport;
pub use component::WavingDotsCanvas;
pub use config::BackgroundConfig;
pub use events::{SubscriptionId, ThemeBus};
pub use state::SceneState;
pub use theme::{Theme, ThemeMode};
