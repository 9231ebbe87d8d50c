//! Scene state driven by the animation loop.
//!
//! [`SceneState`] owns everything the background mutates: the point field,
//! the camera rig, the clock, the active theme and the random source. It is
//! created once when the canvas mounts and then advanced by [`SceneState::tick`]
//! from the frame callback. Input and theme handlers only record targets on it.

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::camera::{CameraRig, Viewport};
use super::config::BackgroundConfig;
use super::field::PointField;
use super::palette::{self, RecolorSchedule};
use super::theme::{Theme, ThemeMode};
use super::wave::{self, WaveParams};

/// Simulated time, advanced by a fixed step once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clock {
	time: f64,
	step: f64,
}

impl Clock {
	pub fn new(step: f64) -> Self {
		Self { time: 0.0, step }
	}

	pub fn time(&self) -> f64 {
		self.time
	}

	pub fn advance(&mut self) -> f64 {
		self.time += self.step;
		self.time
	}
}

/// Lifecycle of the animation loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopPhase {
	/// Built but no frame has run yet.
	#[default]
	Idle,
	Running,
	/// Torn down; further ticks are ignored.
	Stopped,
}

/// Counters for what the loop has done so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
	pub frames: u64,
	pub full_recolors: u64,
	/// Frames whose rotating recolor touched at least one particle.
	pub rotating_recolors: u64,
	pub particles_rotated: u64,
}

/// Owned animation context for the dot field background.
pub struct SceneState {
	pub field: PointField,
	pub camera: CameraRig,
	pub theme: Theme,
	pub viewport: Viewport,
	clock: Clock,
	wave: WaveParams,
	schedule: RecolorSchedule,
	rng: StdRng,
	phase: LoopPhase,
	stats: FrameStats,
	/// Set when positions or colors changed since the last draw.
	pub positions_dirty: bool,
	pub colors_dirty: bool,
}

impl SceneState {
	/// Build the field and paint it with the palette of `mode`.
	///
	/// `seed` is used when the config does not pin one.
	pub fn new(config: &BackgroundConfig, mode: ThemeMode, viewport: Viewport, seed: u64) -> Self {
		let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(seed));
		let field = PointField::new(config.field.count, config.field.plane_size, &mut rng);

		let mut state = Self {
			field,
			camera: CameraRig::new(config.camera.clone()),
			theme: Theme::for_mode(mode),
			viewport,
			clock: Clock::new(config.field.time_step),
			wave: WaveParams::from_config(&config.field),
			schedule: RecolorSchedule::from_config(&config.field),
			rng,
			phase: LoopPhase::Idle,
			stats: FrameStats::default(),
			positions_dirty: true,
			colors_dirty: true,
		};
		state.full_recolor();
		state.camera.look_at(state.field.bounds());
		state
	}

	pub fn time(&self) -> f64 {
		self.clock.time()
	}

	pub fn phase(&self) -> LoopPhase {
		self.phase
	}

	pub fn stats(&self) -> FrameStats {
		self.stats
	}

	pub fn start(&mut self) {
		if self.phase == LoopPhase::Idle {
			self.phase = LoopPhase::Running;
		}
	}

	pub fn stop(&mut self) {
		self.phase = LoopPhase::Stopped;
	}

	/// Advance one frame. Returns `false` once the loop has been stopped.
	pub fn tick(&mut self) -> bool {
		match self.phase {
			LoopPhase::Stopped => return false,
			LoopPhase::Idle => self.phase = LoopPhase::Running,
			LoopPhase::Running => {}
		}

		let time = self.clock.advance();

		wave::update_heights(&mut self.field, self.wave, time);
		self.positions_dirty = true;

		let rotated = palette::rotating_recolor(
			&mut self.field,
			&self.theme.palette,
			time,
			self.schedule,
			&mut self.rng,
		);
		if rotated > 0 {
			self.colors_dirty = true;
			self.stats.rotating_recolors += 1;
			self.stats.particles_rotated += rotated as u64;
		}

		self.camera.step();
		self.camera.look_at(self.field.bounds());

		self.stats.frames += 1;
		true
	}

	/// Swap to the palette of `mode` and repaint the whole field once.
	pub fn on_theme_change(&mut self, mode: ThemeMode) {
		self.theme = Theme::for_mode(mode);
		self.full_recolor();
	}

	fn full_recolor(&mut self) {
		palette::full_recolor(&mut self.field, &self.theme.palette, &mut self.rng);
		self.colors_dirty = true;
		self.stats.full_recolors += 1;
	}

	/// New output size. Particles and camera rotation are untouched.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.viewport = Viewport::new(width, height);
	}

	pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) {
		self.camera.on_pointer_move(client_x, client_y, self.viewport);
	}

	pub fn on_touch(&mut self, touches: &[glam::DVec2]) -> bool {
		self.camera.on_touch(touches, self.viewport)
	}

	/// Mark the current frame as drawn.
	pub fn mark_drawn(&mut self) {
		self.positions_dirty = false;
		self.colors_dirty = false;
	}
}
