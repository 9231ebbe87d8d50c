//! Visual theming for the dot field.
//!
//! Provides the light/dark mode flag, the two-color particle palettes and the
//! background clear colors that go with them.

use rand::Rng;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	/// Opaque black, the color of a particle no palette has touched yet.
	pub const BLACK: Color = Color::rgb(0, 0, 0);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Build an opaque color from a packed `0xRRGGBB` value.
	pub const fn hex(value: u32) -> Self {
		Self::rgb(
			((value >> 16) & 0xff) as u8,
			((value >> 8) & 0xff) as u8,
			(value & 0xff) as u8,
		)
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Channels as floats in `[0, 1]`.
	pub fn to_unit(self) -> [f32; 3] {
		[
			self.r as f32 / 255.0,
			self.g as f32 / 255.0,
			self.b as f32 / 255.0,
		]
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// Light or dark page theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
	Light,
	#[default]
	Dark,
}

impl ThemeMode {
	/// Interpret a stored preference. Only `"light"` selects light mode.
	pub fn from_preference(value: Option<&str>) -> Self {
		match value {
			Some("light") => ThemeMode::Light,
			_ => ThemeMode::Dark,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			ThemeMode::Light => "light",
			ThemeMode::Dark => "dark",
		}
	}

	pub fn is_light(self) -> bool {
		self == ThemeMode::Light
	}

	pub fn toggle(self) -> Self {
		match self {
			ThemeMode::Light => ThemeMode::Dark,
			ThemeMode::Dark => ThemeMode::Light,
		}
	}

	/// Body class carried while this mode is active.
	pub fn body_class(self) -> Option<&'static str> {
		self.is_light().then_some("light-mode")
	}

	/// Symbol shown on the toggle button, hinting at the mode it switches to.
	pub fn toggle_symbol(self) -> &'static str {
		match self {
			ThemeMode::Light => "☾",
			ThemeMode::Dark => "☀",
		}
	}

	/// Footer logo matching the page background.
	pub fn footer_logo_url(self) -> &'static str {
		match self {
			ThemeMode::Light => {
				"https://raw.githubusercontent.com/prysmi/home/main/Black%20Horizontal%20Logo%20TM.png"
			}
			ThemeMode::Dark => {
				"https://raw.githubusercontent.com/prysmi/home/main/White%20Horizontal%20Logo%20TM.png"
			}
		}
	}
}

/// The two particle colors used while a theme is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
	pub colors: [Color; 2],
}

impl Palette {
	/// Pink and white on the dark background.
	pub const fn dark() -> Self {
		Self {
			colors: [Color::hex(0xFF53AC), Color::hex(0xFFFFFF)],
		}
	}

	/// Pink and dark gray on the light background.
	pub const fn light() -> Self {
		Self {
			colors: [Color::hex(0xFF53AC), Color::hex(0x333333)],
		}
	}

	/// Pick one of the two entries uniformly at random.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
		self.colors[rng.random_range(0..self.colors.len())]
	}

	pub fn contains(&self, color: Color) -> bool {
		self.colors.contains(&color)
	}
}

/// Complete visual theme for one mode.
#[derive(Clone, Debug)]
pub struct Theme {
	pub mode: ThemeMode,
	/// Canvas clear color.
	pub background: Color,
	pub palette: Palette,
}

impl Theme {
	pub fn dark() -> Self {
		Self {
			mode: ThemeMode::Dark,
			background: Color::hex(0x0A0A0A),
			palette: Palette::dark(),
		}
	}

	pub fn light() -> Self {
		Self {
			mode: ThemeMode::Light,
			background: Color::hex(0xF5F5F5),
			palette: Palette::light(),
		}
	}

	pub fn for_mode(mode: ThemeMode) -> Self {
		match mode {
			ThemeMode::Light => Self::light(),
			ThemeMode::Dark => Self::dark(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::dark()
	}
}
