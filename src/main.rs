//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use leptos::prelude::*;
use waving_dots::{App, init_logging, page};

fn main() {
	init_logging();
	page::wire_page_chrome();

	mount_to_body(|| {
		view! { <App /> }
	})
}
