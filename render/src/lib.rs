//! Rendering of OpenAutoComplete specifications into shell tooling formats.
//!
//! Two independent renderers consume a validated
//! [`Specification`](oactool_core::Specification):
//!
//! - [`render_docopt`] — docopt-style usage and options text for humans.
//! - [`render_fish`] — a static fish completion script, one `complete`
//!   directive per option or subcommand.
//!
//! # Example
//!
//! ```
//! use oactool_core::Specification;
//! use oactool_render::render_docopt_at_width;
//!
//! let spec = Specification::from_json_str(r#"{
//!     "openautocomplete": {"version": "1.0"},
//!     "cli": {"name": "svc", "pattern_groups": [
//!         {"type": "group", "exclusive": true, "patterns": [
//!             {"type": "command", "command": {"names": ["start"]}},
//!             {"type": "command", "command": {"names": ["stop"]}}
//!         ]}
//!     ]}
//! }"#).unwrap();
//!
//! let text = render_docopt_at_width(&spec, 80);
//! assert!(text.contains("svc start|stop"));
//! ```

mod docopt;
mod fish;

pub use docopt::{format_pattern, render_docopt, render_docopt_at_width};
pub use fish::render_fish;
