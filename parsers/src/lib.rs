//! Reverse parsers producing OpenAutoComplete specifications.
//!
//! Two independent front-ends build a
//! [`Specification`](oactool_core::Specification) from external text:
//!
//! - [`parse_fish_document`] — fish `complete` directives.
//! - [`parse_man_text`] / [`scrape_man`] — rendered man page text. The
//!   scraping rules are a pure function over the page text;
//!   [`scrape_man`] composes them with the system man pipeline.
//!
//! Both produce a single flat group of option patterns under a [`Cli`]
//! named after the source command.
//!
//! [`Cli`]: oactool_core::Cli

mod error;
mod fish;
mod man;
mod util;

pub use error::{ParseError, Result};
pub use fish::parse_fish_document;
pub use man::{parse_man_text, render_man_page, scrape_man};
