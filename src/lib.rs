//! Folio - the page model of a static site build.
//!
//! A [`Page`](page::Page) is built from a source file, an in-memory string
//! or a bare route, then [`processed`](page::Page::process):
//!
//! ```text
//! Page::new ─► resolve source ─► extract metadata ─► locale ─► enhancers ─► permalink
//! ```
//!
//! The CLI in `main.rs` is a thin orchestrator over this library.

pub mod cli;
pub mod config;
pub mod core;
pub mod logger;
pub mod markdown;
pub mod page;
pub mod utils;
