//! Etch pad core: an idle-aware drawing surface for the browser.
//!
//! The crate compiles to WebAssembly. Everything that decides *what* happens
//! lives in [`engine::EtchCore`] and the pure modules beneath it, so a whole
//! session can be replayed in native tests. The [`web`] module is the thin
//! shell that measures the page, forwards mouse events, owns the tick timer
//! and applies the [`engine::Action`]s the core returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Session controller and the [`engine::Action`] protocol |
//! | [`dimension`] | Grid size requests and dimension clamping |
//! | [`layout`] | Cell size, centering padding and the cell style rule |
//! | [`mapper`] | Pointer to surface to cell coordinate mapping |
//! | [`idle`] | Session states and the idle countdown |
//! | [`grid`] | Grid content and full / single-row regeneration |
//! | [`render`] | Cell descriptors and placeholder shading |
//! | [`debug`] | Snapshots for the diagnostic readout |
//! | [`config`] | Runtime configuration and query-string parsing |
//! | [`consts`] | Shared constants (dimension bounds, timing, colors) |
//! | [`web`] | Browser shell around [`engine::EtchCore`] |

pub mod config;
pub mod consts;
pub mod debug;
pub mod dimension;
pub mod engine;
pub mod grid;
pub mod idle;
pub mod layout;
pub mod mapper;
pub mod render;
pub mod web;
