// src/page/mod.rs
// =============================================================================
// This module fetches the awesome-list page itself.
//
// Unlike the per-repository fetches, a failure here stops the whole run.
// =============================================================================

mod fetch;

pub use fetch::{fetch_page, FormatChoice};
