// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Formation choreography engine: stage layouts, formation sequences and
//! timed transitions between them.
//!
//! A piece is an ordered list of formations, each a snapshot of where every
//! dancer stands on a stage measured in percent. The engine edits that list
//! immutably and animates between consecutive formations with staggered,
//! per-dancer motion.
//!
//! # Key entry points
//!
//! - [`engine::ChoreographyEngine`] - the editor/playback facade
//! - [`formation::Sequence`] - the saved formation list and its edits
//! - [`formation::template`] - stage layout generators
//! - [`animation`] - transition behaviors, interpolation and the playback
//!   sequencer
//! - [`options::Options`] - playback, stage and layout configuration
//!
//! # Architecture
//!
//! Everything is single-threaded and tick-driven: the host calls
//! [`engine::ChoreographyEngine::tick`] once per animation frame and pulls
//! [`engine::ChoreographyEngine::render_markers`]. Interpolation is a pure
//! function of progress, so a frame can be computed for any instant without
//! replaying earlier ones.

pub mod animation;
pub mod engine;
pub mod error;
pub mod formation;
pub mod options;
pub mod util;
