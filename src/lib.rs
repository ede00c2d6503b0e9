//! ffbatch: batch FFmpeg conversion driven by per-codec parameter profiles.
//!
//! The [`engine::params`] registry describes every tunable parameter of a
//! codec profile, [`ui::edit_settings`] edits a [`engine::Settings`] map
//! against it, and [`engine::compile`] turns both into ffmpeg command lines.

pub mod config;
pub mod engine;
pub mod ui;
