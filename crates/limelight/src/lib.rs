// lib.rs — Scope spotlight engine.
//
// Highlights the enclosing function or scope around the cursor by dimming
// everything else in the document. All parsing stays with the host's symbol
// provider; this crate only selects the scope to spotlight and computes the
// complementary dim/focus regions.

pub mod config;
pub mod controller;
pub mod document;
pub mod host;
pub mod language;
pub mod regions;
pub mod resolver;
