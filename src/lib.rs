// mailsort: actionable vs. courtesy email triage
//
// This is the library root. Each module corresponds to one stage of the
// pipeline: extract -> normalize -> classify -> reply.

pub mod classify;
pub mod config;
pub mod extract;
pub mod nlp;
pub mod output;
pub mod pipeline;
pub mod reply;

#[cfg(feature = "web")]
pub mod web;
