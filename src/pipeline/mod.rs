// Request pipeline: resolves what was submitted into text, then runs
// normalize -> classify -> reply. Nothing survives between requests.

pub mod submission;
pub mod triage;
