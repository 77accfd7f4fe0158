// Text normalization: language resources plus the token pipeline that
// reduces raw email text to space-joined stems for classification.

pub mod normalizer;
pub mod resources;
