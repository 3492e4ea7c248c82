//! Command line entry points.

mod resolve;
mod rules;

pub use resolve::{ResolveArgs, resolve};
pub use rules::rules;
