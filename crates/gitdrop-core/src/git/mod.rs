//! Git subprocess plumbing.
//!
//! Every repository operation goes through a [`GitRunner`], which runs one
//! git invocation in an explicit working directory and hands back its
//! combined output. [`SystemGit`] is the real implementation.

mod runner;
mod step;

pub use runner::{GitOutput, GitRunner, SystemGit};
pub use step::GitStep;
