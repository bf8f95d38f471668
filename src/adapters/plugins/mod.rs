//! Native adapter plugins.
//!
//! Each sub-module corresponds to an external tracker and implements the
//! domain port traits directly.

pub mod github_issues;
