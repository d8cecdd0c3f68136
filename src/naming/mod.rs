//! String helpers for turning request URLs into candidate file names.
//!
//! Nothing in here touches the file store. The normaliser, the candidate generator and the
//! path-safety filter are kept in separate submodules so each can be tested on its own and
//! reused by any store implementation.

mod candidates;
mod filters;
mod paths;

pub use candidates::{generate_candidate_names, has_template_extension};
pub use filters::{DefaultPathGuard, PathGuard, is_allowed_path};
pub use paths::{join_relative, normalize_path, split_parent_and_name, strip_extension};
