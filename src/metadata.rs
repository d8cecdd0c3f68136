//! Companion metadata detection for resolved templates.

use std::collections::HashMap;

use crate::models::MetadataSlot;
use crate::naming::join_relative;
use crate::store::FileInfo;

/// Extension used by metadata files.
pub const METADATA_EXTENSION: &str = "json";

/// Record where `<base>.json` lives and whether it exists among `siblings`.
///
/// A sibling match stores the sibling's own relative path. Otherwise the path is joined
/// from `parent` and the metadata name and flagged as missing. No I/O is performed.
pub fn attach_metadata<T: MetadataSlot>(
  mut result: T,
  base: &str,
  parent: &str,
  siblings: &HashMap<&str, &FileInfo>,
) -> T {
  let file_name = format!("{base}.{METADATA_EXTENSION}");
  match siblings.get(file_name.as_str()) {
    Some(sibling) => result.set_metadata(sibling.relative_path.clone(), true),
    None => result.set_metadata(join_relative(parent, &file_name), false),
  }
  result
}
