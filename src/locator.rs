//! Resolution of request URLs to page templates.
//!
//! A URL is matched against the content tree in three ways:
//!
//! 1. The URL is exactly the path of a file, such as `/products/widget.html`. The file is
//!    used as the template and `products/widget.json` is probed for metadata. Alternates
//!    are not searched for.
//! 2. The URL names a directory, such as `/products`. The first of the configured index
//!    names combined with the template extensions (`index.tri`, `index.html`, ...) that
//!    exists in the directory becomes the template.
//! 3. Anything else is treated as an extensionless page, such as `/products/widget`. The
//!    parent directory is searched for `widget.<ext>` in extension order.
//!
//! For the last two, siblings named `<base>_<key>.<ext>` are reported as alternates of the
//! page, keyed by `<key>`. Which alternate is rendered is up to the caller.

use std::collections::{BTreeMap, HashMap};

use percent_encoding::percent_decode_str;
use tracing::{debug, trace};

use crate::config::LocatorConfig;
use crate::metadata::{METADATA_EXTENSION, attach_metadata};
use crate::models::{AlternatePage, ResolvedPage};
use crate::naming::{
  DefaultPathGuard, PathGuard, generate_candidate_names, has_template_extension, join_relative,
  normalize_path, split_parent_and_name, strip_extension,
};
use crate::store::{FileInfo, FileStore, siblings_by_name};

/// Reasons a URL could not be resolved to a page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
  /// The decoded path was refused by the path guard.
  #[error("access to `{path}` is forbidden")]
  Forbidden {
    /// Normalised request path.
    path: String,
  },
  /// No template matches the path.
  #[error("no page found for `{path}`")]
  NotFound {
    /// Normalised request path.
    path: String,
  },
}

impl LocateError {
  /// HTTP-style status code for the failure: `401` or `404`.
  pub fn status(&self) -> u16 {
    match self {
      Self::Forbidden { .. } => 401,
      Self::NotFound { .. } => 404,
    }
  }

  /// Path the failure relates to.
  pub fn path(&self) -> &str {
    match self {
      Self::Forbidden { path } | Self::NotFound { path } => path,
    }
  }

  fn not_found(path: &str) -> Self {
    Self::NotFound {
      path: path.to_string(),
    }
  }
}

/// Finds the template, metadata and alternates backing a URL within a [`FileStore`].
#[derive(Debug, Clone)]
pub struct PageLocator<S, G = DefaultPathGuard> {
  sink: S,
  guard: G,
  config: LocatorConfig,
}

impl<S: FileStore> PageLocator<S> {
  /// Create a locator over `sink` using the default naming conventions.
  pub fn new(sink: S) -> Self {
    Self::with_config(sink, LocatorConfig::default())
  }

  /// Create a locator over `sink` using the provided naming conventions.
  pub fn with_config(sink: S, config: LocatorConfig) -> Self {
    Self {
      sink,
      guard: DefaultPathGuard,
      config: config.normalised(),
    }
  }
}

impl<S: FileStore, G: PathGuard> PageLocator<S, G> {
  /// Replace the predicate deciding which decoded paths may be looked up.
  pub fn with_guard<H: PathGuard>(self, guard: H) -> PageLocator<S, H> {
    PageLocator {
      sink: self.sink,
      guard,
      config: self.config,
    }
  }

  /// Naming conventions in use.
  pub fn config(&self) -> &LocatorConfig {
    &self.config
  }

  /// Store pages are read from.
  pub fn sink(&self) -> &S {
    &self.sink
  }

  /// Ordered `name.ext` candidates for the given base names.
  pub fn candidate_names<B: AsRef<str>>(&self, base_names: &[B]) -> Vec<String> {
    generate_candidate_names(base_names, &self.config.template_extensions)
  }

  /// Returns `true` when `name` carries one of the accepted template extensions.
  pub fn is_template_file_name(&self, name: &str) -> bool {
    has_template_extension(name, &self.config.template_extensions)
  }

  /// Resolve `url` to the files that make up the page.
  ///
  /// Leading and trailing slashes are ignored. The path is percent-decoded and normalised
  /// again before it is checked by the guard and handed to the store.
  pub async fn locate(&self, url: &str) -> Result<ResolvedPage, LocateError> {
    let normalized = normalize_path(url);
    let decoded = percent_decode_str(normalized).decode_utf8().map_err(|_| {
      debug!(url = %normalized, "rejecting url that does not decode to utf-8");
      LocateError::Forbidden {
        path: normalized.to_string(),
      }
    })?;
    // Escaped separators such as `%2F` only surface after decoding.
    let path = normalize_path(&decoded);

    if !self.guard.is_allowed(path) {
      debug!(path = %path, "path refused by guard");
      return Err(LocateError::Forbidden {
        path: path.to_string(),
      });
    }

    match self.sink.get_info(path).await {
      Ok(info) if !info.directory => {
        debug!(path = %path, "resolved as exact file");
        Ok(self.resolve_exact_file(path, info).await)
      }
      Ok(info) => {
        debug!(path = %path, "resolving directory index");
        let candidates = self.candidate_names(&self.config.index_names);
        self.resolve_in_directory(path, &info, &candidates)
      }
      Err(err) => {
        trace!(path = %path, error = %err, "no direct entry, trying extensionless page");
        self.resolve_page(path).await
      }
    }
  }

  async fn resolve_exact_file(&self, path: &str, info: FileInfo) -> ResolvedPage {
    let (parent, file_name) = split_parent_and_name(path);
    let base = strip_extension(file_name);
    let metadata = join_relative(parent, &format!("{base}.{METADATA_EXTENSION}"));

    let metadata_exists = match self.sink.get_info(&metadata).await {
      Ok(_) => true,
      Err(err) => {
        trace!(metadata = %metadata, error = %err, "no metadata for file");
        false
      }
    };

    ResolvedPage {
      template: info.relative_path,
      metadata,
      metadata_exists,
      alternatives: None,
    }
  }

  async fn resolve_page(&self, path: &str) -> Result<ResolvedPage, LocateError> {
    let (parent, file_name) = split_parent_and_name(path);
    let parent_info = self.sink.get_info(parent).await.map_err(|err| {
      debug!(path = %path, parent = %parent, error = %err, "parent directory missing");
      LocateError::not_found(path)
    })?;

    let candidates = self.candidate_names(&[strip_extension(file_name)]);
    self.resolve_in_directory(path, &parent_info, &candidates)
  }

  fn resolve_in_directory(
    &self,
    path: &str,
    dir: &FileInfo,
    candidates: &[String],
  ) -> Result<ResolvedPage, LocateError> {
    let siblings = siblings_by_name(dir);
    let found = candidates
      .iter()
      .find_map(|candidate| siblings.get(candidate.as_str()).copied())
      .ok_or_else(|| {
        debug!(path = %path, ?candidates, "no template candidate present");
        LocateError::not_found(path)
      })?;

    debug!(path = %path, template = %found.relative_path, "template found");
    Ok(self.describe_found(found, &siblings))
  }

  fn describe_found(&self, found: &FileInfo, siblings: &HashMap<&str, &FileInfo>) -> ResolvedPage {
    let (parent, _) = split_parent_and_name(&found.relative_path);
    let base = strip_extension(&found.name);

    let page = ResolvedPage {
      template: found.relative_path.clone(),
      metadata: String::new(),
      metadata_exists: false,
      alternatives: None,
    };
    let mut page = attach_metadata(page, base, parent, siblings);
    page.alternatives = Some(self.discover_alternates(base, parent, siblings));
    page
  }

  /// Collect siblings named `<base>_<key>.<ext>`.
  ///
  /// When one key exists with several extensions the earlier configured extension wins.
  fn discover_alternates(
    &self,
    base: &str,
    parent: &str,
    siblings: &HashMap<&str, &FileInfo>,
  ) -> BTreeMap<String, AlternatePage> {
    let prefix = format!("{base}_");
    let mut names: Vec<&str> = siblings
      .keys()
      .copied()
      .filter(|name| name.starts_with(&prefix) && self.is_template_file_name(name))
      .collect();
    names.sort_by_key(|name| (self.extension_rank(name), *name));
    names.dedup();

    let mut alternatives = BTreeMap::new();
    for name in names {
      let key = match strip_extension(name).strip_prefix(&prefix) {
        Some(key) if !key.is_empty() => key,
        _ => {
          trace!(name = %name, "ignoring alternate without a key");
          continue;
        }
      };
      if alternatives.contains_key(key) {
        continue;
      }

      let alternate = AlternatePage {
        template: siblings[name].relative_path.clone(),
        metadata: String::new(),
        metadata_exists: false,
      };
      let alternate = attach_metadata(alternate, &format!("{prefix}{key}"), parent, siblings);
      trace!(key = %key, template = %alternate.template, "alternate found");
      alternatives.insert(key.to_string(), alternate);
    }
    alternatives
  }

  fn extension_rank(&self, name: &str) -> usize {
    self
      .config
      .template_extensions
      .iter()
      .position(|ext| has_template_extension(name, std::slice::from_ref(ext)))
      .unwrap_or(usize::MAX)
  }
}
