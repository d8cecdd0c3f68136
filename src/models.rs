//! Values produced by a successful page lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Files backing a logical page URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPage {
  /// Template path relative to the content root.
  pub template: String,
  /// Where the companion metadata file lives or would live.
  pub metadata: String,
  /// Whether the metadata file was found.
  pub metadata_exists: bool,
  /// Alternate versions keyed by suffix. `None` for exact file lookups.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub alternatives: Option<BTreeMap<String, AlternatePage>>,
}

/// Variant of a page named `<base>_<key>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternatePage {
  /// Template path relative to the content root.
  pub template: String,
  /// Where the alternate's metadata file lives or would live.
  pub metadata: String,
  /// Whether the alternate's metadata file was found.
  pub metadata_exists: bool,
}

impl ResolvedPage {
  /// Look up an alternate version by key.
  pub fn alternative(&self, key: &str) -> Option<&AlternatePage> {
    self.alternatives.as_ref()?.get(key)
  }

  /// Keys of every alternate version, sorted.
  pub fn alternate_keys(&self) -> Vec<&str> {
    self
      .alternatives
      .iter()
      .flat_map(|alternatives| alternatives.keys())
      .map(String::as_str)
      .collect()
  }
}

/// Anything that carries a metadata path and an existence flag.
pub trait MetadataSlot {
  /// Record the metadata location and whether it was found.
  fn set_metadata(&mut self, path: String, exists: bool);
}

impl MetadataSlot for ResolvedPage {
  fn set_metadata(&mut self, path: String, exists: bool) {
    self.metadata = path;
    self.metadata_exists = exists;
  }
}

impl MetadataSlot for AlternatePage {
  fn set_metadata(&mut self, path: String, exists: bool) {
    self.metadata = path;
    self.metadata_exists = exists;
  }
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use serde_json::json;

  use super::{AlternatePage, ResolvedPage};

  fn page_with_alternatives() -> ResolvedPage {
    let mut alternatives = BTreeMap::new();
    alternatives.insert("en".to_string(), AlternatePage {
      template: "index_en.tri".into(),
      metadata: "index_en.json".into(),
      metadata_exists: false,
    });
    ResolvedPage {
      template: "index.tri".into(),
      metadata: "index.json".into(),
      metadata_exists: true,
      alternatives: Some(alternatives),
    }
  }

  #[test]
  fn serialises_to_camel_case_wire_shape() {
    let value = serde_json::to_value(page_with_alternatives()).expect("serialise page");
    assert_eq!(value, json!({
      "template": "index.tri",
      "metadata": "index.json",
      "metadataExists": true,
      "alternatives": {
        "en": {
          "template": "index_en.tri",
          "metadata": "index_en.json",
          "metadataExists": false
        }
      }
    }));
  }

  #[test]
  fn exact_file_pages_omit_alternatives() {
    let page = ResolvedPage {
      template: "one.tri".into(),
      metadata: "one.json".into(),
      metadata_exists: true,
      alternatives: None,
    };
    let value = serde_json::to_value(&page).expect("serialise page");
    assert!(value.get("alternatives").is_none());
    assert!(page.alternate_keys().is_empty());
    assert!(page.alternative("en").is_none());
  }

  #[test]
  fn looks_up_alternatives_by_key() {
    let page = page_with_alternatives();
    assert_eq!(page.alternate_keys(), vec!["en"]);
    assert_eq!(
      page.alternative("en").map(|alt| alt.template.as_str()),
      Some("index_en.tri")
    );
  }
}
