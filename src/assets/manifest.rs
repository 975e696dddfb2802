//! TOML asset manifest
//!
//! Describes blocks of fragments so pages can be assembled outside of a
//! template engine:
//!
//! ```toml
//! [blocks.header]
//! css = ["/a.css"]
//! css_inline = ["body { margin: 0; }"]
//! js = [{ path = "/app.js", defer = true }]
//! js_inline = ["boot();"]
//! ```

use crate::assets::store::{Fragment, FragmentStore, JsRef};
use crate::error::{SonataError, SonataResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Root of an assets manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetManifest {
    /// Blocks keyed by index, loaded in name order
    pub blocks: BTreeMap<String, BlockManifest>,
}

/// Fragments of one block, each list in render order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlockManifest {
    pub css: Vec<String>,
    pub css_inline: Vec<String>,
    pub js: Vec<ScriptManifest>,
    pub js_inline: Vec<String>,
}

/// External script entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptManifest {
    pub path: String,
    #[serde(default)]
    pub defer: bool,
}

impl AssetManifest {
    /// Read and parse a manifest file
    pub async fn load(path: &Path) -> SonataResult<Self> {
        if !path.exists() {
            return Err(SonataError::ManifestNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| SonataError::io(format!("reading manifest {}", path.display()), e))?;

        let manifest = Self::parse(&content).map_err(|e| SonataError::ManifestInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!(
            "Loaded {} block(s) from {}",
            manifest.blocks.len(),
            path.display()
        );
        Ok(manifest)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Build a fragment store holding every block of the manifest
    pub fn into_store(self) -> FragmentStore {
        let mut store = FragmentStore::new();

        for (index, block) in self.blocks {
            for path in block.css {
                store.push(&index, Fragment::CssRef(path));
            }
            for text in block.css_inline {
                store.push(&index, Fragment::CssInline(text));
            }
            for script in block.js {
                store.push(
                    &index,
                    Fragment::JsRef(JsRef {
                        path: script.path,
                        defer: script.defer,
                    }),
                );
            }
            for text in block.js_inline {
                store.push(&index, Fragment::JsInline(text));
            }
        }

        store
    }
}
