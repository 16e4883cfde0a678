//! URL path templates.
//!
//! A template maps a content node to the URL it is served at. Two rules exist:
//!
//! | Rule           | Used by                     | Example                                          |
//! |----------------|-----------------------------|--------------------------------------------------|
//! | `StripPrefix`  | `Article`, md collections   | `/build/content-md/news/gcc/` → `/news/gcc/`     |
//! | `FilenamePath` | `Insert`                    | `build/content-md/news` + `foot` → `/insert:/news/foot` |
//!
//! `FilenamePath` reads `fileInfo`, which `vue-remark` nodes lack, so it must
//! only be attached to `source-filesystem` types.

use crate::{debug, node::ContentNode, utils::path::strip_path_prefix};
use serde::{Serialize, Serializer, ser::SerializeMap};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("node `{path}` has no fileInfo; filename templates need source-filesystem nodes")]
    MissingFileInfo { path: String },
}

/// A path template rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum TemplateFunction {
    /// Drop the content-root segments from `node.path`.
    StripPrefix { depth: usize },
    /// `/<prefix>:/<dir-without-root>/<name>` from the node's file metadata.
    FilenamePath { prefix: String, depth: usize },
}

impl TemplateFunction {
    pub fn resolve(&self, node: &ContentNode) -> Result<String, TemplateError> {
        match self {
            Self::StripPrefix { depth } => Ok(strip_path_prefix(&node.path, *depth, true)),
            Self::FilenamePath { prefix, depth } => {
                let info = node
                    .file_info
                    .as_ref()
                    .ok_or_else(|| TemplateError::MissingFileInfo {
                        path: node.path.clone(),
                    })?;

                let directory = strip_path_prefix(&info.directory, *depth, false);
                let path = if directory.is_empty() {
                    info.name.clone()
                } else {
                    format!("{directory}/{}", info.name)
                };
                Ok(format!("/{prefix}:/{path}"))
            }
        }
    }
}

/// Ordered map of node type name to its template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Templates(Vec<(String, TemplateFunction)>);

impl Templates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the template for `type_name`.
    pub fn insert(&mut self, type_name: impl Into<String>, template: TemplateFunction) {
        let type_name = type_name.into();
        match self.0.iter_mut().find(|(name, _)| *name == type_name) {
            Some((_, existing)) => *existing = template,
            None => self.0.push((type_name, template)),
        }
    }

    pub fn get(&self, type_name: &str) -> Option<&TemplateFunction> {
        self.0
            .iter()
            .find(|(name, _)| name == type_name)
            .map(|(_, template)| template)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplateFunction)> {
        self.0.iter().map(|(name, template)| (name.as_str(), template))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Resolve the URL of `node` using the template registered for `type_name`.
    ///
    /// Returns `None` when the type has no template.
    pub fn resolve(
        &self,
        type_name: &str,
        node: &ContentNode,
    ) -> Option<Result<String, TemplateError>> {
        let result = self.get(type_name)?.resolve(node);
        if let Ok(path) = &result {
            debug!("template"; "{type_name}\t{path}");
        }
        Some(result)
    }
}

impl Serialize for Templates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, template) in &self.0 {
            map.serialize_entry(name, template)?;
        }
        map.end()
    }
}
