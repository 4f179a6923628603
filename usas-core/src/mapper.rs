//! # Mapeador de Descrições USAS
//!
//! Carrega as descrições das tags USAS (título + descrição) de um arquivo YAML:
//!
//! ```yaml
//! A1.1.1:
//!   title: General actions, making etc.
//!   description: General/abstract terms relating to an activity/action
//! Z99:
//!   title: Unmatched
//!   description: Unrecognised words
//! ```
//!
//! Cada tag vira a string `"title: {title} description: {description}"`, o texto
//! que acompanha a tag na planilha de correção. Tags podem ser filtradas na
//! carga (ex: `Z99`, que não deve ser oferecida aos anotadores).

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

use crate::error::{Result, TaggingError};
use crate::tag::{UsasTagGroup, PUNCT};

/// Tag de palavras não reconhecidas pelo tagger.
pub const UNMATCHED: &str = "Z99";

/// Mapa tag USAS → descrição.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsasMapper {
    descriptions: BTreeMap<String, String>,
}

/// Entradas na ordem do arquivo, sem descartar chaves repetidas
struct RawEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of USAS tags to their title and description")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> std::result::Result<RawEntries, M::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((tag, value)) = map.next_entry::<String, Value>()? {
                    entries.push((tag, value));
                }
                Ok(RawEntries(entries))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<RawEntries, E> {
                Ok(RawEntries(Vec::new()))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl UsasMapper {
    /// Lê o mapeador de um texto YAML, descartando `tags_to_filter_out`.
    pub fn from_yaml_str(yaml: &str, tags_to_filter_out: Option<&HashSet<String>>) -> Result<Self> {
        let RawEntries(entries) = serde_yaml::from_str(yaml)?;
        let total = entries.len();

        let mut descriptions = BTreeMap::new();
        for (tag, value) in entries {
            let title = required_key(&tag, &value, "title")?;
            let description = required_key(&tag, &value, "description")?;
            if descriptions.contains_key(&tag) {
                return Err(TaggingError::DuplicateTag { tag });
            }
            descriptions.insert(tag, format!("title: {} description: {}", title, description));
        }

        if let Some(filter) = tags_to_filter_out {
            descriptions.retain(|tag, _| !filter.contains(tag));
        }
        debug!(
            tags = descriptions.len(),
            filtered = total - descriptions.len(),
            "descrições USAS carregadas"
        );
        Ok(Self { descriptions })
    }

    /// Lê o mapeador de um arquivo YAML.
    pub fn load(path: &Path, tags_to_filter_out: Option<&HashSet<String>>) -> Result<Self> {
        if path.exists() && !path.is_file() {
            return Err(TaggingError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path).map_err(|source| TaggingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content, tags_to_filter_out)
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.descriptions.get(tag).map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.descriptions.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    /// Tags e descrições em ordem de tag.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.descriptions.iter().map(|(t, d)| (t.as_str(), d.as_str()))
    }

    /// Mantém, em cada grupo, apenas as tags que a planilha de correção mostra.
    ///
    /// `Z99` sai sempre, `PUNCT` fica sempre, as demais ficam só se tiverem
    /// descrição. A ordem dos grupos e das tags é preservada; grupos podem
    /// ficar vazios.
    pub fn known_tags(&self, groups: &[UsasTagGroup]) -> Vec<UsasTagGroup> {
        groups
            .iter()
            .map(|group| {
                UsasTagGroup::new(
                    group
                        .tags
                        .iter()
                        .filter(|tag| match tag.tag.as_str() {
                            UNMATCHED => false,
                            PUNCT => true,
                            code => self.contains(code),
                        })
                        .cloned()
                        .collect(),
                )
            })
            .collect()
    }
}

fn required_key(tag: &str, value: &Value, key: &'static str) -> Result<String> {
    let missing = || TaggingError::MissingKey {
        tag: tag.to_string(),
        key,
    };
    match value.get(key).ok_or_else(missing)? {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Err(missing()),
        other => Ok(serde_yaml::to_string(other)?.trim_end().to_string()),
    }
}
