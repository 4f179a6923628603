//! Configuração dos nomes de campos lidos de cada token.
//!
//! Pode ser escrita em TOML:
//!
//! ```toml
//! lemma_field = "lemma_"
//! pos_field = "pos_"
//! usas_field = "_.pymusas_tags"
//! mwe_field = "_.pymusas_mwe_indexes"
//! ```
//!
//! Nomes com ponto são caminhos aninhados (`"_.pymusas_tags"` lê
//! `token["_"]["pymusas_tags"]`).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaggingError};

/// Nomes dos atributos de token usados pelo adaptador.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldNames {
    /// Texto de superfície do token.
    pub token_text_field: String,
    /// Ausente ⇒ lemas omitidos da saída.
    pub lemma_field: Option<String>,
    /// Ausente ⇒ classes gramaticais omitidas da saída.
    pub pos_field: Option<String>,
    pub usas_field: String,
    pub mwe_field: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            token_text_field: "text".to_string(),
            lemma_field: None,
            pos_field: None,
            usas_field: "_.pymusas_tags".to_string(),
            mwe_field: "_.pymusas_mwe_indexes".to_string(),
        }
    }
}

impl FieldNames {
    pub fn with_lemma_field(mut self, name: impl Into<String>) -> Self {
        self.lemma_field = Some(name.into());
        self
    }

    pub fn with_pos_field(mut self, name: impl Into<String>) -> Self {
        self.pos_field = Some(name.into());
        self
    }

    pub fn with_usas_field(mut self, name: impl Into<String>) -> Self {
        self.usas_field = name.into();
        self
    }

    pub fn with_mwe_field(mut self, name: impl Into<String>) -> Self {
        self.mwe_field = name.into();
        self
    }

    /// Lê a configuração de um texto TOML; campos omitidos usam o padrão.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Lê a configuração de um arquivo TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| TaggingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
