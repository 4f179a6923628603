//! # Atributos de Token
//!
//! O pipeline de anotação externo (tagger, lematizador, POS) é opaco para o
//! núcleo. O que o núcleo precisa de cada token está na trait
//! [`TokenAttributes`]: texto, lema e POS opcionais, as tags USAS cruas e os
//! intervalos de MWE crus. Cada acesso pode falhar com um erro descritivo,
//! já que o valor vem de fora e pode ter o tipo errado.
//!
//! Dois adaptadores acompanham o crate:
//! - [`TokenAnnotation`]: struct tipada, para taggers escritos em Rust.
//! - [`JsonToken`]: um `serde_json::Value` por token, lido pelos nomes de
//!   [`FieldNames`]; nomes com ponto percorrem objetos aninhados.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::FieldNames;
use crate::error::{Result, TaggingError};
use crate::mwe::MweRange;

/// Acesso tipado aos atributos de um token anotado.
pub trait TokenAttributes {
    /// Texto de superfície.
    fn text(&self) -> Result<String>;
    /// Lema, ou `None` se o tagger não fornece lemas.
    fn lemma(&self) -> Result<Option<String>>;
    /// Classe gramatical, ou `None` se o tagger não fornece POS.
    fn pos(&self) -> Result<Option<String>>;
    /// Grupos de tags USAS crus, melhor primeiro (cada um pode ter `/`).
    fn usas_raw(&self) -> Result<Vec<String>>;
    /// Intervalos de MWE dos quais o token participa.
    fn mwe_raw(&self) -> Result<Vec<MweRange>>;
}

/// Um token já tipado. Os acessos nunca falham.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenAnnotation {
    pub text: String,
    #[serde(default)]
    pub lemma: Option<String>,
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub usas: Vec<String>,
    #[serde(default)]
    pub mwe: Vec<MweRange>,
}

impl TokenAttributes for TokenAnnotation {
    fn text(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn lemma(&self) -> Result<Option<String>> {
        Ok(self.lemma.clone())
    }

    fn pos(&self) -> Result<Option<String>> {
        Ok(self.pos.clone())
    }

    fn usas_raw(&self) -> Result<Vec<String>> {
        Ok(self.usas.clone())
    }

    fn mwe_raw(&self) -> Result<Vec<MweRange>> {
        Ok(self.mwe.clone())
    }
}

/// Um token representado como JSON, lido pelos nomes configurados.
#[derive(Debug, Clone)]
pub struct JsonToken {
    value: Value,
    fields: Arc<FieldNames>,
}

impl JsonToken {
    pub fn new(value: Value, fields: Arc<FieldNames>) -> Self {
        Self { value, fields }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Percorre o caminho `a.b.c`; `None` se algum trecho não existir.
    fn lookup(&self, name: &str) -> Option<&Value> {
        name.split('.')
            .try_fold(&self.value, |current, key| current.as_object()?.get(key))
    }

    fn required(&self, name: &str) -> Result<&Value> {
        self.lookup(name).ok_or_else(|| TaggingError::MissingAttribute {
            attribute: name.to_string(),
        })
    }

    fn string(&self, name: &str) -> Result<String> {
        let value = self.required(name)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| type_error(name, "string", value))
    }

    fn optional_string(&self, name: Option<&String>) -> Result<Option<String>> {
        name.map(|name| self.string(name)).transpose()
    }
}

impl TokenAttributes for JsonToken {
    fn text(&self) -> Result<String> {
        self.string(&self.fields.token_text_field)
    }

    fn lemma(&self) -> Result<Option<String>> {
        self.optional_string(self.fields.lemma_field.as_ref())
    }

    fn pos(&self) -> Result<Option<String>> {
        self.optional_string(self.fields.pos_field.as_ref())
    }

    fn usas_raw(&self) -> Result<Vec<String>> {
        let name = &self.fields.usas_field;
        let value = self.required(name)?;
        let items = value
            .as_array()
            .ok_or_else(|| type_error(name, "list of strings", value))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| type_error(name, "list of strings", item))
            })
            .collect()
    }

    fn mwe_raw(&self) -> Result<Vec<MweRange>> {
        let name = &self.fields.mwe_field;
        let value = self.required(name)?;
        let items = value
            .as_array()
            .ok_or_else(|| type_error(name, "list of (start, end) pairs", value))?;
        items.iter().map(|item| mwe_pair(name, item)).collect()
    }
}

fn mwe_pair(name: &str, item: &Value) -> Result<MweRange> {
    let bound = |v: &Value| v.as_u64().and_then(|n| usize::try_from(n).ok());
    match item.as_array().map(Vec::as_slice) {
        Some([start, end]) => match (bound(start), bound(end)) {
            (Some(start), Some(end)) => Ok(MweRange::new(start, end)),
            _ => Err(type_error(name, "list of (start, end) pairs", item)),
        },
        _ => Err(type_error(name, "list of (start, end) pairs", item)),
    }
}

fn type_error(name: &str, expected: &'static str, found: &Value) -> TaggingError {
    TaggingError::AttributeType {
        attribute: name.to_string(),
        expected,
        actual: json_type_name(found),
    }
}

/// Nome do tipo JSON para mensagens de erro.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_u64() || n.is_i64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token(value: Value, fields: FieldNames) -> JsonToken {
        JsonToken::new(value, Arc::new(fields))
    }

    fn nile() -> Value {
        json!({
            "text": "Nile",
            "lemma_": "Nile",
            "tag_": "NOUN",
            "_": {
                "pymusas_tags": ["Z3", "Z2"],
                "pymusas_mwe_indexes": [[0, 1], [2, 4]]
            }
        })
    }

    #[test]
    fn test_json_token_default_fields() {
        let t = token(nile(), FieldNames::default());
        assert_eq!(t.text().unwrap(), "Nile");
        assert_eq!(t.lemma().unwrap(), None);
        assert_eq!(t.pos().unwrap(), None);
        assert_eq!(t.usas_raw().unwrap(), vec!["Z3", "Z2"]);
        assert_eq!(
            t.mwe_raw().unwrap(),
            vec![MweRange::new(0, 1), MweRange::new(2, 4)]
        );
    }

    #[test]
    fn test_json_token_configured_lemma_and_pos() {
        let fields = FieldNames::default().with_lemma_field("lemma_").with_pos_field("tag_");
        let t = token(nile(), fields);
        assert_eq!(t.lemma().unwrap().as_deref(), Some("Nile"));
        assert_eq!(t.pos().unwrap().as_deref(), Some("NOUN"));
    }

    #[test]
    fn test_json_token_wrong_usas_type() {
        let mut value = nile();
        value["_"]["pymusas_tags"] = json!("W");
        let err = token(value, FieldNames::default()).usas_raw().unwrap_err();
        match err {
            TaggingError::AttributeType { attribute, expected, actual } => {
                assert_eq!(attribute, "_.pymusas_tags");
                assert_eq!(expected, "list of strings");
                assert_eq!(actual, "string");
            }
            other => panic!("erro inesperado: {other}"),
        }
    }

    #[test]
    fn test_json_token_wrong_item_types() {
        let mut value = nile();
        value["_"]["pymusas_tags"] = json!(["Z3", 5]);
        value["_"]["pymusas_mwe_indexes"] = json!([[0, 1, 2]]);
        let t = token(value, FieldNames::default());
        assert!(matches!(
            t.usas_raw(),
            Err(TaggingError::AttributeType { actual: "integer", .. })
        ));
        assert!(matches!(t.mwe_raw(), Err(TaggingError::AttributeType { .. })));

        let mut value = nile();
        value["_"]["pymusas_mwe_indexes"] = json!([[-1, 2]]);
        assert!(token(value, FieldNames::default()).mwe_raw().is_err());
    }

    #[test]
    fn test_json_token_missing_attribute() {
        let fields = FieldNames::default().with_lemma_field("lemma");
        let t = token(nile(), fields);
        assert!(matches!(
            t.lemma(),
            Err(TaggingError::MissingAttribute { ref attribute }) if attribute == "lemma"
        ));

        let t = token(json!({"text": "x"}), FieldNames::default());
        assert!(matches!(t.usas_raw(), Err(TaggingError::MissingAttribute { .. })));
    }

    #[test]
    fn test_json_token_wrong_text_type() {
        let t = token(json!({"text": 3}), FieldNames::default());
        assert!(matches!(
            t.text(),
            Err(TaggingError::AttributeType { expected: "string", actual: "integer", .. })
        ));
    }

    #[test]
    fn test_token_annotation_from_json() {
        let annotation: TokenAnnotation = serde_json::from_value(json!({
            "text": "river",
            "usas": ["Z3/Z2"],
            "mwe": [[2, 4]]
        }))
        .unwrap();
        assert_eq!(annotation.lemma().unwrap(), None);
        assert_eq!(annotation.usas_raw().unwrap(), vec!["Z3/Z2"]);
        assert_eq!(annotation.mwe_raw().unwrap(), vec![MweRange::new(2, 4)]);
    }
}
