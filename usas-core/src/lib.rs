//! # usas-core — Montagem de Textos Anotados com Tags Semânticas USAS
//!
//! Este crate fica entre um pipeline de anotação externo (tagger USAS, lematizador,
//! POS) e o registro validado que vai para a planilha de correção humana.
//! Ele não decide quais tags um token recebe; ele normaliza o que o tagger entrega.
//!
//! ## Arquitetura do Sistema
//!
//! 1.  **Entrada**: Texto bruto (String) e um [`Annotator`] externo.
//! 2.  **Divisão em Sentenças** ([`sentence`]): opcional; cada sentença é uma unidade.
//! 3.  **Atributos** ([`attributes`]): leitura tipada e verificada de cada token.
//! 4.  **Tags** ([`tag`], [`tag_group`]): "Z3/Z2 A1.1.1+" → grupos de [`UsasTag`].
//! 5.  **MWE** ([`mwe`]): intervalos por token → IDs de grupo pequenos e estáveis.
//! 6.  **Saída**: um [`TaggedText`] por unidade, com comprimentos verificados.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use usas_core::{tag_text_to_vec, Annotator, MweRange, Result, TokenAnnotation, UnicodeSentencizer};
//!
//! struct Tagger;
//!
//! impl Annotator for Tagger {
//!     type Token = TokenAnnotation;
//!
//!     fn annotate(&self, text: &str) -> Result<Vec<TokenAnnotation>> {
//!         let words: Vec<&str> = text.split_whitespace().collect();
//!         Ok(words
//!             .iter()
//!             .map(|word| TokenAnnotation {
//!                 text: word.to_string(),
//!                 usas: vec!["Z99".to_string()],
//!                 // a sentença inteira é uma MWE
//!                 mwe: vec![MweRange::new(0, words.len())],
//!                 ..TokenAnnotation::default()
//!             })
//!             .collect())
//!     }
//! }
//!
//! let splitter = UnicodeSentencizer::default();
//! let records = tag_text_to_vec("Hello there. Bye now.", &Tagger, Some(&splitter)).unwrap();
//! assert_eq!(records.len(), 2);
//! assert!(records[0].mwe_indexes().iter().all(|ids| ids.contains(&1)));
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: Orquestrador que conecta todos os estágios.
//! - [`tagged_text`]: O registro de saída e suas invariantes.
//! - [`mapper`]: Descrições das tags USAS para a planilha.

pub mod attributes;
pub mod config;
pub mod error;
pub mod mapper;
pub mod mwe;
pub mod pipeline;
pub mod sentence;
pub mod tag;
pub mod tag_group;
pub mod tagged_text;

pub use attributes::{JsonToken, TokenAnnotation, TokenAttributes};
pub use config::FieldNames;
pub use error::{Result, TaggingError};
pub use mapper::UsasMapper;
pub use mwe::{resolve_mwe_indexes, MweRange};
pub use pipeline::{tag_text, tag_text_to_vec, tag_unit, Annotator, JsonAnnotator, TaggedTexts};
pub use sentence::{annotator_sentence_splitter, SentenceSplitter, UnicodeSentencizer};
pub use tag::{parse_usas_tag, UsasTag, UsasTagGroup};
pub use tag_group::parse_usas_tag_groups;
pub use tagged_text::TaggedText;
