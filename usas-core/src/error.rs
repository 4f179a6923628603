//! # Erros do Pipeline de Anotação USAS
//!
//! Todas as falhas do núcleo são variantes de [`TaggingError`]. Nenhuma delas é
//! recuperável dentro de uma unidade de texto (sentença): a unidade é descartada
//! e quem chamou decide se continua com as próximas ou aborta o lote inteiro.

use std::path::PathBuf;

use thiserror::Error;

/// Erros que podem ocorrer ao montar um [`TaggedText`](crate::TaggedText).
#[derive(Debug, Error)]
pub enum TaggingError {
    /// Um atributo do token existe, mas tem o tipo errado.
    #[error("attribute `{attribute}` has the wrong type: expected {expected}, found {actual}")]
    AttributeType {
        attribute: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Um atributo obrigatório não foi encontrado no token.
    #[error("attribute `{attribute}` is missing from the token")]
    MissingAttribute { attribute: String },

    /// A string da tag não segue a gramática código + marcadores.
    #[error("invalid USAS tag `{input}`: {reason}")]
    TagParse { input: String, reason: String },

    /// Um intervalo de MWE invertido ou fora da sentença.
    #[error("invalid MWE range [{start}, {end}) on token {token}: sentence has {len} tokens")]
    InvalidMweRange {
        token: usize,
        start: usize,
        end: usize,
        len: usize,
    },

    /// Sequências paralelas do registro com comprimentos diferentes.
    #[error("`{field}` has length {actual}, expected {expected} (one entry per token)")]
    RecordInvariant {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// O pipeline não sabe detectar fronteiras de sentença.
    #[error("the annotation pipeline does not support sentence splitting")]
    SplitterCapability,

    /// Fronteira de sentença fora do texto (ou no meio de um caractere).
    #[error("sentence boundary [{start}, {end}) is not a valid slice of a text of {len} bytes")]
    InvalidSentenceBoundary { start: usize, end: usize, len: usize },

    /// Configuração de nomes de campos inválida.
    #[error("invalid field configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Falha ao ler um arquivo.
    #[error("failed to read {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// O caminho existe, mas não é um arquivo.
    #[error("{} is not a file", path.display())]
    NotAFile { path: PathBuf },

    /// YAML malformado no arquivo de descrições.
    #[error("invalid USAS description YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Entrada do mapeador sem `title` ou `description`.
    #[error("USAS tag `{tag}` has no `{key}`")]
    MissingKey { tag: String, key: &'static str },

    /// A mesma tag aparece duas vezes no arquivo de descrições.
    #[error("USAS tag `{tag}` is described more than once")]
    DuplicateTag { tag: String },
}

/// Tipo `Result` usado em todo o crate.
pub type Result<T> = std::result::Result<T, TaggingError>;
