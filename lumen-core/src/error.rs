//! Erros da cadeia de sinal
//!
//! A computação em si nunca falha: casos degenerados seguem a semântica
//! IEEE-754. Estes erros só aparecem em checagens opcionais de faixa e na
//! carga de parâmetros feita por quem chama a biblioteca.

use thiserror::Error;

pub type LumenResult<T> = Result<T, LumenError>;

#[derive(Debug, Error)]
pub enum LumenError {
    #[error("{field} = {value} is outside the documented range ({expected})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
