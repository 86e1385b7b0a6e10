//! Ошибки внешних вызовов страницы
//!
//! Every network or platform call returns one of these instead of swallowing the
//! failure, so the view can show it and offer a retry.

use thiserror::Error;

/// Ошибка GET-запроса (каталог, штаты, города)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Falha de rede: {0}")]
    Network(String),

    #[error("Servidor respondeu HTTP {0}")]
    Status(u16),

    #[error("Resposta inválida: {0}")]
    Decode(String),
}

/// Ошибка определения местоположения устройства
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Permissão de localização negada")]
    Denied,

    #[error("Localização indisponível: {0}")]
    Unavailable(String),
}

/// Ошибка отправки формы
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Falha de rede ao cadastrar: {0}")]
    Network(String),

    #[error("Dados recusados pelo servidor: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Erro do servidor (HTTP {0}): {1}")]
    Server(u16, String),
}
