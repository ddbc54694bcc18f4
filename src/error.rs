use reqwest::Error as REQWEST_ERROR;
use std::num::TryFromIntError as TRY_FROM_INT_ERROR;
use std::string::FromUtf8Error as FROM_UTF8_ERROR;
use std::{
    env::VarError, io::Error as IO_ERROR, num::ParseFloatError,
    num::ParseIntError,
};
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError as TRACING_GLOBAL_DEFAULT_ERROR;
use url::ParseError as URL_ERROR;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] IO_ERROR),

    #[error("{0}")]
    URL(#[from] URL_ERROR),

    #[error("{0}")]
    INT(#[from] ParseIntError),

    #[error("{0}")]
    FLOAT(#[from] ParseFloatError),

    #[error("{0}")]
    VAR(#[from] VarError),

    #[error("{0}")]
    ReqwestError(#[from] REQWEST_ERROR),

    #[error("{0}")]
    TryFromIntError(#[from] TRY_FROM_INT_ERROR),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Token not configured: {0}")]
    NotSupportedToken(String),

    #[error("Subgraph error: {0}")]
    GraphQLError(String),

    #[error("Parse amount error: {0}")]
    ParseAmount(String),

    #[error("Report error: {0}")]
    ReportError(String),

    #[error("FromUtf8Error error: {0}")]
    FromUtf8Error(#[from] FROM_UTF8_ERROR),

    #[error("Decode datetime: {0}")]
    DecodeDateTimeError(String),

    #[error("Tracing error: {0}")]
    SetGlobalDefaultError(#[from] TRACING_GLOBAL_DEFAULT_ERROR),
}
