use axum::http::StatusCode;
use thiserror::Error;

/// Failures reported by a [`Store`](crate::storage::Store).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("value of {size} bytes exceeds store capacity of {limit} bytes")]
    CapacityExceeded { size: usize, limit: usize },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Failures reported by the harvest ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid quantity: {input:?}")]
    InvalidQuantity { input: String },

    #[error("ledger has no records")]
    EmptyLedger,

    /// The persisted snapshot could not be read back. The ledger is reset to empty.
    #[error("corrupt ledger data: {0}")]
    CorruptData(String),

    #[error("index {index} out of range for {len} records")]
    IndexOutOfRange { index: usize, len: usize },

    /// The in-memory mutation was applied but the snapshot was not saved.
    #[error("failed to persist ledger: {0}")]
    PersistenceWriteFailure(#[source] StoreError),
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidQuantity { .. } => {
                Self::bad_request("Digite um número válido de ovos!")
            }
            LedgerError::EmptyLedger => Self::bad_request("Não há dados para exportar!"),
            LedgerError::IndexOutOfRange { .. } => Self::not_found("Dia não encontrado!"),
            LedgerError::PersistenceWriteFailure(_) => Self::internal("Erro ao salvar dados!"),
            LedgerError::CorruptData(_) => Self::internal("Erro ao carregar dados!"),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
