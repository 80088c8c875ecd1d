use std::fmt;

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Question-bank source errors
    Bank(BankError),
    /// AI solve-request errors
    Solve(SolveError),
    /// Local storage errors
    Storage(StorageError),
    /// Exam engine precondition violations
    Engine(EngineError),
    /// Configuration errors
    Config(ConfigError),
    /// Anything else (wraps third-party errors)
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Bank(e) => write!(f, "soru havuzu hatası: {}", e),
            AppError::Solve(e) => write!(f, "AI çözüm hatası: {}", e),
            AppError::Storage(e) => write!(f, "depolama hatası: {}", e),
            AppError::Engine(e) => write!(f, "sınav motoru hatası: {}", e),
            AppError::Config(e) => write!(f, "yapılandırma hatası: {}", e),
            AppError::Other(msg) => write!(f, "hata: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Bank(e) => Some(e),
            AppError::Solve(e) => Some(e),
            AppError::Storage(e) => Some(e),
            AppError::Engine(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// Question-bank source errors.
#[derive(Debug)]
pub enum BankError {
    /// The flat-file pool is unreachable or empty; an exam must not start.
    Unavailable {
        exam_type: String,
        reason: String,
    },
    /// Network request toward the bank endpoints failed
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The bank file could not be read
    FileUnreadable {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankError::Unavailable { exam_type, reason } => {
                write!(f, "{} soru havuzu kullanılamıyor: {}", exam_type, reason)
            }
            BankError::RequestFailed { endpoint, source } => {
                write!(f, "soru havuzu isteği başarısız ({}): {}", endpoint, source)
            }
            BankError::FileUnreadable { path, source } => {
                write!(f, "soru dosyası okunamadı ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for BankError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BankError::RequestFailed { source, .. } | BankError::FileUnreadable { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            BankError::Unavailable { .. } => None,
        }
    }
}

/// AI solve-request errors.
///
/// A model reply that fails to parse is NOT in this list: it degrades into a
/// usable `ProblemSolution` instead of surfacing as an error.
#[derive(Debug)]
pub enum SolveError {
    /// Neither an image nor a question text was provided; caught before any
    /// network call.
    MissingInput,
    /// Transport or endpoint failure; retryable by the user with the cached
    /// capture.
    RequestFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The model returned no content at all
    EmptyResponse {
        model: String,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::MissingInput => {
                write!(f, "soru fotoğrafı veya soru metni gerekli")
            }
            SolveError::RequestFailed { model, source } => {
                write!(f, "AI isteği başarısız (model: {}): {}", model, source)
            }
            SolveError::EmptyResponse { model } => {
                write!(f, "AI yanıtı boş (model: {})", model)
            }
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::RequestFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// Local storage errors. Write failures are logged and reported but never
/// roll back an in-memory computation.
#[derive(Debug)]
pub enum StorageError {
    ReadFailed {
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    WriteFailed {
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    Corrupted {
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ReadFailed { key, source } => {
                write!(f, "anahtar okunamadı ({}): {}", key, source)
            }
            StorageError::WriteFailed { key, source } => {
                write!(f, "anahtar yazılamadı ({}): {}", key, source)
            }
            StorageError::Corrupted { key, source } => {
                write!(f, "kayıt çözümlenemedi ({}): {}", key, source)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::ReadFailed { source, .. }
            | StorageError::WriteFailed { source, .. }
            | StorageError::Corrupted { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// Exam engine precondition violations. These are programming errors in the
/// caller, not user-facing failures, and are never silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("sınav aktif değil")]
    NotInProgress,
    #[error("gösterilen soru yok")]
    NoQuestion,
    #[error("cevap seçilmedi")]
    NoSelection,
    #[error("seçenek {index} aralık dışı (seçenek sayısı: {options})")]
    OptionOutOfRange { index: usize, options: usize },
    #[error("soru zaten cevaplandı")]
    AlreadyAnswered,
    #[error("mevcut soru cevaplanmadan ilerlenemez")]
    NotAnswered,
    #[error("bilinmeyen ders: {0}")]
    UnknownSubject(String),
    #[error("soru havuzu boş")]
    EmptyBank,
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "ortam değişkeni {} çözümlenemedi: '{}' değeri {} değil",
                    var_name, value, expected_type
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== Conversions from common error types ==========

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError::Engine(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Other(format!("JSON hatası: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Other(format!("G/Ç hatası: {}", err))
    }
}

// ========== Convenience constructors ==========

impl AppError {
    /// Fatal bank failure: the flat-file pool is unreachable or empty.
    pub fn bank_unavailable(exam_type: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Bank(BankError::Unavailable {
            exam_type: exam_type.into(),
            reason: reason.into(),
        })
    }

    /// Bank endpoint request failure.
    pub fn bank_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Bank(BankError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// Solve transport failure.
    pub fn solve_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Solve(SolveError::RequestFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// Storage write failure.
    pub fn storage_write_failed(
        key: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Storage(StorageError::WriteFailed {
            key: key.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result type alias ==========

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;
