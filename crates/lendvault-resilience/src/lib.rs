//! Retry/backoff execution and the secure document upload flow built on it.
//!
//! Cryptography stays deterministic and is never retried here. Only the
//! network calls around it are.

mod error;
mod executor;
mod policy;
mod sdx;

pub use error::ExchangeError;
pub use executor::{ResilientExecutor, Retryable};
pub use policy::RetryPolicy;
pub use sdx::{upload_document, DocumentExchange, UploadToken};
