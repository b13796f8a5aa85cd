use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use lendvault_crypto::testing::fixture_keypair;
use lendvault_crypto::unpack;
use lendvault_resilience::{
    upload_document, DocumentExchange, ExchangeError, ResilientExecutor, RetryPolicy, UploadToken,
};
use parking_lot::Mutex;

/// Fails every upload transiently until `fail_first` attempts have passed.
struct FlakyExchange {
    fail_first: u32,
    attempts: AtomicU32,
    received: Mutex<Option<Vec<u8>>>,
}

#[async_trait]
impl DocumentExchange for FlakyExchange {
    async fn fetch_upload_token(&self) -> Result<UploadToken, ExchangeError> {
        Ok(UploadToken {
            token: "tok".into(),
            upload_url: "https://sdx.test/upload".into(),
        })
    }

    async fn upload(&self, _token: &UploadToken, packed: &[u8]) -> Result<String, ExchangeError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.fail_first {
            return Err(ExchangeError::Transient(format!("attempt {attempt}")));
        }
        *self.received.lock() = Some(packed.to_vec());
        Ok("doc-ok".into())
    }
}

fn executor(max_attempts: u32) -> ResilientExecutor {
    ResilientExecutor::new(RetryPolicy {
        max_attempts,
        initial_delay_ms: 1,
        max_delay_ms: 4,
        backoff_multiplier: 2.0,
    })
}

#[tokio::test]
async fn recovers_within_attempt_budget() {
    let exchange = FlakyExchange {
        fail_first: 2,
        attempts: AtomicU32::new(0),
        received: Mutex::new(None),
    };
    let keys = fixture_keypair();
    let dyn_exchange: &dyn DocumentExchange = &exchange;

    let id = upload_document(dyn_exchange, &executor(3), b"tax return", keys.public_pem)
        .await
        .unwrap();
    assert_eq!(id, "doc-ok");
    assert_eq!(exchange.attempts.load(Ordering::SeqCst), 3);

    let packed = exchange.received.lock().clone().unwrap();
    assert_eq!(unpack(&packed, keys.private_pem).unwrap(), b"tax return");
}

#[tokio::test]
async fn surfaces_last_error_when_budget_spent() {
    let exchange = FlakyExchange {
        fail_first: u32::MAX,
        attempts: AtomicU32::new(0),
        received: Mutex::new(None),
    };
    let err = upload_document(&exchange, &executor(2), b"x", fixture_keypair().public_pem)
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::Transient(ref m) if m == "attempt 2"));
    assert_eq!(exchange.attempts.load(Ordering::SeqCst), 2);
    assert!(exchange.received.lock().is_none());
}
