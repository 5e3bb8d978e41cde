//! Timeout enforcement for provider calls.

use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use crate::providers::types::{ProviderError, ProviderResult};

/// Run `fut` with a deadline, mapping expiry to [`ProviderError::Timeout`].
pub async fn with_timeout<T, F>(limit: Duration, fut: F) -> ProviderResult<T>
where
    F: Future<Output = ProviderResult<T>>,
{
    match timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_slow_call_times_out() {
        let result: ProviderResult<u8> = with_timeout(Duration::from_secs(5), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(1)
        })
        .await;
        assert_eq!(result, Err(ProviderError::Timeout(Duration::from_secs(5))));
    }

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let ok: ProviderResult<u8> = with_timeout(Duration::from_secs(5), async { Ok(7) }).await;
        assert_eq!(ok, Ok(7));

        let err: ProviderResult<u8> =
            with_timeout(Duration::from_secs(5), async { Err(ProviderError::Status(429)) }).await;
        assert_eq!(err, Err(ProviderError::Status(429)));
    }
}
