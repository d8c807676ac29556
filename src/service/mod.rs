use crate::{
    error::DispatchError,
    models::{AttemptRecord, DispatchResult, EmailRecord},
    providers::{Provider, Providers},
};

/// Per-request dispatch settings taken from the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    pub provider: Provider,
    pub retry: bool,
    pub fallback: bool,
}

pub struct EmailService {
    providers: Providers,
    max_retries: u32,
}

impl EmailService {
    pub const fn new(providers: Providers, max_retries: u32) -> Self {
        Self {
            providers,
            max_retries,
        }
    }

    /// Sends through the chosen provider, then through the alternate one if
    /// that failed and fallback is enabled. Attempts from both runs are kept.
    pub async fn dispatch(
        &self,
        record: EmailRecord,
        options: DispatchOptions,
    ) -> Result<DispatchResult, DispatchError> {
        let mut attempts = Vec::new();

        let mut final_attempt = self
            .send_with_retry(options.provider, &record, options.retry, &mut attempts)
            .await?;

        if !final_attempt.is_success() && options.fallback {
            let alternate = options.provider.alternate();
            tracing::warn!(
                "{} failed with status {}, falling back to {}",
                options.provider,
                final_attempt.status_code,
                alternate
            );
            final_attempt = self
                .send_with_retry(alternate, &record, options.retry, &mut attempts)
                .await?;
        }

        Ok(DispatchResult {
            email_data: record,
            send_success: final_attempt.is_success(),
            attempts,
            final_attempt,
        })
    }

    /// Runs up to `max_retries + 1` attempts against one provider, stopping at
    /// the first status outside 400..=599. Returns the last attempt made.
    async fn send_with_retry(
        &self,
        provider: Provider,
        record: &EmailRecord,
        retry: bool,
        attempts: &mut Vec<AttemptRecord>,
    ) -> Result<AttemptRecord, DispatchError> {
        let budget = if retry {
            self.max_retries.saturating_add(1)
        } else {
            1
        };
        let mut attempt_no = 0;

        loop {
            attempt_no += 1;
            let attempt = self
                .providers
                .send(provider, record)
                .await
                .map_err(|source| {
                    tracing::error!("Failed to reach {}: {}", provider, source);
                    DispatchError::Transport {
                        provider: provider.name(),
                        source,
                    }
                })?;

            tracing::debug!(
                "Attempt {}/{} via {} returned status {}",
                attempt_no,
                budget,
                provider,
                attempt.status_code
            );
            attempts.push(attempt.clone());

            if !attempt.is_retryable() || attempt_no >= budget {
                return Ok(attempt);
            }

            tracing::warn!(
                "{} returned status {}, retrying ({}/{})",
                provider,
                attempt.status_code,
                attempt_no,
                self.max_retries
            );
        }
    }
}
