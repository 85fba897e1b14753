//! Wait for a freshly started service to answer `GET /info`.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::client::ApiClient;
use crate::error::ReadinessError;
use crate::transport::Transport;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Poll the metadata endpoint until it returns 200 or `timeout` elapses.
///
/// Connection failures and non-200 statuses are both treated as "not yet".
pub fn wait_until_ready<T: Transport>(
    client: &ApiClient<T>,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<(), ReadinessError> {
    let started = Instant::now();
    loop {
        match client.fetch_metadata() {
            Ok(response) if response.status == 200 => {
                info!(base_url = client.base_url(), elapsed = ?started.elapsed(), "service is ready");
                return Ok(());
            }
            Ok(response) => debug!(status = response.status, "service not ready"),
            Err(err) => debug!(error = %err, "service not reachable"),
        }

        let waited = started.elapsed();
        if waited >= timeout {
            return Err(ReadinessError::Timeout {
                base_url: client.base_url().to_string(),
                waited,
            });
        }
        thread::sleep(poll_interval.min(timeout - waited));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::TransportError;
    use crate::http::{HttpRequest, HttpResponse};

    /// Answers 503 for the first `warmup` requests, then 200.
    struct Warming {
        warmup: usize,
        seen: AtomicUsize,
    }

    impl Transport for Warming {
        fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let n = self.seen.fetch_add(1, Ordering::SeqCst);
            let status = if n < self.warmup { 503 } else { 200 };
            Ok(HttpResponse {
                status,
                reason: String::new(),
                headers: Vec::new(),
                body: String::new(),
            })
        }
    }

    fn warming(warmup: usize) -> ApiClient<Warming> {
        ApiClient::with_transport(
            "http://alaska.test",
            Warming {
                warmup,
                seen: AtomicUsize::new(0),
            },
        )
    }

    #[test]
    fn returns_once_info_answers_ok() {
        let client = warming(3);
        wait_until_ready(&client, Duration::from_secs(5), Duration::from_millis(1)).unwrap();
    }

    #[test]
    fn times_out_with_base_url_in_message() {
        let client = warming(usize::MAX);
        let err = wait_until_ready(&client, Duration::from_millis(20), Duration::from_millis(5)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Waited too long for the http://alaska.test to start accepting connections."
        );
    }
}
