//! Scoped setup for end-to-end scenarios.
//!
//! `Fixture::start()` launches the reference server on a random port, waits
//! for `/info`, clears the collection and hands out a client. Dropping the
//! fixture stops the server. Setting `ALASKA_EXTERNAL=1` points the fixture at
//! the service described by `HarnessConfig::from_env()` instead; run with
//! `--test-threads=1` in that mode since all tests share one collection.

#![allow(dead_code)]

use std::sync::Once;

use alaska_core::{assert_response_code, wait_until_ready, ApiClient, HarnessConfig, DEFAULT_POLL_INTERVAL};
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

pub const EXTERNAL_VAR: &str = "ALASKA_EXTERNAL";

pub struct Fixture {
    pub client: ApiClient,
    server: Option<LocalServer>,
}

struct LocalServer {
    shutdown: oneshot::Sender<()>,
}

impl Fixture {
    pub fn start() -> Self {
        init_logging();
        let config = HarnessConfig::from_env().unwrap();

        let (base_url, server) = if std::env::var_os(EXTERNAL_VAR).is_some() {
            (config.base_url(), None)
        } else {
            let (addr, server) = spawn_server();
            (format!("http://{addr}"), Some(server))
        };

        let client = ApiClient::new(&base_url);
        wait_until_ready(&client, config.connect_timeout, DEFAULT_POLL_INTERVAL).unwrap();

        let fixture = Self { client, server };
        fixture.clear();
        fixture
    }

    /// Empty the collection; every scenario starts from here.
    pub fn clear(&self) {
        let resp = self.client.delete_all().unwrap();
        assert_response_code(&resp, 200, true);
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        if let Some(server) = self.server.take() {
            let _ = server.shutdown.send(());
        }
    }
}

fn spawn_server() -> (std::net::SocketAddr, LocalServer) {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let (shutdown, signal) = oneshot::channel::<()>();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            alaska_server::run_until(listener, async {
                let _ = signal.await;
            })
            .await
        })
        .unwrap();
    });

    (addr, LocalServer { shutdown })
}

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
