//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use invoke_adapter::config::ServiceConfig;
use invoke_adapter::invocation::{
    BoxFuture, HandlerOutcome, InvocationContext, InvocationEvent, InvocationHandler,
    InvocationResult,
};
use invoke_adapter::lifecycle::Shutdown;
use invoke_adapter::Service;
use tokio::net::TcpListener;

/// Echo handler that counts how often it ran.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CountingEcho {
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl CountingEcho {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn shared(&self) -> Arc<dyn InvocationHandler> {
        Arc::new(self.clone())
    }
}

impl InvocationHandler for CountingEcho {
    fn invoke(
        &self,
        _ctx: InvocationContext,
        event: InvocationEvent,
    ) -> BoxFuture<'static, HandlerOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(Some(InvocationResult::new(event.content_type, event.data))) })
    }
}

/// Config bound to an ephemeral loopback port, optionally with a token.
pub fn test_config(token: Option<&str>) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.auth.api_token = token.map(str::to_owned);
    config
}

/// Serve `service` on an ephemeral port until the returned handle is triggered.
pub async fn start_service(service: Service) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = service.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
