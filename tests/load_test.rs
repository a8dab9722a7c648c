//! Concurrency and isolation testing for the invocation service.

use std::time::{Duration, Instant};

use invoke_adapter::invocation::InvocationResult;
use invoke_adapter::Service;

mod common;

#[tokio::test]
async fn test_concurrent_requests_are_isolated() {
    let mut service = Service::new(common::test_config(None)).unwrap();
    service
        .add_invocation_handler("/isolate", |ctx, event| async move {
            // Hold the request open so invocations overlap.
            tokio::time::sleep(Duration::from_millis(20)).await;
            let caller = ctx.metadata().get_first("x-caller").unwrap_or_default().to_string();
            let body = format!("{caller}:{}", String::from_utf8_lossy(&event.data));
            Ok(Some(InvocationResult::new("text/plain", body)))
        })
        .unwrap();
    let (addr, shutdown) = common::start_service(service).await;

    let concurrency = 20;
    let requests_per_task = 10;
    let client = common::client();
    let url = format!("http://{addr}/isolate");
    let start = Instant::now();

    let mut tasks = Vec::new();
    for task_id in 0..concurrency {
        let client = client.clone();
        let url = url.clone();
        tasks.push(tokio::spawn(async move {
            let mut mismatches = Vec::new();
            for seq in 0..requests_per_task {
                let payload = format!("payload-{task_id}-{seq}");
                let res = client
                    .post(&url)
                    .header("x-caller", format!("caller-{task_id}"))
                    .body(payload.clone())
                    .send()
                    .await
                    .unwrap();
                let body = res.text().await.unwrap();
                let expected = format!("caller-{task_id}:{payload}");
                if body != expected {
                    mismatches.push((expected, body));
                }
            }
            mismatches
        }));
    }

    let mut mismatches = Vec::new();
    for task in tasks {
        mismatches.extend(task.await.unwrap());
    }

    tracing::info!(
        total = concurrency * requests_per_task,
        elapsed = ?start.elapsed(),
        "Concurrent invocations finished"
    );
    assert!(mismatches.is_empty(), "cross-request leakage: {mismatches:?}");

    shutdown.trigger();
}
