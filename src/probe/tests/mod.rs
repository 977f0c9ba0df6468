use std::future::Future;
use std::net::SocketAddr;
use std::num::{NonZeroU32, NonZeroU64, NonZeroUsize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::error::{AppError, AppResult, ProbeError};

use super::http::status_note;
use super::retry::with_retry;
use super::*;


const TEST_TIMEOUT: Duration = Duration::from_secs(2);
const RUN_DEADLINE: Duration = Duration::from_secs(5);

const OK_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok";
const SERVER_ERROR_RESPONSE: &[u8] =
    b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

fn non_zero_u32(value: u32) -> AppResult<NonZeroU32> {
    NonZeroU32::new(value).ok_or_else(|| AppError::validation("Expected a non-zero u32"))
}

fn non_zero_u64(value: u64) -> AppResult<NonZeroU64> {
    NonZeroU64::new(value).ok_or_else(|| AppError::validation("Expected a non-zero u64"))
}

fn non_zero_usize(value: usize) -> AppResult<NonZeroUsize> {
    NonZeroUsize::new(value).ok_or_else(|| AppError::validation("Expected a non-zero usize"))
}

fn test_config(
    url: &str,
    retries: u32,
    concurrency: usize,
    requests: u64,
) -> AppResult<ProbeConfig> {
    Ok(ProbeConfig {
        target: Target::parse(url).map_err(AppError::from)?,
        retries: non_zero_u32(retries)?,
        deadline: RUN_DEADLINE,
        concurrency: non_zero_usize(concurrency)?,
        requests: non_zero_u64(requests)?,
    })
}

fn test_client() -> AppResult<reqwest::Client> {
    reqwest::Client::builder().build().map_err(AppError::from)
}

/// Serves `connections` sequentially, answering each with `response`. An
/// empty response closes the connection without answering, which the client
/// sees as a transport error. Connections that send nothing are tolerated,
/// as a bare TCP connect does.
async fn spawn_http_server(
    connections: usize,
    response: &'static [u8],
) -> AppResult<(SocketAddr, JoinHandle<AppResult<()>>)> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(AppError::from)?;
    let addr = listener.local_addr().map_err(AppError::from)?;

    let task = tokio::spawn(async move {
        for _ in 0..connections {
            let (mut stream, _) = timeout(TEST_TIMEOUT, listener.accept())
                .await
                .map_err(|_| AppError::validation("Timed out waiting for a connection"))?
                .map_err(AppError::from)?;

            let mut buffer = [0u8; 1024];
            let read = timeout(TEST_TIMEOUT, stream.read(&mut buffer))
                .await
                .map_err(|_| AppError::validation("Timed out reading a request"))?
                .unwrap_or(0);
            if read == 0 || response.is_empty() {
                continue;
            }
            stream.write_all(response).await.map_err(AppError::from)?;
        }
        Ok(())
    });

    Ok((addr, task))
}

/// Serves `connections` concurrently, delaying each response so overlapping
/// requests are observable. Returns the peak number of connections that
/// were in flight at once.
async fn spawn_tracking_server(
    connections: usize,
    delay: Duration,
) -> AppResult<(SocketAddr, Arc<AtomicUsize>, JoinHandle<AppResult<()>>)> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(AppError::from)?;
    let addr = listener.local_addr().map_err(AppError::from)?;
    let peak = Arc::new(AtomicUsize::new(0));
    let peak_for_server = Arc::clone(&peak);

    let task = tokio::spawn(async move {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let mut handlers = Vec::with_capacity(connections);

        for _ in 0..connections {
            let (mut stream, _) = timeout(TEST_TIMEOUT, listener.accept())
                .await
                .map_err(|_| AppError::validation("Timed out waiting for a connection"))?
                .map_err(AppError::from)?;

            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak_for_server);
            handlers.push(tokio::spawn(async move {
                let current = in_flight.fetch_add(1, Ordering::SeqCst).saturating_add(1);
                peak.fetch_max(current, Ordering::SeqCst);

                let mut buffer = [0u8; 1024];
                let read = stream.read(&mut buffer).await.unwrap_or(0);
                tokio::time::sleep(delay).await;
                let responded = read > 0 && stream.write_all(OK_RESPONSE).await.is_ok();

                in_flight.fetch_sub(1, Ordering::SeqCst);
                responded
            }));
        }

        for handler in handlers {
            match handler.await {
                Ok(true) => {}
                Ok(false) => {
                    return Err(AppError::validation("A server handler failed to respond"));
                }
                Err(err) => {
                    return Err(AppError::validation(format!(
                        "A server handler did not finish: {}",
                        err
                    )));
                }
            }
        }
        Ok(())
    });

    Ok((addr, peak, task))
}

async fn join_server(task: JoinHandle<AppResult<()>>) -> AppResult<()> {
    timeout(TEST_TIMEOUT, task)
        .await
        .map_err(|_| AppError::validation("Timed out waiting for the test server"))?
        .map_err(|err| AppError::validation(format!("The test server did not finish: {}", err)))?
}
