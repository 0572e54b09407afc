//! Test utilities for the backend client
//!
//! - [`StubBackend`]: in-memory [`Backend`](crate::Backend) with canned replies
//! - [`spawn_canned_server`]: local HTTP listener serving canned responses, for
//!   exercising the real [`ApiClient`](crate::ApiClient)
//! - [`render_qr`]: QR code image for decoder tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use phishguard_core::prelude::*;
use phishguard_core::{AuthMode, Confidence, ScanOutcome, UserSession, Verdict};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::protocol::AuthSuccess;
use crate::service::{AccountService, Classifier};

// ─────────────────────────────────────────────────────────────────────────────
// Stub backend
// ─────────────────────────────────────────────────────────────────────────────

/// Canned reply for one scan call
#[derive(Debug, Clone)]
pub enum StubScan {
    /// Return this verdict, echoing the submitted URL
    Verdict(Verdict, Option<Confidence>),
    /// Return this exact outcome
    Outcome(ScanOutcome),
    /// Server-reported failure
    ServerError(String),
    /// Transport failure
    Unreachable,
}

/// Canned reply for one auth call
#[derive(Debug, Clone)]
pub enum StubAuth {
    Success { user: UserSession, message: String },
    Rejected(String),
    Unreachable,
}

#[derive(Debug, Default)]
struct StubInner {
    scans: VecDeque<StubScan>,
    default_scan: Option<StubScan>,
    auth: VecDeque<StubAuth>,
    profile_ok: bool,
    delay: Option<Duration>,
    scanned: Vec<String>,
    auth_calls: Vec<(AuthMode, String)>,
    profile_updates: Vec<(String, String, String)>,
}

/// In-memory backend. Clones share state so tests can inspect calls after
/// handing a clone to the application.
#[derive(Debug, Clone)]
pub struct StubBackend {
    inner: Arc<Mutex<StubInner>>,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StubBackend {
    /// Stub that answers every scan with `Safe` at 0.98 and accepts profile updates
    pub fn new() -> Self {
        let inner = StubInner {
            default_scan: Some(StubScan::Verdict(Verdict::Safe, Some(Confidence::Score(0.98)))),
            profile_ok: true,
            ..Default::default()
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Answer every scan (after any queued replies) with `reply`
    pub fn with_default_scan(self, reply: StubScan) -> Self {
        self.lock().default_scan = Some(reply);
        self
    }

    /// Queue a reply for the next scan
    pub fn push_scan(&self, reply: StubScan) {
        self.lock().scans.push_back(reply);
    }

    pub fn push_auth(&self, reply: StubAuth) {
        self.lock().auth.push_back(reply);
    }

    pub fn with_profile_ok(self, ok: bool) -> Self {
        self.lock().profile_ok = ok;
        self
    }

    /// Delay every call, to hold requests in flight
    pub fn with_delay(self, delay: Duration) -> Self {
        self.lock().delay = Some(delay);
        self
    }

    pub fn scanned_urls(&self) -> Vec<String> {
        self.lock().scanned.clone()
    }

    pub fn scan_count(&self) -> usize {
        self.lock().scanned.len()
    }

    pub fn auth_calls(&self) -> Vec<(AuthMode, String)> {
        self.lock().auth_calls.clone()
    }

    pub fn profile_updates(&self) -> Vec<(String, String, String)> {
        self.lock().profile_updates.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StubInner> {
        // A panicking test thread may poison the lock; the data is still usable
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn delay(&self) -> Option<Duration> {
        self.lock().delay
    }
}

impl Classifier for StubBackend {
    async fn classify(&self, url: &str) -> Result<ScanOutcome> {
        let reply = {
            let mut inner = self.lock();
            inner.scanned.push(url.to_string());
            inner.scans.pop_front().or_else(|| inner.default_scan.clone())
        };

        if let Some(delay) = self.delay() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Some(StubScan::Verdict(verdict, confidence)) => Ok(ScanOutcome {
                result: verdict,
                url: url.to_string(),
                confidence,
                explanation: Vec::new(),
            }),
            Some(StubScan::Outcome(outcome)) => Ok(outcome),
            Some(StubScan::ServerError(message)) => Err(Error::server(Some(200), message)),
            Some(StubScan::Unreachable) | None => Err(Error::connection("stub: unreachable")),
        }
    }
}

impl AccountService for StubBackend {
    async fn authenticate(
        &self,
        mode: AuthMode,
        email: &str,
        _password: &str,
    ) -> Result<AuthSuccess> {
        let reply = {
            let mut inner = self.lock();
            inner.auth_calls.push((mode, email.to_string()));
            inner.auth.pop_front()
        };

        if let Some(delay) = self.delay() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Some(StubAuth::Success { user, message }) => Ok(AuthSuccess { user, message }),
            Some(StubAuth::Rejected(message)) => Err(Error::server(Some(401), message)),
            Some(StubAuth::Unreachable) => Err(Error::connection("stub: unreachable")),
            None => Ok(AuthSuccess {
                user: UserSession::new(email),
                message: "Login successful".to_string(),
            }),
        }
    }

    async fn update_profile(&self, email: &str, name: &str, photo: &str) -> Result<()> {
        let ok = {
            let mut inner = self.lock();
            inner
                .profile_updates
                .push((email.to_string(), name.to_string(), photo.to_string()));
            inner.profile_ok
        };

        if ok {
            Ok(())
        } else {
            Err(Error::server(Some(500), "Profile update failed (HTTP 500)"))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Canned HTTP server
// ─────────────────────────────────────────────────────────────────────────────

/// One scripted HTTP response
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl CannedResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    /// Wait before answering
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Default)]
struct ServerLog {
    served: usize,
    requests: Vec<String>,
}

/// Handle to a running canned server; stops when dropped
pub struct CannedServer {
    pub base_url: String,
    log: Arc<tokio::sync::Mutex<ServerLog>>,
    handle: JoinHandle<()>,
}

impl CannedServer {
    /// Raw requests received so far (request line, headers and body)
    pub async fn requests(&self) -> Vec<String> {
        self.log.lock().await.requests.clone()
    }
}

impl Drop for CannedServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start a server on an ephemeral localhost port.
///
/// Responses are served in order; once exhausted the last one repeats.
pub async fn spawn_canned_server(responses: Vec<CannedResponse>) -> CannedServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind canned server");
    let addr = listener.local_addr().expect("canned server address");
    let log = Arc::new(tokio::sync::Mutex::new(ServerLog::default()));
    let responses = Arc::new(responses);

    let task_log = log.clone();
    let handle = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let log = task_log.clone();
            let responses = responses.clone();
            tokio::spawn(async move {
                if let Err(e) = serve_one(stream, log, responses).await {
                    debug!("canned server connection error: {}", e);
                }
            });
        }
    });

    CannedServer {
        base_url: format!("http://{addr}"),
        log,
        handle,
    }
}

async fn serve_one(
    mut stream: TcpStream,
    log: Arc<tokio::sync::Mutex<ServerLog>>,
    responses: Arc<Vec<CannedResponse>>,
) -> std::io::Result<()> {
    let request = read_request(&mut stream).await?;

    let response = {
        let mut log = log.lock().await;
        log.requests.push(request);
        let idx = log.served.min(responses.len().saturating_sub(1));
        log.served += 1;
        responses.get(idx).cloned()
    };

    let Some(response) = response else {
        return Ok(());
    };

    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason_phrase(response.status),
        response.body.len()
    );
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(response.body.as_bytes()).await?;
    stream.shutdown().await
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_subslice(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Ok(String::from_utf8_lossy(&buf).to_string())
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Status",
    }
}


// ─────────────────────────────────────────────────────────────────────────────
// QR images
// ─────────────────────────────────────────────────────────────────────────────

const QR_SCALE: u32 = 8;
const QR_QUIET_ZONE: u32 = 4;

/// Render `data` as a scaled luma QR image with a quiet zone
pub fn render_qr(data: &str) -> image::GrayImage {
    use qrcode::{Color, QrCode};

    let code = QrCode::new(data.as_bytes()).expect("QR payload too large");
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let side = (modules + 2 * QR_QUIET_ZONE) * QR_SCALE;

    image::GrayImage::from_fn(side, side, |x, y| {
        let mx = (x / QR_SCALE) as i64 - QR_QUIET_ZONE as i64;
        let my = (y / QR_SCALE) as i64 - QR_QUIET_ZONE as i64;
        let inside = mx >= 0 && my >= 0 && (mx as u32) < modules && (my as u32) < modules;
        let dark = inside
            && matches!(
                colors.get(my as usize * modules as usize + mx as usize),
                Some(Color::Dark)
            );
        if dark {
            image::Luma([0u8])
        } else {
            image::Luma([255u8])
        }
    })
}
