//! Programmable mock of the Kong admin API for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use kong_bootstrap::BootstrapConfig;

/// A request as the mock gateway saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

/// What the mock does with a request.
#[allow(dead_code)]
pub enum Reply {
    /// Close the connection without answering.
    Drop,
    /// Keep the connection open and never answer.
    Hang,
    Respond(u16, String),
}

pub struct MockGateway {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl MockGateway {
    pub fn admin_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

/// Start a mock gateway on an ephemeral port.
///
/// `handler` gets each request and the 0-based count of earlier requests
/// with the same method and path.
pub async fn start_mock_gateway<F>(handler: F) -> MockGateway
where
    F: Fn(&RecordedRequest, u32) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::<RecordedRequest>::new()));
    let handler = Arc::new(handler);

    let recorded = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let recorded = recorded.clone();
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let seen = {
                            let mut guard = recorded.lock().unwrap();
                            let seen = guard
                                .iter()
                                .filter(|r| r.method == request.method && r.path == request.path)
                                .count() as u32;
                            guard.push(request.clone());
                            seen
                        };

                        match handler(&request, seen) {
                            Reply::Drop => drop(socket),
                            Reply::Hang => {
                                tokio::time::sleep(Duration::from_secs(60)).await;
                                drop(socket);
                            }
                            Reply::Respond(status, body) => {
                                let response = format!(
                                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                                    status_line(status),
                                    body.len(),
                                    body
                                );
                                let _ = socket.write_all(response.as_bytes()).await;
                                let _ = socket.shutdown().await;
                                tokio::time::sleep(Duration::from_millis(10)).await;
                            }
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockGateway { addr, requests }
}

/// Kong-like answers: 200 on status, 201 with an entity on creation.
#[allow(dead_code)]
pub fn kong_reply(request: &RecordedRequest) -> Reply {
    match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/status") => Reply::Respond(200, r#"{"database":{"reachable":true}}"#.into()),
        ("POST", "/services") => Reply::Respond(
            201,
            r#"{"id":"9748f662-7711-4a90-8186-dc02f10eb0f5","name":"portal-service"}"#.into(),
        ),
        ("POST", _) => Reply::Respond(
            201,
            r#"{"id":"d35165e2-d03e-461a-bdeb-dad0a112abfe","name":"portal-route"}"#.into(),
        ),
        _ => Reply::Respond(404, r#"{"message":"Not found"}"#.into()),
    }
}

/// Defaults pointed at `admin_url` with fast polling.
#[allow(dead_code)]
pub fn test_config(admin_url: &str) -> BootstrapConfig {
    let mut config = BootstrapConfig::default();
    config.gateway.admin_url = admin_url.to_string();
    config.gateway.request_timeout_secs = 5;
    config.readiness.interval_ms = 50;
    config.readiness.max_interval_ms = 50;
    config.readiness.timeout_secs = 10;
    config
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();
    let header = |name: &str| {
        headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    };
    let content_length = header("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = buf.len().min(header_end + content_length);

    Some(RecordedRequest {
        method,
        path,
        content_type: header("content-type"),
        body: String::from_utf8_lossy(&buf[header_end..body_end]).to_string(),
    })
}

fn status_line(status: u16) -> String {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown");
    format!("{} {}", status, reason)
}
