//! Minimal uiautomator2 server for probe tests.
//!
//! Answers `GET /ping` and `POST /jsonrpc/0` (`waitForExists` only). Elements
//! listed as visible are found at once; anything else is "not found" after
//! the requested budget, the way the device-side primitive behaves.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde_json::{json, Value};

/// Target that makes the server answer with a JSON-RPC error
pub const RPC_ERROR_TARGET: &str = "__rpc_error__";

pub struct MockDevice {
    endpoint: String,
    requests: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockDevice {
    /// Start a server showing these texts and descriptions
    pub fn start(texts: &[&str], descriptions: &[&str]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(AtomicUsize::new(0));

        let screen = Arc::new(Screen {
            texts: texts.iter().map(|s| s.to_string()).collect(),
            descriptions: descriptions.iter().map(|s| s.to_string()).collect(),
        });
        let counter = requests.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let screen = screen.clone();
                counter.fetch_add(1, Ordering::SeqCst);
                thread::spawn(move || {
                    let _ = handle(stream, &screen);
                });
            }
        });

        Self { endpoint, requests }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Connections accepted so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

/// An endpoint nothing listens on
#[allow(dead_code)]
pub fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

struct Screen {
    texts: Vec<String>,
    descriptions: Vec<String>,
}

impl Screen {
    fn shows(&self, selector: &Value) -> Option<bool> {
        if let Some(text) = selector["text"].as_str() {
            if text == RPC_ERROR_TARGET {
                return None;
            }
            return Some(self.texts.iter().any(|t| t == text));
        }
        if let Some(desc) = selector["description"].as_str() {
            return Some(self.descriptions.iter().any(|d| d == desc));
        }
        Some(false)
    }
}

fn handle(stream: TcpStream, screen: &Screen) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;

    let (status, response) = if request_line.starts_with("GET /ping") {
        ("200 OK", "pong".to_string())
    } else if request_line.starts_with("POST /jsonrpc/0") {
        ("200 OK", wait_for_exists(&body, screen).to_string())
    } else {
        ("404 Not Found", String::new())
    };

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        response.len(),
        response
    )?;
    stream.flush()
}

fn wait_for_exists(body: &[u8], screen: &Screen) -> Value {
    let request: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    let id = request["id"].clone();
    if request["method"] != "waitForExists" {
        return json!({"jsonrpc": "2.0", "id": id, "error": {"code": -32601, "message": "Method not found"}});
    }

    match screen.shows(&request["params"][0]) {
        Some(true) => json!({"jsonrpc": "2.0", "id": id, "result": true}),
        Some(false) => {
            let budget = request["params"][1].as_u64().unwrap_or(0);
            thread::sleep(Duration::from_millis(budget));
            json!({"jsonrpc": "2.0", "id": id, "result": false})
        }
        None => json!({"jsonrpc": "2.0", "id": id, "error": {"code": -32002, "message": "UiAutomation not connected"}}),
    }
}
