//! uiautomator2 Device Connector
//!
//! Talks JSON-RPC 2.0 over HTTP to the uiautomator2 server running on the
//! device, usually reached through an `adb forward` of its port.

use std::process::Command;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::ports::{DeviceConnector, DeviceError, DeviceSession};
use crate::domain::value_objects::MatchMode;

/// Port the uiautomator2 server listens on, on the device side
pub const DEVICE_SERVER_PORT: u16 = 9008;

/// Headroom on top of the wait budget for the HTTP round trip
const REQUEST_SLACK: Duration = Duration::from_secs(10);

/// `adb forward` to run before connecting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdbForward {
    pub serial: Option<String>,
}

impl AdbForward {
    pub fn new(serial: Option<String>) -> Self {
        Self { serial }
    }

    /// Arguments passed to `adb` for a given local port
    pub fn args(&self, local_port: u16) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(serial) = &self.serial {
            args.push("-s".to_string());
            args.push(serial.clone());
        }
        args.push("forward".to_string());
        args.push(format!("tcp:{}", local_port));
        args.push(format!("tcp:{}", DEVICE_SERVER_PORT));
        args
    }

    fn run(&self, local_port: u16) -> Result<(), DeviceError> {
        let output = Command::new("adb")
            .args(self.args(local_port))
            .output()
            .map_err(|e| DeviceError::Unreachable(format!("adb: {}", e)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DeviceError::Unreachable(format!(
                "adb forward failed: {}",
                first_line(&stderr)
            )));
        }
        Ok(())
    }
}

/// Opens sessions against a uiautomator2 endpoint
#[derive(Debug, Clone)]
pub struct UiAutomatorConnector {
    endpoint: String,
    connect_timeout: Duration,
    adb_forward: Option<AdbForward>,
}

impl UiAutomatorConnector {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            connect_timeout: Duration::from_secs(5),
            adb_forward: None,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_adb_forward(mut self, forward: Option<AdbForward>) -> Self {
        self.adb_forward = forward;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn adb_forward(&self) -> Option<&AdbForward> {
        self.adb_forward.as_ref()
    }

    fn local_port(&self) -> Result<u16, DeviceError> {
        let url = reqwest::Url::parse(&self.endpoint)
            .map_err(|e| DeviceError::Unreachable(format!("invalid endpoint '{}': {}", self.endpoint, e)))?;
        url.port_or_known_default().ok_or_else(|| {
            DeviceError::Unreachable(format!("endpoint '{}' has no port", self.endpoint))
        })
    }
}

impl DeviceConnector for UiAutomatorConnector {
    type Session = UiAutomatorSession;

    fn connect(&self) -> Result<Self::Session, DeviceError> {
        let port = self.local_port()?;
        if let Some(forward) = &self.adb_forward {
            forward.run(port)?;
        }

        let client = Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(None)
            .build()
            .map_err(|e| DeviceError::Unreachable(e.to_string()))?;

        let url = format!("{}/ping", self.endpoint);
        let response = client
            .get(&url)
            .timeout(self.connect_timeout)
            .send()
            .map_err(|e| DeviceError::Unreachable(format!("{}: {}", url, flatten(&e))))?;
        if !response.status().is_success() {
            return Err(DeviceError::Unreachable(format!(
                "{}: HTTP {}",
                url,
                response.status()
            )));
        }

        Ok(UiAutomatorSession {
            client,
            endpoint: self.endpoint.clone(),
        })
    }
}

/// A connected uiautomator2 server
#[derive(Debug)]
pub struct UiAutomatorSession {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Selector object matching one element by text or description
pub(crate) fn selector(mode: MatchMode, target: &str) -> Value {
    let mut selector = json!({
        "mask": mode.selector_mask(),
        "childOrSibling": [],
        "childOrSiblingSelector": [],
    });
    selector[mode.selector_field()] = Value::String(target.to_string());
    selector
}

pub(crate) fn wait_request(mode: MatchMode, target: &str, timeout_ms: u64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "waitForExists",
        "params": [selector(mode, target), timeout_ms],
    })
}

fn parse_response(response: RpcResponse) -> Result<bool, DeviceError> {
    if let Some(err) = response.error {
        return Err(DeviceError::Protocol(format!(
            "waitForExists failed ({}): {}",
            err.code, err.message
        )));
    }
    match response.result {
        Some(Value::Bool(found)) => Ok(found),
        Some(other) => Err(DeviceError::Protocol(format!(
            "unexpected waitForExists result: {}",
            other
        ))),
        None => Err(DeviceError::Protocol(
            "waitForExists returned no result".to_string(),
        )),
    }
}

impl DeviceSession for UiAutomatorSession {
    fn wait_exists(
        &self,
        mode: MatchMode,
        target: &str,
        timeout: Duration,
    ) -> Result<bool, DeviceError> {
        let timeout_ms = u64::try_from(timeout.as_millis()).map_err(|_| {
            DeviceError::Protocol(format!("wait budget out of range: {:?}", timeout))
        })?;
        let request_timeout = timeout.checked_add(REQUEST_SLACK).ok_or_else(|| {
            DeviceError::Protocol(format!("wait budget out of range: {:?}", timeout))
        })?;
        let url = format!("{}/jsonrpc/0", self.endpoint);
        let response = self
            .client
            .post(&url)
            .timeout(request_timeout)
            .json(&wait_request(mode, target, timeout_ms))
            .send()
            .map_err(|e| DeviceError::Unreachable(format!("{}: {}", url, flatten(&e))))?;
        if !response.status().is_success() {
            return Err(DeviceError::Protocol(format!(
                "{}: HTTP {}",
                url,
                response.status()
            )));
        }
        let body: RpcResponse = response
            .json()
            .map_err(|e| DeviceError::Protocol(format!("invalid JSON-RPC response: {}", e)))?;
        parse_response(body)
    }
}

/// Render an error and its causes on one line
fn flatten(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    first_line(&message).to_string()
}

fn first_line(s: &str) -> &str {
    s.trim().lines().next().unwrap_or("").trim()
}
