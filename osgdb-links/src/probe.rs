//! Liveness checks for single URLs.
//!
//! [`Probe`] is the seam between the audit decisions and the network;
//! [`HttpProbe`] is the real implementation on top of blocking `reqwest`.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};

use crate::error::LinkError;

/// Browser-like user agent; several hosts refuse unknown clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64)";

/// Per-request timeout used by the link audit.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Outcome of a request that got an HTTP answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    /// URL of the last response after following redirects.
    pub final_url: String,
    pub redirected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FaultKind {
    Timeout,
    Connect,
    Tls,
    Other,
}

impl FaultKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connection error",
            Self::Tls => "TLS error",
            Self::Other => "request error",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A request that never produced an HTTP answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFault {
    pub kind: FaultKind,
    pub message: String,
}

impl ProbeFault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProbeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

pub trait Probe {
    /// Request `url`, following redirects. With `verify_tls` false, invalid
    /// certificates are accepted.
    fn probe(&self, url: &str, verify_tls: bool) -> Result<ProbeResponse, ProbeFault>;
}

/// Probe issuing a HEAD request, repeated as GET when the server answers
/// 405 Method Not Allowed.
pub struct HttpProbe {
    verifying: Client,
    lenient: Client,
}

impl HttpProbe {
    pub fn new() -> Result<Self, LinkError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, LinkError> {
        let verifying = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let lenient = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self { verifying, lenient })
    }

    fn send(client: &Client, url: &str) -> Result<Response, reqwest::Error> {
        let response = client.head(url).send()?;
        if response.status() == StatusCode::METHOD_NOT_ALLOWED {
            return client.get(url).send();
        }
        Ok(response)
    }
}

impl Probe for HttpProbe {
    fn probe(&self, url: &str, verify_tls: bool) -> Result<ProbeResponse, ProbeFault> {
        let client = if verify_tls {
            &self.verifying
        } else {
            &self.lenient
        };
        let response = Self::send(client, url).map_err(|e| classify(&e))?;

        // Compare parsed forms, reqwest normalizes e.g. an empty path to "/".
        let requested = reqwest::Url::parse(url).ok();
        let redirected = requested.as_ref() != Some(response.url());
        Ok(ProbeResponse {
            status: response.status().as_u16(),
            final_url: response.url().to_string(),
            redirected,
        })
    }
}

fn classify(error: &reqwest::Error) -> ProbeFault {
    let kind = if error.is_timeout() {
        FaultKind::Timeout
    } else if is_tls_error(error) {
        FaultKind::Tls
    } else if error.is_connect() {
        FaultKind::Connect
    } else {
        FaultKind::Other
    };
    ProbeFault::new(kind, error.to_string())
}

/// reqwest has no TLS predicate; look for certificate or handshake problems
/// anywhere in the source chain.
fn is_tls_error(error: &reqwest::Error) -> bool {
    let mut source: Option<&dyn std::error::Error> = Some(error);
    while let Some(err) = source {
        let text = err.to_string().to_lowercase();
        if text.contains("certificate") || text.contains("tls") || text.contains("handshake") {
            return true;
        }
        source = err.source();
    }
    false
}
