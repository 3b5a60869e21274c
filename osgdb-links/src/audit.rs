//! Deciding which links to report.
//!
//! The audit is best effort: every URL is probed once, problems become
//! [`LinkFinding`]s and nothing aborts the scan.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::extract::LinkExtractor;
use crate::probe::{FaultKind, Probe, ProbeFault, ProbeResponse};
use crate::rules::{is_ignored, normalize};

/// Redirects we accept because the database should keep the original URL.
pub const REDIRECT_OKAY: &[&str] = &[
    "https://octaforge.org/",
    "https://svn.openttd.org/",
    "https://godotengine.org/download",
];

/// Hosts with expired or otherwise broken certificates that still serve
/// the right content. They are probed without certificate verification.
pub const INSECURE_HOSTS: &[&str] = &[
    "https://perso.b2b2c.ca/~sarrazip/dev/",
    "https://dreerally.com/",
    "https://henlin.net/",
    "https://www.megamek.org/",
    "https://pixeldoctrine.com/",
    "https://gitorious.org/",
    "https://www.opmon-game.ga/",
];

/// TLS faults on these links are dropped even without verification.
pub const TLS_FAULTS_OKAY: &[&str] = &["https://gitorious.org/", "https://www.freedroid.org/download/"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// Only a `/` was appended.
    TrailingSlash,
    /// Same address over https.
    Https,
    Other,
}

impl RedirectKind {
    fn classify(url: &str, target: &str) -> Self {
        let url = parsed_form(url);
        let target = parsed_form(target);
        if target == format!("{url}/") {
            Self::TrailingSlash
        } else if url
            .strip_prefix("http://")
            .is_some_and(|rest| target == format!("https://{rest}"))
        {
            Self::Https
        } else {
            Self::Other
        }
    }
}

/// The URL as reqwest reports it after a request, so `http://a.org` and the
/// final `https://a.org/` differ only in the scheme.
fn parsed_form(url: &str) -> String {
    reqwest::Url::parse(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkIssue {
    /// Answered with something other than 200.
    Status(u16),
    Redirect { to: String, kind: RedirectKind },
    Fault(ProbeFault),
}

/// A problem with one link, together with the entries referencing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFinding {
    pub url: String,
    pub owners: Vec<String>,
    pub issue: LinkIssue,
}

impl fmt::Display for LinkFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.owners.is_empty() {
            write!(f, "{}: ", self.owners.join(", "))?;
        }
        match &self.issue {
            LinkIssue::Status(code) => write!(f, "{} - {code}", self.url),
            LinkIssue::Redirect { to, kind } => {
                write!(f, "{} -> {to} - redirect", self.url)?;
                match kind {
                    RedirectKind::TrailingSlash => f.write_str(" \"/\" at end"),
                    RedirectKind::Https => f.write_str(" \"https\" at start"),
                    RedirectKind::Other => Ok(()),
                }
            }
            LinkIssue::Fault(fault) => write!(f, "{} - exception {}", self.url, fault.kind),
        }
    }
}

/// Extract, filter and normalize the links of all `(file, text)` records,
/// mapping each unique URL to the files referencing it.
pub fn collect_links<'a>(
    extractor: &LinkExtractor,
    sources: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> BTreeMap<String, BTreeSet<String>> {
    let mut links: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (file, text) in sources {
        for url in extractor.extract(text) {
            if is_ignored(&url) {
                continue;
            }
            links.entry(normalize(&url)).or_default().insert(file.to_string());
        }
    }
    log::info!("Found {} unique links", links.len());
    links
}

/// Probe every link and report bad status codes, unexpected redirects and
/// network faults.
pub fn audit_links(
    links: &BTreeMap<String, BTreeSet<String>>,
    probe: &dyn Probe,
) -> Vec<LinkFinding> {
    let mut findings = Vec::new();
    for (url, owners) in links {
        let verify_tls = !INSECURE_HOSTS.iter().any(|h| url.starts_with(h));
        let owners: Vec<String> = owners.iter().cloned().collect();
        match probe.probe(url, verify_tls) {
            Ok(response) => {
                let allow_redirect = REDIRECT_OKAY.contains(&url.as_str());
                for issue in response_issues(url, &response, allow_redirect) {
                    findings.push(report(url, &owners, issue));
                }
            }
            Err(fault) => {
                if fault.kind == FaultKind::Tls && TLS_FAULTS_OKAY.iter().any(|h| url.starts_with(h))
                {
                    log::debug!("Ignoring TLS fault for {url}");
                    continue;
                }
                findings.push(report(url, &owners, LinkIssue::Fault(fault)));
            }
        }
    }
    findings
}

/// Probe a plain list of URLs (the backlog) without any rewriting.
pub fn audit_urls<'a>(
    urls: impl IntoIterator<Item = &'a str>,
    probe: &dyn Probe,
) -> Vec<LinkFinding> {
    let mut findings = Vec::new();
    for url in urls {
        match probe.probe(url, true) {
            Ok(response) => {
                for issue in response_issues(url, &response, false) {
                    findings.push(report(url, &[], issue));
                }
            }
            Err(fault) => findings.push(report(url, &[], LinkIssue::Fault(fault))),
        }
    }
    findings
}

fn response_issues(url: &str, response: &ProbeResponse, allow_redirect: bool) -> Vec<LinkIssue> {
    let mut issues = Vec::new();
    if response.status != 200 {
        issues.push(LinkIssue::Status(response.status));
    }
    if response.redirected && !allow_redirect {
        issues.push(LinkIssue::Redirect {
            to: response.final_url.clone(),
            kind: RedirectKind::classify(url, &response.final_url),
        });
    }
    issues
}

fn report(url: &str, owners: &[String], issue: LinkIssue) -> LinkFinding {
    let finding = LinkFinding {
        url: url.to_string(),
        owners: owners.to_vec(),
        issue,
    };
    log::warn!("{finding}");
    finding
}
