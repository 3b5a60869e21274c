pub mod audit;
pub mod error;
pub mod extract;
pub mod probe;
pub mod rules;

pub use audit::{LinkFinding, LinkIssue, RedirectKind, audit_links, audit_urls, collect_links};
pub use error::LinkError;
pub use extract::LinkExtractor;
pub use probe::{FaultKind, HttpProbe, Probe, ProbeFault, ProbeResponse};
pub use rules::{REWRITE_RULES, RewriteRule, is_ignored, normalize};
