//! Host-specific URL rewriting applied before links are probed.
//!
//! Some repository URLs are fine for cloning but not browsable (or answer
//! with errors to plain HTTP requests). [`REWRITE_RULES`] is evaluated in
//! order and every matching rule transforms the output of the previous one,
//! so a new host quirk is one more row in the table.

/// One rewrite: when `applies` holds for the current URL, it is replaced by
/// `rewrite(url)`.
#[derive(Debug, Clone, Copy)]
pub struct RewriteRule {
    pub name: &'static str,
    pub applies: fn(&str) -> bool,
    pub rewrite: fn(&str) -> String,
}

/// Links that give false positives and are never probed.
pub const IGNORED_PREFIXES: &[&str] = &[
    "https://git.tukaani.org/xz.git",
    "https://git.code.sf.net/",
    "http://hg.hedgewars.org/hedgewars/",
    "https://git.xiph.org/vorbis.git",
    "http://svn.uktrainsim.com/svn/openrails",
    "https://www.srb2.org/",
    "http://wiki.srb2.org/",
];

/// Bazaar branches on SourceForge have no web address at all.
const UNBROWSABLE_FRAGMENT: &str = "bzr.sourceforge.net/bzrroot/";

const TRAILING_SLASH_HOSTS: &[&str] = &[
    "https://anongit.freedesktop.org/git",
    "https://git.savannah.gnu.org/git/",
    "https://git.savannah.nongnu.org/git/",
    "https://git.artsoft.org/",
];

/// Hosts where the `.git` suffix is part of the browsable address.
const KEEP_GIT_SUFFIX: &[&str] = &[
    "https://repo.or.cz",
    "https://git.tuxfamily.org/fanwor/fanwor",
];

const SF_SVN: &str = "https://svn.code.sf.net/p/";
const CVS_NONGNU: &str = "http://cvs.savannah.nongnu.org:/sources/";
const CVS_GNU: &str = "http://cvs.savannah.gnu.org:/sources/";

pub const REWRITE_RULES: &[RewriteRule] = &[
    RewriteRule {
        name: "trailing slash for git web frontends",
        applies: |url| TRAILING_SLASH_HOSTS.iter().any(|p| url.starts_with(p)),
        rewrite: |url| format!("{url}/"),
    },
    RewriteRule {
        name: "bitbucket clone url to commit log",
        applies: |url| url.starts_with("https://bitbucket.org/") && url.ends_with(".git"),
        rewrite: |url| format!("{}/commits/", strip_git_suffix(url)),
    },
    RewriteRule {
        name: "sourceforge svn over plain http",
        applies: |url| url.starts_with(SF_SVN),
        rewrite: |url| format!("http{}/", &url["https".len()..]),
    },
    RewriteRule {
        name: "savannah nongnu cvs to viewvc",
        applies: |url| url.starts_with(CVS_NONGNU),
        rewrite: |url| {
            format!(
                "http://cvs.savannah.nongnu.org/viewvc/{}/",
                &url[CVS_NONGNU.len()..]
            )
        },
    },
    RewriteRule {
        name: "savannah gnu cvs to viewvc",
        applies: |url| url.starts_with(CVS_GNU),
        rewrite: |url| {
            format!(
                "http://cvs.savannah.gnu.org/viewvc/{}/",
                &url[CVS_GNU.len()..]
            )
        },
    },
    RewriteRule {
        name: "strip .git suffix",
        applies: |url| url.ends_with(".git") && !KEEP_GIT_SUFFIX.iter().any(|p| url.starts_with(p)),
        rewrite: |url| strip_git_suffix(url).to_string(),
    },
];

fn strip_git_suffix(url: &str) -> &str {
    url.strip_suffix(".git").unwrap_or(url)
}

/// Whether a link is excluded from the audit entirely.
pub fn is_ignored(url: &str) -> bool {
    IGNORED_PREFIXES.iter().any(|p| url.starts_with(p)) || url.contains(UNBROWSABLE_FRAGMENT)
}

/// Apply every matching rule of [`REWRITE_RULES`] in order.
pub fn normalize(url: &str) -> String {
    REWRITE_RULES
        .iter()
        .fold(url.to_string(), |current, rule| {
            if (rule.applies)(&current) {
                let rewritten = (rule.rewrite)(&current);
                log::debug!("{}: {current} -> {rewritten}", rule.name);
                rewritten
            } else {
                current
            }
        })
}

#[cfg(test)]
#[path = "tests/rules_tests.rs"]
mod tests;
