// src/extract/repo.rs
// =============================================================================
// Decides whether one link points at a repository on the target host.
//
// A repository link looks like https://github.com/<owner>/<name>, optionally
// with a trailing slash. Everything else on an awesome-list page (topics,
// marketplace apps, other websites, anchors, mailto:) is skipped.
//
// We parse every link with the `url` crate and then look at the path
// segments, instead of matching the raw string with a regex. That way
// "//github.com/a/b", "/a/b" and "https://github.com/a/b?tab=readme" are all
// understood the same way.
// =============================================================================

use std::collections::HashSet;
use std::fmt;

use tracing::info;
use url::{ParseError, Url};

/// A repository on the target host, e.g. `octocat/Hello-World`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    owner: String,
    name: String,
}

impl RepoRef {
    /// Builds a reference if both segments follow the path grammar
    /// (word characters and hyphens, non-empty).
    pub fn new(owner: &str, name: &str) -> Option<Self> {
        if is_path_segment(owner) && is_path_segment(name) {
            Some(RepoRef {
                owner: owner.to_string(),
                name: name.to_string(),
            })
        } else {
            None
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The metadata API URL for this repository: `<api_base>/repos/<owner>/<name>`
    ///
    /// The base keeps its own path, so GitHub Enterprise style bases such as
    /// `https://git.example.com/api/v3` work too.
    pub fn endpoint(&self, api_base: &Url) -> Endpoint {
        let base = api_base.as_str().trim_end_matches('/');
        Endpoint(format!("{}/repos/{}/{}", base, self.owner, self.name))
    }

    // GitHub treats owner and repository names case-insensitively
    fn dedup_key(&self) -> (String, String) {
        (self.owner.to_lowercase(), self.name.to_lowercase())
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Metadata API URL for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Endpoint {
    fn from(url: String) -> Self {
        Endpoint(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The rules a link has to pass to count as a repository link:
/// right host, two-segment path, owner not a reserved section.
#[derive(Debug, Clone)]
pub struct RepoFilter {
    host: String,
    // Root of the target host, used to resolve "/owner/name" style links
    base: Url,
    denylist: HashSet<String>,
}

impl RepoFilter {
    /// Creates a filter for `host` (e.g. "github.com").
    ///
    /// Denylist entries are compared case-insensitively.
    pub fn new<I, S>(host: &str, denylist: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let host = host.trim().to_lowercase();
        let base = Url::parse(&format!("https://{}/", host))?;

        Ok(RepoFilter {
            host,
            base,
            denylist: denylist
                .into_iter()
                .map(|segment| segment.as_ref().to_lowercase())
                .collect(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn is_denied(&self, segment: &str) -> bool {
        self.denylist.contains(&segment.to_lowercase())
    }

    /// Classifies one href taken from the page.
    ///
    /// Returns `Some` only for links to a repository on the target host.
    pub fn classify(&self, href: &str) -> Option<RepoRef> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }

        let url = match Url::parse(href) {
            Ok(url) => url,
            // "/owner/name" and "//host/owner/name" are resolved against the
            // target host. Other relative links ("#top", "docs/x") never
            // name a repository.
            Err(ParseError::RelativeUrlWithoutBase) if href.starts_with('/') => {
                self.base.join(href).ok()?
            }
            Err(_) => return None,
        };

        if url.scheme() != "http" && url.scheme() != "https" {
            return None;
        }

        match url.host_str() {
            Some(host) if host.eq_ignore_ascii_case(&self.host) => {}
            _ => {
                info!(link = href, "Skipping link to another host");
                return None;
            }
        }

        // Url drops default ports, so any port left here is a different service
        if url.port().is_some() {
            info!(link = href, "Skipping link to a non-default port");
            return None;
        }

        let Some((owner, name)) = split_repo_path(url.path()) else {
            info!(link = href, "Skipping non-repository link");
            return None;
        };

        // The owner position holds reserved sections such as /topics/<x>.
        // A reserved word in the name position (/github/site) is rejected too.
        if self.is_denied(owner) || self.is_denied(name) {
            info!(link = href, "Skipping reserved section link");
            return None;
        }

        RepoRef::new(owner, name)
    }
}

/// Removes repeated repositories, keeping the first occurrence.
pub fn dedup_repo_refs(repos: Vec<RepoRef>) -> Vec<RepoRef> {
    let mut seen = HashSet::new();
    repos
        .into_iter()
        .filter(|repo| seen.insert(repo.dedup_key()))
        .collect()
}

// Splits "/owner/name" or "/owner/name/" into its two segments.
fn split_repo_path(path: &str) -> Option<(&str, &str)> {
    let path = path.strip_prefix('/')?;
    let path = path.strip_suffix('/').unwrap_or(path);

    let mut segments = path.split('/');
    let owner = segments.next()?;
    let name = segments.next()?;
    if segments.next().is_some() {
        return None;
    }

    if is_path_segment(owner) && is_path_segment(name) {
        Some((owner, name))
    } else {
        None
    }
}

// Word characters (letters, digits, underscore) and hyphens
fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}
