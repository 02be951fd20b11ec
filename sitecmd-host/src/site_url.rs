//! Site URLs given with `--url`

use sitecmd_core::{Result, SiteCmdError};
use std::fmt;
use url::Url;

/// Host and path a command is pointed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrl {
    host: String,
    path: String,
}

impl SiteUrl {
    /// Parse a URL, defaulting to `http://` when no scheme is given
    ///
    /// `example.com/blog` → host `example.com`, path `/blog`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(SiteCmdError::InvalidInput("Empty site URL".to_string()));
        }

        let with_scheme = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("http://{}", raw)
        };

        let url = Url::parse(&with_scheme)
            .map_err(|e| SiteCmdError::InvalidInput(format!("Invalid site URL '{}': {}", raw, e)))?;

        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(SiteCmdError::InvalidInput(format!(
                    "Site URL has no host: {}",
                    raw
                )))
            }
        };

        Ok(Self {
            host,
            path: url.path().to_string(),
        })
    }

    /// Host, including a non-default port
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Request path, always starting with `/`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Same site, ignoring a trailing slash on the path
    pub fn matches(&self, other: &SiteUrl) -> bool {
        self.host.eq_ignore_ascii_case(&other.host)
            && self.path.trim_end_matches('/') == other.path.trim_end_matches('/')
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.host, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_adds_scheme() {
        let url = SiteUrl::parse("example.com/blog").unwrap();
        assert_eq!(url.host(), "example.com");
        assert_eq!(url.path(), "/blog");
    }

    #[test]
    fn test_parse_keeps_port_and_trims() {
        let url = SiteUrl::parse("  https://example.com:8443/  ").unwrap();
        assert_eq!(url.host(), "example.com:8443");
        assert_eq!(url.path(), "/");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(SiteUrl::parse("   ").is_err());
    }

    #[test]
    fn test_matches_ignores_trailing_slash_and_case() {
        let a = SiteUrl::parse("Example.com/shop/").unwrap();
        let b = SiteUrl::parse("http://example.com/shop").unwrap();
        assert!(a.matches(&b));

        let c = SiteUrl::parse("example.com/blog").unwrap();
        assert!(!a.matches(&c));
    }
}
