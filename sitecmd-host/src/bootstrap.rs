//! Host bootstrap: locating the installation and selecting the initial site

use sitecmd_core::{
    default_registry_path, Result, SiteCmdError, TenantContext, REGISTRY_FILE_NAME,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::registry::SiteRegistry;
use crate::site_url::SiteUrl;

/// Settings that decide which installation and site the host loads
#[derive(Debug, Clone, Default)]
pub struct HostOptions {
    /// Explicit registry file, skipping root discovery
    pub registry: Option<PathBuf>,
    /// `--url` of the site to start on
    pub url: Option<String>,
}

/// Find the installation root, walking up from `start`
///
/// The root is the first directory containing the site registry file.
/// Falls back to `start` when no ancestor has one.
pub fn find_root(start: &Path) -> PathBuf {
    locate_registry(start)
        .and_then(|registry| registry.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| start.to_path_buf())
}

/// Path of the nearest site registry file at or above `start`
pub fn locate_registry(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        let candidate = dir.join(REGISTRY_FILE_NAME);
        debug!("Checking for site registry: {}", candidate.display());
        candidate.is_file().then_some(candidate)
    })
}

/// Load the host application for a command run
///
/// Registry lookup order: explicit path, discovery from `start`, default
/// data directory. When a URL is given, the matching site becomes the
/// current tenant.
pub fn bootstrap(start: &Path, options: &HostOptions) -> Result<SiteRegistry> {
    let registry_path = options
        .registry
        .clone()
        .or_else(|| locate_registry(start))
        .unwrap_or_else(default_registry_path);

    if !registry_path.is_file() {
        return Err(SiteCmdError::Host(format!(
            "Cannot find the site registry (looked for {} from {})",
            REGISTRY_FILE_NAME,
            start.display()
        )));
    }

    let mut registry = SiteRegistry::load(&registry_path)?;

    if let Some(raw) = options.url.as_deref().filter(|raw| !raw.trim().is_empty()) {
        let url = SiteUrl::parse(raw)?;
        let site = registry
            .site_for_url(&url)
            .map(|site| site.id)
            .ok_or_else(|| SiteCmdError::Host(format!("No site matches URL: {}", url)))?;

        info!("Starting on site {} ({})", site, url);
        registry.switch_to(site)?;
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecmd_core::TenantId;
    use tempfile::TempDir;

    const REGISTRY: &str = r#"
[[sites]]
id = 1
url = "example.com/"

[[sites]]
id = 2
url = "example.com/shop/"
"#;

    fn install(dir: &Path) -> PathBuf {
        let path = dir.join(REGISTRY_FILE_NAME);
        std::fs::write(&path, REGISTRY).unwrap();
        path
    }

    #[test]
    fn test_find_root_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        install(temp_dir.path());
        let nested = temp_dir.path().join("wp-content").join("plugins");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_root(&nested), temp_dir.path());
    }

    #[test]
    fn test_find_root_falls_back_to_start() {
        let temp_dir = TempDir::new().unwrap();
        let start = temp_dir.path().join("empty");
        std::fs::create_dir_all(&start).unwrap();

        // An ancestor of the temp dir could hold a registry; only check the fallback
        // when none does.
        if locate_registry(&start).is_none() {
            assert_eq!(find_root(&start), start);
        }
    }

    #[test]
    fn test_bootstrap_with_url_selects_site() {
        let temp_dir = TempDir::new().unwrap();
        let registry_path = install(temp_dir.path());

        let options = HostOptions {
            registry: Some(registry_path),
            url: Some("example.com/shop".to_string()),
        };
        let registry = bootstrap(temp_dir.path(), &options).unwrap();
        assert_eq!(registry.current(), Some(TenantId::new(2)));
    }

    #[test]
    fn test_bootstrap_without_url_has_no_current_site() {
        let temp_dir = TempDir::new().unwrap();
        install(temp_dir.path());

        let registry = bootstrap(temp_dir.path(), &HostOptions::default()).unwrap();
        assert_eq!(registry.current(), None);
        assert_eq!(registry.sites().len(), 2);
    }

    #[test]
    fn test_bootstrap_unknown_url_fails() {
        let temp_dir = TempDir::new().unwrap();
        let registry_path = install(temp_dir.path());

        let options = HostOptions {
            registry: Some(registry_path),
            url: Some("other.org".to_string()),
        };
        assert!(matches!(
            bootstrap(temp_dir.path(), &options),
            Err(SiteCmdError::Host(_))
        ));
    }

    #[test]
    fn test_bootstrap_missing_explicit_registry_fails() {
        let temp_dir = TempDir::new().unwrap();
        let options = HostOptions {
            registry: Some(temp_dir.path().join("nope.toml")),
            url: None,
        };
        assert!(bootstrap(temp_dir.path(), &options).is_err());
    }
}
