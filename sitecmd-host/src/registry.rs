//! Site registry
//!
//! The registry lists the tenants of an installation. It is stored as TOML:
//!
//! ```toml
//! [[sites]]
//! id = 1
//! url = "example.com/"
//!
//! [[sites]]
//! id = 2
//! url = "example.com/shop/"
//! name = "Shop"
//! archived = true
//! ```
//!
//! The registry is also the tenant context: switching to a site makes it
//! the current one until the next switch.

use serde::{Deserialize, Serialize};
use sitecmd_core::{
    Result, SiteCmdError, TenantContext, TenantDirectory, TenantFilter, TenantId,
};
use std::path::Path;
use tracing::{debug, info};

use crate::site_url::SiteUrl;

/// One tenant of the installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub id: TenantId,
    /// Home URL, with or without scheme
    pub url: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl SiteRecord {
    pub fn new(id: i64, url: impl Into<String>) -> Self {
        Self {
            id: TenantId::new(id),
            url: url.into(),
            name: None,
            archived: false,
            deleted: false,
        }
    }

    /// Whether the record passes the enumeration filter
    pub fn matches(&self, filter: TenantFilter) -> bool {
        !(filter.exclude_archived && self.archived) && !(filter.exclude_deleted && self.deleted)
    }
}

/// Tenants of the installation plus the currently active one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteRegistry {
    #[serde(default)]
    sites: Vec<SiteRecord>,

    #[serde(skip)]
    current: Option<TenantId>,
}

impl SiteRegistry {
    pub fn new(sites: Vec<SiteRecord>) -> Self {
        Self {
            sites,
            current: None,
        }
    }

    /// Parse a registry from TOML
    pub fn from_toml(content: &str) -> Result<Self> {
        let registry: Self = toml::from_str(content)
            .map_err(|e| SiteCmdError::Config(format!("Invalid site registry: {}", e)))?;
        registry.validate()?;
        Ok(registry)
    }

    /// Serialize the registry to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SiteCmdError::Serialization(e.to_string()))
    }

    /// Load a registry file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading site registry from: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| {
            SiteCmdError::Config(format!(
                "Cannot read site registry {}: {}",
                path.display(),
                e
            ))
        })?;

        let registry = Self::from_toml(&content)?;
        debug!("Loaded {} sites", registry.sites.len());
        Ok(registry)
    }

    /// Write the registry file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Reject zero and duplicate IDs
    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for site in &self.sites {
            if site.id.is_zero() {
                return Err(SiteCmdError::Config(
                    "Site ID 0 is not allowed".to_string(),
                ));
            }
            if !seen.insert(site.id) {
                return Err(SiteCmdError::Config(format!(
                    "Duplicate site ID: {}",
                    site.id
                )));
            }
        }
        Ok(())
    }

    pub fn sites(&self) -> &[SiteRecord] {
        &self.sites
    }

    pub fn site(&self, id: TenantId) -> Option<&SiteRecord> {
        self.sites.iter().find(|site| site.id == id)
    }

    /// Record of the currently active site
    pub fn current_site(&self) -> Option<&SiteRecord> {
        self.current.and_then(|id| self.site(id))
    }

    /// Site whose home URL matches `url`
    pub fn site_for_url(&self, url: &SiteUrl) -> Option<&SiteRecord> {
        self.sites.iter().find(|site| {
            SiteUrl::parse(&site.url)
                .map(|home| home.matches(url))
                .unwrap_or(false)
        })
    }
}

impl TenantDirectory for SiteRegistry {
    fn list_tenant_ids(&self, filter: TenantFilter) -> Result<Vec<TenantId>> {
        let mut ids: Vec<TenantId> = self
            .sites
            .iter()
            .filter(|site| site.matches(filter))
            .map(|site| site.id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

impl TenantContext for SiteRegistry {
    fn switch_to(&mut self, tenant: TenantId) -> Result<()> {
        let site = self
            .site(tenant)
            .ok_or(SiteCmdError::TenantNotFound(tenant))?;
        debug!("Switching to site {} ({})", site.id, site.url);
        self.current = Some(tenant);
        Ok(())
    }

    fn current(&self) -> Option<TenantId> {
        self.current
    }
}
