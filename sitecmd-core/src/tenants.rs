//! Tenant selection
//!
//! Multi-tenant commands run once per tenant. Which tenants is decided from
//! three options:
//!
//! - `--blogs <IDS>`: comma-separated tenant IDs (default `1`)
//! - `--all-sites`: every active tenant known to the host, instead of `--blogs`
//! - `--skip-blogs <IDS>`: tenant IDs to leave out
//!
//! Malformed IDs read as `0` and are dropped along with any zero.

use std::collections::HashSet;
use tracing::debug;

use crate::error::Result;
use crate::input::CliInput;
use crate::types::{TenantFilter, TenantId, DEFAULT_TENANTS, MAIN_TENANT};
use crate::value::parse_id_list;

/// Option holding the explicit tenant list
pub const OPTION_BLOGS: &str = "blogs";
/// Flag selecting every tenant
pub const OPTION_ALL_SITES: &str = "all-sites";
/// Option holding the tenants to skip
pub const OPTION_SKIP_BLOGS: &str = "skip-blogs";

/// Enumerates the tenants of the host application
pub trait TenantDirectory {
    fn list_tenant_ids(&self, filter: TenantFilter) -> Result<Vec<TenantId>>;
}

/// Switches the host application's active tenant
///
/// `switch_to` must have fully applied the new context when it returns.
pub trait TenantContext {
    fn switch_to(&mut self, tenant: TenantId) -> Result<()>;

    /// Tenant currently active, if any
    fn current(&self) -> Option<TenantId>;
}

/// Computes the tenants a command runs against
///
/// The skip-list accumulates over the lifetime of the resolver: every call
/// to [`TenantResolver::resolve`] adds the `--skip-blogs` IDs to it, while
/// the included set is recomputed from scratch.
#[derive(Debug, Clone, Default)]
pub struct TenantResolver {
    skipped: Vec<TenantId>,
}

impl TenantResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude one tenant from every subsequent resolution
    pub fn skip(&mut self, tenant: TenantId) {
        self.skipped.push(tenant);
    }

    /// Exclude the main site
    pub fn skip_main_site(&mut self) {
        self.skip(MAIN_TENANT);
    }

    /// Tenants skipped so far
    pub fn skipped(&self) -> &[TenantId] {
        &self.skipped
    }

    /// Ordered, deduplicated tenant IDs to iterate over
    pub fn resolve(
        &mut self,
        input: &dyn CliInput,
        directory: &dyn TenantDirectory,
    ) -> Result<Vec<TenantId>> {
        if input.has_option(OPTION_SKIP_BLOGS) {
            let skip = input.get_option(OPTION_SKIP_BLOGS);
            if skip.to_bool() {
                self.skipped
                    .extend(parse_id_list(&skip.to_string()).into_iter().map(TenantId::new));
            }
        }

        let all_sites =
            input.has_option(OPTION_ALL_SITES) && input.get_option(OPTION_ALL_SITES).to_bool();

        let candidates = if all_sites {
            directory.list_tenant_ids(TenantFilter::active())?
        } else {
            let raw = if input.has_option(OPTION_BLOGS) {
                input.get_option(OPTION_BLOGS).to_string()
            } else {
                DEFAULT_TENANTS.to_string()
            };
            parse_id_list(&raw).into_iter().map(TenantId::new).collect()
        };

        let resolved = filter_tenants(candidates, &self.skipped);
        debug!(?resolved, skipped = ?self.skipped, all_sites, "resolved tenants");

        Ok(resolved)
    }
}

/// `candidates ∖ skipped`, zeros removed, first occurrence kept
pub fn filter_tenants(
    candidates: impl IntoIterator<Item = TenantId>,
    skipped: &[TenantId],
) -> Vec<TenantId> {
    let skipped: HashSet<TenantId> = skipped.iter().copied().collect();
    let mut seen = HashSet::new();

    candidates
        .into_iter()
        .filter(|id| !id.is_zero() && !skipped.contains(id))
        .filter(|id| seen.insert(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiteCmdError;
    use crate::input::StaticInput;
    use crate::value::Value;
    use std::cell::Cell;

    struct FixedDirectory {
        ids: Vec<i64>,
        calls: Cell<usize>,
    }

    impl FixedDirectory {
        fn new(ids: &[i64]) -> Self {
            Self {
                ids: ids.to_vec(),
                calls: Cell::new(0),
            }
        }
    }

    impl TenantDirectory for FixedDirectory {
        fn list_tenant_ids(&self, filter: TenantFilter) -> Result<Vec<TenantId>> {
            assert_eq!(filter, TenantFilter::active());
            self.calls.set(self.calls.get() + 1);
            Ok(self.ids.iter().copied().map(TenantId::new).collect())
        }
    }

    struct FailingDirectory;

    impl TenantDirectory for FailingDirectory {
        fn list_tenant_ids(&self, _filter: TenantFilter) -> Result<Vec<TenantId>> {
            Err(SiteCmdError::Host("database unavailable".to_string()))
        }
    }

    fn ids(raw: &[i64]) -> Vec<TenantId> {
        raw.iter().copied().map(TenantId::new).collect()
    }

    #[test]
    fn test_explicit_list_dedupes_and_drops_malformed() {
        let input = StaticInput::new().option(OPTION_BLOGS, "2,3,2,0,abc");
        let directory = FixedDirectory::new(&[]);
        let resolved = TenantResolver::new().resolve(&input, &directory).unwrap();
        assert_eq!(resolved, ids(&[2, 3]));
        assert_eq!(directory.calls.get(), 0);
    }

    #[test]
    fn test_all_sites_with_skip_list() {
        let input = StaticInput::new()
            .option(OPTION_BLOGS, "1")
            .option(OPTION_ALL_SITES, true)
            .option(OPTION_SKIP_BLOGS, "2,4");
        let directory = FixedDirectory::new(&[1, 2, 3, 4]);
        let resolved = TenantResolver::new().resolve(&input, &directory).unwrap();
        assert_eq!(resolved, ids(&[1, 3]));
    }

    #[test]
    fn test_default_blogs_when_option_undefined() {
        let directory = FixedDirectory::new(&[]);
        let resolved = TenantResolver::new()
            .resolve(&StaticInput::new(), &directory)
            .unwrap();
        assert_eq!(resolved, ids(&[1]));
    }

    #[test]
    fn test_empty_blogs_value_selects_nothing() {
        let input = StaticInput::new().option(OPTION_BLOGS, Value::Null);
        let directory = FixedDirectory::new(&[]);
        let resolved = TenantResolver::new().resolve(&input, &directory).unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_false_all_sites_uses_blogs() {
        let input = StaticInput::new()
            .option(OPTION_BLOGS, "5")
            .option(OPTION_ALL_SITES, false);
        let directory = FixedDirectory::new(&[1, 2]);
        let resolved = TenantResolver::new().resolve(&input, &directory).unwrap();
        assert_eq!(resolved, ids(&[5]));
    }

    #[test]
    fn test_skip_list_accumulates_across_calls() {
        let directory = FixedDirectory::new(&[]);
        let mut resolver = TenantResolver::new();

        let first = StaticInput::new()
            .option(OPTION_BLOGS, "1,2,3")
            .option(OPTION_SKIP_BLOGS, "2");
        assert_eq!(resolver.resolve(&first, &directory).unwrap(), ids(&[1, 3]));

        let second = StaticInput::new()
            .option(OPTION_BLOGS, "1,2,3")
            .option(OPTION_SKIP_BLOGS, "3");
        assert_eq!(resolver.resolve(&second, &directory).unwrap(), ids(&[1]));
        assert_eq!(resolver.skipped(), ids(&[2, 3]).as_slice());
    }

    #[test]
    fn test_skip_main_site() {
        let input = StaticInput::new().option(OPTION_ALL_SITES, true);
        let directory = FixedDirectory::new(&[1, 2]);
        let mut resolver = TenantResolver::new();
        resolver.skip_main_site();
        assert_eq!(resolver.resolve(&input, &directory).unwrap(), ids(&[2]));
    }

    #[test]
    fn test_zero_skip_value_is_ignored() {
        let input = StaticInput::new()
            .option(OPTION_BLOGS, "1,2")
            .option(OPTION_SKIP_BLOGS, "0");
        let directory = FixedDirectory::new(&[]);
        let mut resolver = TenantResolver::new();
        assert_eq!(resolver.resolve(&input, &directory).unwrap(), ids(&[1, 2]));
        assert!(resolver.skipped().is_empty());
    }

    #[test]
    fn test_enumeration_error_propagates() {
        let input = StaticInput::new().option(OPTION_ALL_SITES, true);
        let result = TenantResolver::new().resolve(&input, &FailingDirectory);
        assert!(matches!(result, Err(SiteCmdError::Host(_))));
    }
}
