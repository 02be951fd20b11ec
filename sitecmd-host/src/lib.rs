//! sitecmd-host
//!
//! Host application collaborators used by the command runtime:
//!
//! - `registry::SiteRegistry`: tenant enumeration and tenant-context switching
//! - `bootstrap::bootstrap`: locates the installation and selects the initial site
//! - `site_url::SiteUrl`: parsing of the `--url` option

pub mod bootstrap;
pub mod registry;
pub mod site_url;

pub use bootstrap::{bootstrap, find_root, locate_registry, HostOptions};
pub use registry::{SiteRecord, SiteRegistry};
pub use site_url::SiteUrl;
