//! Commands bundled with the `sitecmd` binary

mod site_info;
mod site_list;

pub use site_info::SiteInfo;
pub use site_list::SiteList;

use sitecmd_host::SiteRegistry;

use crate::application::Application;

/// Application with every bundled command registered
pub fn application() -> sitecmd_core::Result<Application<SiteRegistry>> {
    let mut app =
        Application::new("sitecmd").about("Run commands against the sites of an installation");
    app.register(SiteList)?.register(SiteInfo)?;
    Ok(app)
}
