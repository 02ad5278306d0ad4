//! GUI module - Navigation and pages

mod app;
mod eda_page;
mod home_page;
mod overview_page;
mod sidebar;

pub use app::ExplorerApp;
pub use eda_page::EdaPage;
pub use home_page::HomePage;
pub use overview_page::OverviewPage;
pub use sidebar::{Page, Sidebar, SidebarAction};
