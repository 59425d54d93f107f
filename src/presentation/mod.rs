pub mod dashboard;

pub use dashboard::{BrowserController, Dashboard, mount};
