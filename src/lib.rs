pub mod checker;
pub mod config;
pub mod connector;
pub mod error;
pub mod output;
pub mod state;

pub use checker::{check_all_phases, next_step, ProgressReport};
pub use connector::WordPressConnector;
pub use error::{Error, Result};
pub use state::{FetchStatus, SiteState};
