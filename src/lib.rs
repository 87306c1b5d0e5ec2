pub mod cli;
pub mod config;
pub mod constants;
pub mod edit;
pub mod error;
pub mod fence;
pub mod lesson;
pub mod link;
pub mod logging;
pub mod markdown;
pub mod note;
pub mod report;
pub mod resolve;
pub mod task;
pub mod util;

pub use cli::{Cli, Command};
pub use config::VaultConfig;
pub use error::{DopeError, Result};
pub use link::{HyperLink, LinkKind};
pub use note::{collect_notes, LineEnding, Note};
pub use resolve::{resolve_link, LinkTarget};
pub use task::{Task, TaskKind, TaskParser};
