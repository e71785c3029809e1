pub mod roots;
pub mod settings;
pub mod workspace;

pub use roots::{SearchRoots, ENV_PATH_VAR};
pub use settings::Settings;
pub use workspace::{IndexError, ScanSummary, WorkspaceIndex};
