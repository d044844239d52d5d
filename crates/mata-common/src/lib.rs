pub mod errors;
pub mod types;

pub use errors::{BridgeError, PlatformError, ShellError};
pub use types::{LogicalSize, PhysicalSize, Point, ShowState};

pub type Result<T> = std::result::Result<T, ShellError>;
