pub mod edit;
pub mod error;
pub mod palette;
pub mod types;

pub use edit::*;
pub use error::DialogueError;
pub use palette::*;
pub use types::*;
