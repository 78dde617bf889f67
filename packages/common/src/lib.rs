pub mod filesystem;
pub mod html;
pub mod runtime;

pub use filesystem::*;
pub use html::*;
