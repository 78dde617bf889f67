//! # Pulse Theme
//!
//! Maps a theme's abstract tokens to values a render target can use.
//!
//! ```text
//! Theme ──resolve(mode)──► ResolvedTokens
//!                           ├─ interactive / static / viewer: var(--c-*) + :root rule
//!                           └─ email: literals only, never a residual var()
//! ```

pub mod css;
mod error;
mod mode;
mod resolver;

pub use css::{CssRule, StyleSheet};
pub use error::{ThemeError, ThemeResult};
pub use mode::RenderMode;
pub use resolver::{resolve, ResolvedTokens};
