//! # Pulse Email Compiler
//!
//! Serializes render trees into a single HTML file that survives mail clients.
//!
//! ```text
//! RNode tree ──resolve(theme, email)──► literal values only
//!      │
//!      └──► 600px shell table
//!             ├─ one <tr><td> per block, inline styles only
//!             ├─ grids and stacks become stacked rows
//!             └─ rows become a single-row table
//! ```
//!
//! ## Rules
//!
//! 1. No `var()` anywhere: every value comes from the literal theme.
//! 2. No scripts and no class-based layout.
//! 3. Backgrounds go on `<td>` as `bgcolor` as well as inline CSS.
//! 4. Images carry alt text and explicit dimensions.

mod compiler;
mod inline;

pub use compiler::{compile_email, email_filename, EmailError, EmailOptions, EMAIL_WIDTH};
pub use inline::{font_families, fonts_link};

#[cfg(test)]
mod tests;
