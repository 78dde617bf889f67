//! # Pulse HTML Compiler
//!
//! Serializes render trees into web pages: class-based markup plus one
//! generated stylesheet. Interactive pages also carry the runtime script that
//! wires copy buttons, collapsibles and live feeds.

mod compiler;
mod styles;

pub use compiler::{
    compile_block, compile_document, runtime_scripts, CompileError, CompileOptions, RUNTIME_JS,
};
pub use styles::{page_css, stylesheet, MAX_COLUMNS, NARROW_SCREEN};

#[cfg(test)]
mod tests;
