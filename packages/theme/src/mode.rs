use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four targets a document can be projected into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Live page with controls and the runtime shim
    Interactive,
    /// Standalone page, no script
    StaticPage,
    /// Table layout with inline literal styles
    Email,
    /// Tree painted by the offline viewer
    ViewerRuntime,
}

impl RenderMode {
    pub const ALL: [RenderMode; 4] = [
        RenderMode::Interactive,
        RenderMode::StaticPage,
        RenderMode::Email,
        RenderMode::ViewerRuntime,
    ];

    /// Whether the target can follow CSS custom properties
    pub fn allows_indirection(self) -> bool {
        !matches!(self, RenderMode::Email)
    }

    /// Whether copy buttons, toggles and live feeds exist in this target
    pub fn is_interactive(self) -> bool {
        matches!(self, RenderMode::Interactive | RenderMode::ViewerRuntime)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Interactive => "interactive",
            RenderMode::StaticPage => "static-page",
            RenderMode::Email => "email",
            RenderMode::ViewerRuntime => "viewer-runtime",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interactive" => Ok(RenderMode::Interactive),
            "static" | "static-page" => Ok(RenderMode::StaticPage),
            "email" => Ok(RenderMode::Email),
            "viewer" | "viewer-runtime" => Ok(RenderMode::ViewerRuntime),
            other => Err(format!("Unknown render mode: {}", other)),
        }
    }
}
