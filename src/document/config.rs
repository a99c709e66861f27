//! Document configuration and tick counters.

use std::ops::AddAssign;

use crate::css::specificity::Specificity;
use crate::style::node_style::DEFAULT_ROOT_FONT_SIZE;

// ---------------------------------------------------------------------------
// DocumentConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`Document`](super::Document).
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// Whether a shadow layout tree is kept and laid out.
    pub calculates_layout: bool,
    /// Rules at or above this specificity outrank inline style.
    pub important_threshold: Specificity,
    /// Available width and height for layout passes.
    pub viewport: (f32, f32),
    /// Tag of the root node.
    pub root_tag: String,
    /// Font size `rem` resolves against, and the root's default.
    pub root_font_size: f32,
    /// Optional author CSS compiled after the user agent sheet.
    pub css: Option<String>,
    /// Whether to include the built-in user agent sheet.
    pub user_agent_css: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            calculates_layout: true,
            important_threshold: Specificity::IMPORTANT,
            viewport: (800.0, 600.0),
            root_tag: "view".into(),
            root_font_size: DEFAULT_ROOT_FONT_SIZE,
            css: None,
            user_agent_css: true,
        }
    }
}

impl DocumentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable layout (builder).
    pub fn with_layout(mut self, calculates_layout: bool) -> Self {
        self.calculates_layout = calculates_layout;
        self
    }

    /// Set the important threshold (builder).
    pub fn with_important_threshold(mut self, threshold: Specificity) -> Self {
        self.important_threshold = threshold;
        self
    }

    /// Set the layout viewport (builder).
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = (width, height);
        self
    }

    /// Set the root tag (builder).
    pub fn with_root_tag(mut self, tag: impl Into<String>) -> Self {
        self.root_tag = tag.into();
        self
    }

    /// Set the root font size (builder).
    pub fn with_root_font_size(mut self, size: f32) -> Self {
        self.root_font_size = size;
        self
    }

    /// Set the author CSS (builder).
    pub fn with_css(mut self, css: impl Into<String>) -> Self {
        self.css = Some(css.into());
        self
    }

    /// Include or skip the user agent sheet (builder).
    pub fn with_user_agent_css(mut self, enabled: bool) -> Self {
        self.user_agent_css = enabled;
        self
    }
}

// ---------------------------------------------------------------------------
// TickStats
// ---------------------------------------------------------------------------

/// Work done during one tick (or accumulated over many).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickStats {
    /// Nodes whose style was resolved.
    pub resolves: usize,
    /// Styles pushed to the renderer.
    pub style_applies: usize,
    /// Nodes that asked for a layout pass.
    pub layout_requests: usize,
    /// Layout passes run.
    pub layout_passes: usize,
    /// Boxes pushed to the renderer.
    pub layout_applies: usize,
}

impl AddAssign for TickStats {
    fn add_assign(&mut self, other: Self) {
        self.resolves += other.resolves;
        self.style_applies += other.style_applies;
        self.layout_requests += other.layout_requests;
        self.layout_passes += other.layout_passes;
        self.layout_applies += other.layout_applies;
    }
}
