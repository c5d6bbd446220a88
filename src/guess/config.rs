//! Configuration options for writing guesses back into a model tree.

use super::layout::GuessLayout;

/// Options for [`set_params_from_guess_with`](super::set_params_from_guess_with).
#[derive(Debug, Clone, Default)]
pub struct GuessConfig {
    /// Reject guess values outside the bounds of their element. Default: false
    ///
    /// The optimizer is normally trusted to respect the bound vectors returned
    /// by `make_guess`.
    pub strict_bounds: bool,

    /// Layout the guess was built from. Default: None
    ///
    /// When set, every traversal slot must equal the layout entry at the same
    /// position, which catches reorderings that keep the total count.
    pub layout: Option<GuessLayout>,
}

impl GuessConfig {
    /// Bounds-checked writes
    pub fn strict() -> Self {
        Self {
            strict_bounds: true,
            layout: None,
        }
    }

    pub fn with_strict_bounds(mut self, strict_bounds: bool) -> Self {
        self.strict_bounds = strict_bounds;
        self
    }

    /// Validate the traversal against `layout`
    pub fn with_layout(mut self, layout: GuessLayout) -> Self {
        self.layout = Some(layout);
        self
    }
}
