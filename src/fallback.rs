use tracing::debug;

const MAXRES_SUFFIX: &str = "maxresdefault.jpg";
const HQ_SUFFIX: &str = "hqdefault.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackState {
    #[default]
    Primary,
    Retried,
    Hidden,
}

/// What the rendering surface should do after a load failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureOutcome {
    Retry(String),
    Hide,
}

/// Per-image load failure policy.
///
/// A YouTube `maxresdefault.jpg` thumbnail gets one retry with the
/// `hqdefault.jpg` variant; any other failure hides the image for good.
/// Each rendered image owns its own chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFallbackChain {
    state: FallbackState,
    url: String,
}

impl ImageFallbackChain {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            state: FallbackState::Primary,
            url: url.into(),
        }
    }

    pub fn state(&self) -> FallbackState {
        self.state
    }

    /// URL to display, `None` once the image is hidden.
    pub fn current_url(&self) -> Option<&str> {
        match self.state {
            FallbackState::Hidden => None,
            _ => Some(&self.url),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.state == FallbackState::Hidden
    }

    /// Handles a display failure of the current URL.
    pub fn on_failure(&mut self) -> FailureOutcome {
        match self.state {
            FallbackState::Primary if self.url.contains(MAXRES_SUFFIX) => {
                let substitute = self.url.replacen(MAXRES_SUFFIX, HQ_SUFFIX, 1);
                debug!(from = %self.url, to = %substitute, "Retrying thumbnail at lower resolution");
                self.url = substitute;
                self.state = FallbackState::Retried;
                FailureOutcome::Retry(self.url.clone())
            }
            FallbackState::Primary | FallbackState::Retried => {
                debug!(url = %self.url, "Hiding thumbnail after load failure");
                self.state = FallbackState::Hidden;
                FailureOutcome::Hide
            }
            FallbackState::Hidden => FailureOutcome::Hide,
        }
    }
}
