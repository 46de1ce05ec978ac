//! Advisory content moderation for image locators.
//!
//! The gate only reports a verdict; nothing on the server consults it
//! before generation endpoints run.

use crate::models::ModerationVerdict;

pub const NSFW_KEYWORD: &str = "nsfw";
pub const NSFW_REASON: &str = "NSFW detected";

/// Extra rejection rule. Returns a rejection reason, or `None` to pass.
pub type ModerationHook = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

pub trait ModerationService: Send + Sync {
    fn check(&self, locator: Option<&str>) -> ModerationVerdict;
}

/// Substring heuristic, optionally followed by a caller-supplied hook
/// (for example a model-backed classifier).
#[derive(Default)]
pub struct KeywordModerator {
    hook: Option<ModerationHook>,
}

impl KeywordModerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook(mut self, hook: ModerationHook) -> Self {
        self.hook = Some(hook);
        self
    }
}

impl ModerationService for KeywordModerator {
    fn check(&self, locator: Option<&str>) -> ModerationVerdict {
        let Some(locator) = locator else {
            return ModerationVerdict::approved();
        };

        if locator.to_lowercase().contains(NSFW_KEYWORD) {
            return ModerationVerdict::rejected(NSFW_REASON);
        }

        match self.hook.as_ref().and_then(|hook| hook(locator)) {
            Some(reason) => ModerationVerdict::rejected(reason),
            None => ModerationVerdict::approved(),
        }
    }
}
