//! Host platform flags
//!
//! Every platform-specific decision in the crate reads one of these flags.
//! Hosts either build a `Platform` by hand (tests, native embedders), pass it
//! from JavaScript as a plain object, or let `web::detect_platform` fill it in.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Platform {
    /// Apple keybindings: meta is the command modifier, alt moves by word,
    /// and the emacs-style ctrl bindings are active.
    pub apple: bool,

    /// Firefox fires `input` after `compositionend`, so composition-end
    /// reconciliation has to wait a turn.
    pub firefox: bool,

    /// The host delivers `beforeinput` events with target ranges.
    pub before_input: bool,
}

impl Platform {
    /// Derive platform flags from `navigator.userAgent` and `navigator.platform`.
    pub fn from_user_agent(user_agent: &str, platform_name: &str, before_input: bool) -> Self {
        let apple = ["Mac", "iPod", "iPhone", "iPad"]
            .iter()
            .any(|name| platform_name.contains(name));

        let firefox = user_agent.to_ascii_lowercase().contains("firefox")
            && !user_agent.to_ascii_lowercase().contains("seamonkey");

        Self {
            apple,
            firefox,
            before_input,
        }
    }

    /// Apple uses meta for shortcuts, everything else uses ctrl.
    pub fn control_or_meta(&self, ctrl: bool, meta: bool) -> bool {
        if self.apple {
            meta
        } else {
            ctrl
        }
    }
}
