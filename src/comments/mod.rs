//! Third-party comment widget embed
//!
//! Post pages get a designated mount point plus the widget's client script,
//! configured from `_config.yml`. The widget itself is an external
//! collaborator; this module only emits its script tag.

use crate::config::CommentsConfig;

/// Id of the element the widget attaches to
pub const MOUNT_ID: &str = "comments";

/// Render the mount point and script tag, or `None` when disabled
///
/// The widget needs a backing repository; an empty `repo` disables the
/// embed even when `enable` is set.
pub fn embed(config: &CommentsConfig) -> Option<String> {
    if !config.enable || config.repo.is_empty() {
        return None;
    }

    Some(format!(
        concat!(
            r#"<div id="{mount}"></div>"#,
            "\n",
            r#"<script src="{src}" repo="{repo}" issue-term="{term}" label="{label}" theme="{theme}" crossorigin="anonymous" async></script>"#
        ),
        mount = MOUNT_ID,
        src = attr_escape(&config.script_url),
        repo = attr_escape(&config.repo),
        term = attr_escape(&config.issue_term),
        label = attr_escape(&config.label),
        theme = attr_escape(&config.theme),
    ))
}

/// Escape HTML attribute values
fn attr_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
