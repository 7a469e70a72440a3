//! Prompt construction with bounded length.

use storyteller_core::CAPTION_PLACEHOLDER;

/// Upper bound on a built prompt, in characters.
pub const MAX_PROMPT_LENGTH: usize = 2000;

/// Template used when neither the service nor the request supplies one.
pub const DEFAULT_PROMPT_TEMPLATE: &str =
    "Create an engaging narrative based on this scene: {caption}";

/// Marker appended to a shortened caption.
pub const ELLIPSIS: &str = "...";

/// Substitute `caption` into `template` (or the default template).
///
/// When the result is longer than [`MAX_PROMPT_LENGTH`] the caption loses
/// `overflow + 3` trailing characters, gains [`ELLIPSIS`], and the template
/// is filled again. A caption shorter than that becomes just the ellipsis.
/// Lengths count `char`s, so multi-byte text is never split mid code point.
///
/// # Examples
///
/// ```
/// use storyteller_narrative::{build_prompt, MAX_PROMPT_LENGTH};
///
/// assert_eq!(
///     build_prompt("a red square", None),
///     "Create an engaging narrative based on this scene: a red square"
/// );
///
/// let long = "x".repeat(5000);
/// let prompt = build_prompt(&long, Some("Story: {caption}"));
/// assert_eq!(prompt.chars().count(), MAX_PROMPT_LENGTH);
/// assert!(prompt.ends_with("..."));
/// ```
pub fn build_prompt(caption: &str, template: Option<&str>) -> String {
    let template = template.unwrap_or(DEFAULT_PROMPT_TEMPLATE);
    let prompt = fill(template, caption);

    let length = prompt.chars().count();
    if length <= MAX_PROMPT_LENGTH {
        return prompt;
    }

    let excess = length - MAX_PROMPT_LENGTH;
    let keep = caption
        .chars()
        .count()
        .saturating_sub(excess + ELLIPSIS.chars().count());

    let mut shortened: String = caption.chars().take(keep).collect();
    shortened.push_str(ELLIPSIS);

    tracing::debug!(
        original_length = length,
        excess,
        kept_caption_chars = keep,
        "Truncated caption to fit prompt limit"
    );

    fill(template, &shortened)
}

fn fill(template: &str, caption: &str) -> String {
    template.replace(CAPTION_PLACEHOLDER, caption)
}
