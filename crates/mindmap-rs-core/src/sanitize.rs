//! Cleanup of markdown artifacts around generated JSON.

/// Opening fence chat models put before a JSON answer.
const OPENING_FENCE: &str = "```json";
/// Closing fence, also matches bare opening fences.
const CLOSING_FENCE: &str = "```";
const BACKTICK: char = '`';

/// Strip code fences, surrounding whitespace and one stray backtick per side.
///
/// Fences are removed everywhere in the text, not only at the edges. After
/// trimming, at most one backtick is dropped from each end.
pub fn sanitize(raw: &str) -> String {
    let without_fences = raw.replace(OPENING_FENCE, "").replace(CLOSING_FENCE, "");
    let mut cleaned = without_fences.trim();
    if let Some(rest) = cleaned.strip_prefix(BACKTICK) {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix(BACKTICK) {
        cleaned = rest;
    }
    cleaned.to_string()
}

#[cfg(test)]
mod tests {
    use super::sanitize;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_json_fence() {
        assert_eq!(sanitize("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(sanitize("```\n{\"a\":1}\n```\n"), "{\"a\":1}");
    }

    #[test]
    fn strips_single_backtick_each_side() {
        assert_eq!(sanitize("`{\"a\":1}`"), "{\"a\":1}");
    }

    #[test]
    fn strips_only_one_backtick_per_side() {
        assert_eq!(sanitize("``x``"), "`x`");
    }

    #[test]
    fn backtick_is_removed_after_trimming() {
        assert_eq!(sanitize("  \n`{}`\t"), "{}");
    }

    #[test]
    fn leaves_plain_text_untouched_apart_from_outer_whitespace() {
        let raw = "  {\"title\": \"Emma\", \"nodes\": []}\n\n";
        assert_eq!(sanitize(raw), raw.trim());
        assert_eq!(sanitize("no json here"), "no json here");
    }

    #[test]
    fn removes_fences_in_the_middle_of_text() {
        assert_eq!(
            sanitize("Here you go:\n```json\n{}\n```\nEnjoy"),
            "Here you go:\n\n{}\n\nEnjoy"
        );
    }

    #[test]
    fn is_idempotent_on_fence_free_payloads() {
        for raw in [
            "{\"a\":1}",
            "  `{\"a\":1}`  ",
            "[1, 2, 3]\n",
            "`",
            "",
            "  spaced  ",
            "plain text",
        ] {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn empty_and_whitespace_inputs_collapse_to_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize(" \n\t "), "");
        assert_eq!(sanitize("```json```"), "");
        assert_eq!(sanitize("`"), "");
    }
}
