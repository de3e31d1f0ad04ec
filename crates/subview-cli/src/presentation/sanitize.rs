use once_cell::sync::Lazy;
use regex::Regex;

static ANSI_CSI: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1B\[[0-9;]*[a-zA-Z]").unwrap());

/// C0 controls other than tab, newline and carriage return
static CONTROL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x00-\x08\x0B-\x1F]").unwrap());

/// Zero-width characters, variation selectors, check/cross marks and the
/// pictograph block: all render with unpredictable cell widths.
static UNSTABLE_WIDTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{200B}\x{200C}\x{200D}\x{FEFF}\x{FE0E}\x{FE0F}\x{2713}\x{2717}\x{1F300}-\x{1F9FF}]")
        .unwrap()
});

/// Reduce text to single-width, single-line terminal-safe characters.
pub fn sanitize_text(text: &str) -> String {
    let text = ANSI_CSI.replace_all(text, "");
    let text = text.replace(['\n', '\t'], " ").replace('\r', "");
    let text = CONTROL.replace_all(&text, "");
    let text = UNSTABLE_WIDTH.replace_all(&text, "");
    text.replace('\u{26A1}', "*").replace('\u{2192}', "|")
}
