//! Quick-reply extraction from free-form bot prose.
//!
//! Bot questions sent as plain text often spell out their options
//! ("изберете: да / не", "мъж / жена"). The extractor turns those into
//! reply shortcuts, falling back to a few topic heuristics. It is best
//! effort: over- and under-matching are accepted.

use std::sync::OnceLock;

use regex::Regex;

/// Strategy for deriving reply options from a bot message.
pub trait QuickReplyStrategy: Send + Sync {
    fn extract(&self, html: &str) -> Vec<String>;
}

/// The default strategy: explicit option lists first, then topic heuristics.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicExtractor;

impl QuickReplyStrategy for HeuristicExtractor {
    fn extract(&self, html: &str) -> Vec<String> {
        extract_quick_replies(html)
    }
}

static TAG: OnceLock<Option<Regex>> = OnceLock::new();
static WHITESPACE: OnceLock<Option<Regex>> = OnceLock::new();
static CHOOSE: OnceLock<Option<Regex>> = OnceLock::new();
static SLASH_LIST: OnceLock<Option<Regex>> = OnceLock::new();

fn pattern(cell: &'static OnceLock<Option<Regex>>, source: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(source).ok()).as_ref()
}

/// Plain lowercase text of an HTML fragment with whitespace collapsed.
fn normalize(html: &str) -> String {
    let mut text = html.to_string();
    if let Some(re) = pattern(&TAG, r"<[^>]+>") {
        text = re.replace_all(&text, " ").into_owned();
    }
    if let Some(re) = pattern(&WHITESPACE, r"\s+") {
        text = re.replace_all(&text, " ").into_owned();
    }
    text.trim().to_lowercase()
}

/// The option list spelled out in the text, if any.
fn option_chunk(text: &str) -> Option<&str> {
    let choose = pattern(&CHOOSE, r"изберете[^:]*?:\s*([а-яa-z0-9 ,/\-]+)");
    let slash_list = pattern(&SLASH_LIST, r"([а-яa-z0-9 ,]+/[а-яa-z0-9 ,/]+)");

    [choose, slash_list]
        .into_iter()
        .flatten()
        .find_map(|re| re.captures(text).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Derive quick-reply options from a bot message.
pub fn extract_quick_replies(html: &str) -> Vec<String> {
    let text = normalize(html);

    if let Some(chunk) = option_chunk(&text) {
        return chunk
            .split('/')
            .map(|part| part.replace(['*', '_', '`'], "").trim().to_string())
            .filter(|part| !part.is_empty())
            .collect();
    }

    if text.contains("тренировка") && text.contains("минути") {
        return strings(&["30", "40", "60"]);
    }
    if text.contains("дни в седмицата") {
        return strings(&["1", "2", "3", "4", "5", "6", "7"]);
    }
    if text.contains("хранения") || text.contains("хранене") {
        return strings(&["2", "3", "4", "5", "6"]);
    }
    if text.contains("алергии") {
        return strings(&["не"]);
    }
    if text.contains("млечни") {
        return strings(&["да", "не"]);
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_choice() {
        assert_eq!(
            extract_quick_replies("Моля, изберете: да / не"),
            vec!["да", "не"]
        );
    }

    #[test]
    fn test_choice_inside_markup() {
        let html = "<p>Изберете <strong>цел</strong>: отслабване / покачване / поддържане</p>";
        assert_eq!(
            extract_quick_replies(html),
            vec!["отслабване", "покачване", "поддържане"]
        );
    }

    #[test]
    fn test_bare_slash_list() {
        assert_eq!(
            extract_quick_replies("Какъв е вашият пол? (Мъж / Жена)"),
            vec!["мъж", "жена"]
        );
    }

    #[test]
    fn test_empty_chunk_skips_heuristics() {
        // A slash list with no usable options wins over the topic cues.
        assert!(extract_quick_replies("Тренировка: * / * минути").is_empty());
    }

    #[test]
    fn test_training_duration_heuristic() {
        assert_eq!(
            extract_quick_replies("Колко минути да продължава една тренировка?"),
            vec!["30", "40", "60"]
        );
    }

    #[test]
    fn test_days_heuristic() {
        assert_eq!(
            extract_quick_replies("Колко дни в седмицата можете да тренирате?").len(),
            7
        );
    }

    #[test]
    fn test_meals_heuristic() {
        assert_eq!(
            extract_quick_replies("Колко хранения на ден предпочитате?"),
            vec!["2", "3", "4", "5", "6"]
        );
    }

    #[test]
    fn test_allergy_and_dairy_heuristics() {
        assert_eq!(extract_quick_replies("Имате ли хранителни алергии?"), vec!["не"]);
        assert_eq!(
            extract_quick_replies("Консумирате ли млечни продукти?"),
            vec!["да", "не"]
        );
    }

    #[test]
    fn test_no_cues() {
        assert!(extract_quick_replies("random text with no cues").is_empty());
        assert!(extract_quick_replies("").is_empty());
    }

    #[test]
    fn test_strategy_trait_delegates() {
        let strategy = HeuristicExtractor;
        assert_eq!(strategy.extract("изберете: a / b"), vec!["a", "b"]);
    }
}
