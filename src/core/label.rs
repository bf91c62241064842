use std::sync::LazyLock;

use regex::Regex;

/// A word starts at every ASCII uppercase letter; `_` and whitespace separate.
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z][^A-Z_\s]*|[^A-Z_\s]+").expect("word pattern is valid")
});

/// Human label for a key: `firstName` and `first_name` both become
/// `First Name`. Empty words are dropped.
pub fn display_label(key: &str) -> String {
    WORD.find_iter(key)
        .map(|word| title_case(word.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn item_label(index: usize) -> String {
    format!("Item {}", index + 1)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    first
        .to_uppercase()
        .chain(chars.flat_map(char::to_lowercase))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{display_label, item_label};

    #[test]
    fn splits_camel_snake_and_spaces() {
        assert_eq!(display_label("firstName"), "First Name");
        assert_eq!(display_label("first_name"), "First Name");
        assert_eq!(display_label("first name"), "First Name");
        assert_eq!(display_label("SHOUTING"), "S H O U T I N G");
    }

    #[test]
    fn lowercases_word_tails() {
        assert_eq!(display_label("postCODE_area"), "Post C O D E Area");
        assert_eq!(display_label("eMAIL"), "E M A I L");
    }

    #[test]
    fn drops_empty_words() {
        assert_eq!(display_label("__meta__"), "Meta");
        assert_eq!(display_label(""), "");
    }

    #[test]
    fn indices_become_item_labels() {
        assert_eq!(item_label(0), "Item 1");
        assert_eq!(item_label(4), "Item 5");
    }
}
