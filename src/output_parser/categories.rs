//! Category block extraction (`name=items; name=items`).

use std::collections::BTreeMap;

use crate::output_parser::list::split_items;

/// Category name to its list of controls.
pub type CategoryMap = BTreeMap<String, Vec<String>>;

/// Parse `;`-joined `name=value` groups into a category map.
///
/// Each chunk is split on its first `=`. Chunks without `=` are skipped.
/// The value goes through [`split_items`]; since the outer split already
/// consumed every `;`, only `,` separates items inside a value in practice.
/// Categories whose item list comes out empty are not inserted, and a
/// repeated name replaces the earlier entry.
///
/// # Examples
///
/// ```
/// use infosec_assistant::output_parser::parse_categories;
///
/// let map = parse_categories("bad-chunk-no-equals; x=y");
/// assert_eq!(map.len(), 1);
/// assert_eq!(map["x"], vec!["y"]);
/// ```
pub fn parse_categories(text: &str) -> CategoryMap {
    let mut categories = CategoryMap::new();
    for chunk in text.split(';') {
        let Some((name, value)) = chunk.split_once('=') else {
            continue;
        };
        let items = split_items(value);
        if !items.is_empty() {
            categories.insert(name.trim().to_string(), items);
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_categories() {
        let map = parse_categories("административные=policy1, policy2; технические=firewall");
        assert_eq!(map.len(), 2);
        assert_eq!(map["административные"], vec!["policy1", "policy2"]);
        assert_eq!(map["технические"], vec!["firewall"]);
    }

    #[test]
    fn chunk_without_equals_dropped() {
        let map = parse_categories("bad-chunk-no-equals; x=y");
        assert_eq!(map.len(), 1);
        assert_eq!(map["x"], vec!["y"]);
    }

    #[test]
    fn empty_value_not_inserted() {
        let map = parse_categories("физические= ; технические=IDS");
        assert!(!map.contains_key("физические"));
        assert_eq!(map["технические"], vec!["IDS"]);
    }

    #[test]
    fn splits_on_first_equals_only() {
        let map = parse_categories("технические=key=value, b");
        assert_eq!(map["технические"], vec!["key=value", "b"]);
    }

    #[test]
    fn later_duplicate_overwrites() {
        let map = parse_categories("a=1, 2; a=3");
        assert_eq!(map.len(), 1);
        assert_eq!(map["a"], vec!["3"]);
    }

    #[test]
    fn semicolon_inside_value_starts_new_chunk() {
        // "b" has no '=' and is dropped rather than joining category "a"
        let map = parse_categories("a=x; b; c=y");
        assert_eq!(map["a"], vec!["x"]);
        assert_eq!(map["c"], vec!["y"]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn name_is_trimmed() {
        let map = parse_categories("  физические  = замки");
        assert_eq!(map["физические"], vec!["замки"]);
    }

    #[test]
    fn empty_input() {
        assert!(parse_categories("").is_empty());
    }
}
