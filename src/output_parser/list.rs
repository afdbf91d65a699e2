//! Item list extraction from a single labelled reply line.
//!
//! [`split_items`] turns the value half of a line such as
//! `Контроли: MFA; обучение, журналирование` into an ordered list.

/// Characters that separate items. Either one is a separator on its own.
const ITEM_SEPARATORS: [char; 2] = [';', ','];

/// Split a delimiter-separated fragment into trimmed, non-empty items.
///
/// Both `;` and `,` separate items. Surrounding whitespace is trimmed,
/// pieces that are empty after trimming are dropped, and the order of the
/// surviving pieces is preserved. Never fails: empty input yields an empty list.
///
/// # Examples
///
/// ```
/// use infosec_assistant::output_parser::split_items;
///
/// assert_eq!(split_items("a; b ,c ;;"), vec!["a", "b", "c"]);
/// assert!(split_items("").is_empty());
/// ```
pub fn split_items(text: &str) -> Vec<String> {
    text.split(ITEM_SEPARATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
