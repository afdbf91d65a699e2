//! The fixed instruction preamble and request prompt assembly.

/// Sentinel that should never appear in real templates.
const ESCAPE_SENTINEL: &str = "\x00LBRACE\x00";
/// Sentinel for escaped closing brace.
const ESCAPE_SENTINEL_CLOSE: &str = "\x00RBRACE\x00";

/// Instruction preamble. Keeps the model on information-security topics and
/// pins the reply to the labelled format understood by
/// [`parse_reply`](crate::output_parser::parse_reply).
pub const SECURITY_PROMPT: &str = "Ты эксперт по информационной безопасности. Отвечай строго на русском языке.
Если вопрос НЕ относится к информационной безопасности, ответь ровно строкой: НЕ ИБ
Если относится,то строго ответь так:
ИБ:
Кратко: <1-2 предложения о сути угрозы>
Угроза: <нормализованное название угрозы>
Контроли: пункт1; пункт2; пункт3
Категории: административные=...; технические=...; физические=...
Рекомендации: пункт1; пункт2
Стандарты: ISO 27001 A.5.1; НПД 152-ФЗ
Не добавляй ничего вне этих строк.";

/// Template for the single user turn sent to the model.
const REQUEST_TEMPLATE: &str = "{preamble}\n\nПользовательский запрос: {input}";

/// Substitute `{input}` in `template`.
///
/// Use `{{` to insert a literal `{` and `}}` to insert a literal `}`.
///
/// # Example
///
/// ```
/// use infosec_assistant::prompt::render;
///
/// let result = render("Q: {input} {{raw}}", "data");
/// assert_eq!(result, "Q: data {raw}");
/// ```
pub fn render(template: &str, input: &str) -> String {
    // Pass 1: protect escaped braces
    let mut rendered = template.replace("{{", ESCAPE_SENTINEL);
    rendered = rendered.replace("}}", ESCAPE_SENTINEL_CLOSE);

    // Pass 2: substitute the placeholder
    rendered = rendered.replace("{input}", input);

    // Pass 3: restore escaped braces
    rendered = rendered.replace(ESCAPE_SENTINEL, "{");
    rendered = rendered.replace(ESCAPE_SENTINEL_CLOSE, "}");
    rendered
}

/// Build the full prompt for a user query: preamble, blank line, query.
pub fn build_prompt(query: &str) -> String {
    render(
        &REQUEST_TEMPLATE.replace("{preamble}", SECURITY_PROMPT),
        query,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic() {
        assert_eq!(render("process {input}", "data"), "process data");
    }

    #[test]
    fn test_render_escaped_braces() {
        assert_eq!(render("{{input}} {input}", "x"), "{input} x");
    }

    #[test]
    fn test_build_prompt_layout() {
        let prompt = build_prompt("Что такое фишинг?");
        assert!(prompt.starts_with(SECURITY_PROMPT));
        assert!(prompt.ends_with("\n\nПользовательский запрос: Что такое фишинг?"));
    }

    #[test]
    fn test_build_prompt_query_with_braces() {
        // User text is inserted after escape handling, so braces stay as typed
        let prompt = build_prompt("что значит {{x}}?");
        assert!(prompt.ends_with("что значит {{x}}?"));
    }

    #[test]
    fn test_preamble_names_every_label() {
        for field in crate::output_parser::Field::ALL {
            assert!(SECURITY_PROMPT.contains(&format!("{}:", field.title())));
        }
        assert!(SECURITY_PROMPT.contains(crate::classify::OUT_OF_SCOPE_MARKER));
    }
}
