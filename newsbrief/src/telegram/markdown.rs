//! MarkdownV2 escaping and message chunking.

/// Telegram's outbound message size cap, in characters.
pub const MAX_MESSAGE_LEN: usize = 4000;

/// Characters Telegram's MarkdownV2 mode treats as formatting control.
const ESCAPE_CHARS: &str = "_*[]()~`>#+-=|{}.!";

/// Prefixes every MarkdownV2 control character with a backslash.
///
/// Apply this exactly once, to the fully assembled report text; escaping a
/// composed-from-escaped-fields string would double-escape the separators the
/// formatter itself inserts. Escaping is not idempotent.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if ESCAPE_CHARS.contains(ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Splits `text` into in-order slices of at most `limit` characters each,
/// using the minimum number of slices. A boundary may fall inside an escape
/// pair; the rendering mode tolerates that and it is not special-cased.
pub fn chunk(text: &str, limit: usize) -> Vec<String> {
    assert!(limit >= 1, "chunk limit must be at least 1");
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut len = 0;
    for ch in text.chars() {
        if len == limit {
            chunks.push(std::mem::take(&mut current));
            len = 0;
        }
        current.push(ch);
        len += 1;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
