//! Splitting long scripts into provider-sized requests

/// Split `text` into chunks of at most `max_chars` characters
///
/// A chunk ends at the last sentence break in the second half of its window
/// when there is one, otherwise at the last whitespace, otherwise it is cut
/// hard. Chunks are trimmed and never empty.
#[must_use]
pub fn split_for_synthesis(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut rest = text.trim();

    while !rest.is_empty() {
        let Some((window_end, _)) = rest.char_indices().nth(max_chars) else {
            chunks.push(rest);
            break;
        };
        let window = &rest[..window_end];
        let half = window
            .char_indices()
            .nth(max_chars / 2)
            .map_or(0, |(i, _)| i);

        let cut = window[half..]
            .rfind(|c| matches!(c, '.' | '!' | '?' | '\n'))
            .map(|i| half + i + 1)
            .or_else(|| window.rfind(char::is_whitespace).filter(|&i| i > 0))
            .unwrap_or(window_end);

        let (head, tail) = rest.split_at(cut);
        let head = head.trim_end();
        if !head.is_empty() {
            chunks.push(head);
        }
        rest = tail.trim_start();
    }

    chunks
}
