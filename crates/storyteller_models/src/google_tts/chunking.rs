//! Splitting narrative text into request-sized pieces.

/// Longest text the translate endpoint accepts in one request.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Words are packed greedily and breaks fall on whitespace, so punctuation
/// stays attached to its word. A single word longer than `max_chars` is cut
/// on character boundaries. Blank input yields no chunks.
///
/// # Examples
///
/// ```
/// use storyteller_models::split_text;
///
/// let chunks = split_text("The fog rolled in. Nobody moved.", 20);
/// assert_eq!(chunks, vec!["The fog rolled in.", "Nobody moved."]);
/// ```
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
