/// Split text into overlapping windows of `chunk_size` words.
///
/// Windows start every `chunk_size - overlap` words, so consecutive windows
/// share `overlap` words; the last windows may be shorter. Words are re-joined
/// with single spaces.
pub fn chunk_words(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let chunk_size = chunk_size.max(1);
    let stride = chunk_size.saturating_sub(overlap).max(1);

    (0..words.len())
        .step_by(stride)
        .map(|start| {
            let end = (start + chunk_size).min(words.len());
            words[start..end].join(" ")
        })
        .filter(|chunk| !chunk.trim().is_empty())
        .collect()
}
