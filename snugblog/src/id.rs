use nanoid::nanoid;

/// Numeric identifier allocated from a per-collection sequence. Ids grow with
/// creation order, which the conversation ordering relies on.
pub type EntityId = u64;

/// Alphabet for random tokens (no ambiguous glyphs).
const TOKEN_ALPHABET: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y',
    'Z', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'j', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];
/// Default token length.
const TOKEN_LENGTH: usize = 16;

/// Generates a random token, used for picture references and key namespaces.
pub fn generate_token() -> String {
    nanoid!(TOKEN_LENGTH, TOKEN_ALPHABET)
}

/// Builds a fresh picture reference keeping the uploaded file's extension.
pub fn picture_reference(extension: &str) -> String {
    format!("{}.{}", generate_token(), extension.to_ascii_lowercase())
}
