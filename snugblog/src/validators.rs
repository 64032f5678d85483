use std::sync::LazyLock;

use email_address::EmailAddress;
use regex::Regex;

/// Usernames end up in profile paths, so whitespace and slashes are rejected.
static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s/]+$").expect("username pattern compiles"));

/// Extensions accepted for profile pictures.
pub const ALLOWED_PICTURE_EXTENSIONS: &[&str] = &["jpg", "png"];

/// Returns `true` if the provided string is a syntactically valid email address.
pub fn is_valid_email(value: &str) -> bool {
    EmailAddress::is_valid(value)
}

pub fn is_valid_username(value: &str) -> bool {
    USERNAME_PATTERN.is_match(value)
}

/// Returns `true` for redirect targets that stay on this site (`/home`, not `//evil`).
pub fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.contains('\\')
}

/// Lowercased extension of an uploaded picture if it is an allowed one.
pub fn picture_extension(filename: &str) -> Option<String> {
    let (_, extension) = filename.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();
    ALLOWED_PICTURE_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}
