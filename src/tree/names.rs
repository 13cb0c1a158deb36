//! Display-name handling: normalization, extensions, file kinds.

use crate::error::TreeError;
use crate::types::FileKind;
use unicode_normalization::UnicodeNormalization;

/// Trim and NFC-normalize a user-supplied name.
///
/// Rejects names that are empty after trimming or contain a path separator.
pub fn normalize_name(raw: &str) -> Result<String, TreeError> {
    let name: String = raw.trim().nfc().collect();
    if name.is_empty() {
        return Err(TreeError::InvalidName("name cannot be empty".to_string()));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(TreeError::InvalidName(format!(
            "'{}' must not contain a path separator",
            name
        )));
    }
    Ok(name)
}

/// Extension of a name: the text after the last '.', if non-empty.
pub fn extension(name: &str) -> Option<&str> {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

pub fn kind_for_name(name: &str) -> FileKind {
    extension(name)
        .map(FileKind::from_extension)
        .unwrap_or(FileKind::Unknown)
}

/// Append `.<default_ext>` when `name` has no extension.
pub fn with_default_extension(name: String, default_ext: &str) -> String {
    if extension(&name).is_some() || default_ext.is_empty() {
        name
    } else {
        format!("{}.{}", name.trim_end_matches('.'), default_ext)
    }
}

/// Name to use when renaming a file.
///
/// If the old name had an extension and the new one has none, the old
/// extension is carried over.
pub fn rename_preserving_extension(old_name: &str, new_name: String) -> String {
    match (extension(old_name), extension(&new_name)) {
        (Some(old_ext), None) => format!("{}.{}", new_name.trim_end_matches('.'), old_ext),
        _ => new_name,
    }
}
