//! File name helpers
//!
//! Splits display names into base name and extension, and derives the
//! registry key used to track a file within an upload session.

/// Prefix shared by every upload id
pub const ID_PREFIX: &str = "file_";

/// Longest suffix (dot included) still treated as an extension
pub const MAX_EXTENSION_LENGTH: usize = 5;

/// A file name split into its base and extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitName {
    /// Name without the extension
    pub name: String,
    /// Extension including the leading dot, or empty
    pub extension: String,
}

/// Split a file name into base name and extension
///
/// The extension is the suffix starting at the last `.`, but only when
/// that dot is not the first character and the suffix is at most
/// [`MAX_EXTENSION_LENGTH`] characters long. Dotfiles such as `.gitignore`
/// and long suffixes such as `archive.backup` keep their full name.
pub fn strip_name_from_extension(name: &str) -> SplitName {
    if let Some(dot) = name.rfind('.')
        && dot > 0
        && name[dot..].chars().count() <= MAX_EXTENSION_LENGTH
    {
        return SplitName {
            name: name[..dot].to_string(),
            extension: name[dot..].to_string(),
        };
    }

    SplitName {
        name: name.to_string(),
        extension: String::new(),
    }
}

/// Derive the candidate upload id for a file name
///
/// Keeps ASCII letters, digits and underscores; everything else
/// (including the extension dot) is dropped.
pub fn item_id(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    format!("{ID_PREFIX}{sanitized}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(name: &str, extension: &str) -> SplitName {
        SplitName {
            name: name.to_string(),
            extension: extension.to_string(),
        }
    }

    #[test]
    fn test_strip_simple_extension() {
        assert_eq!(strip_name_from_extension("test.jpg"), split("test", ".jpg"));
    }

    #[test]
    fn test_strip_returns_last_extension() {
        assert_eq!(
            strip_name_from_extension("test.jpg.img"),
            split("test.jpg", ".img")
        );
    }

    #[test]
    fn test_strip_without_extension() {
        assert_eq!(strip_name_from_extension("test"), split("test", ""));
        assert_eq!(strip_name_from_extension(""), split("", ""));
    }

    #[test]
    fn test_strip_leading_dot_is_not_extension() {
        assert_eq!(strip_name_from_extension(".env"), split(".env", ""));
        assert_eq!(
            strip_name_from_extension(".gitignore"),
            split(".gitignore", "")
        );
    }

    #[test]
    fn test_strip_long_suffix_is_not_extension() {
        // ".jpeg" is exactly five characters, ".backup" is seven
        assert_eq!(strip_name_from_extension("photo.jpeg"), split("photo", ".jpeg"));
        assert_eq!(
            strip_name_from_extension("archive.backup"),
            split("archive.backup", "")
        );
    }

    #[test]
    fn test_strip_counts_characters_not_bytes() {
        assert_eq!(strip_name_from_extension("café.été"), split("café", ".été"));
    }

    #[test]
    fn test_item_id_prefix() {
        assert!(item_id("test.jpg").starts_with("file_"));
    }

    #[test]
    fn test_item_id_allows_underscore_and_digits() {
        assert_eq!(item_id("test_.jpg"), "file_test_jpg");
        assert_eq!(item_id("1.jpg"), "file_1jpg");
    }

    #[test]
    fn test_item_id_ignores_special_characters() {
        assert_eq!(item_id("!!1@#$@#!$.jpg"), "file_1jpg");
        assert_eq!(item_id("résumé final.pdf"), "file_rsumfinalpdf");
    }

    #[test]
    fn test_item_id_only_valid_characters() {
        for name in ["a b.c", "ü/ö\\ä", "🚀 launch.png", "", "..."] {
            let id = item_id(name);
            let rest = id.strip_prefix(ID_PREFIX).expect("prefix");
            assert!(
                rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "unexpected character in {id}"
            );
        }
    }
}
