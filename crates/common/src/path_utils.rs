//! Remote path helpers for source paths and destination keys.
//!
//! FTP paths and S3 keys both use `/` regardless of the host platform, so
//! these helpers work on plain strings rather than `std::path`.

use crate::constants::REMOTE_PATH_SEPARATOR;

/// Return the final component of a remote path.
///
/// # Arguments
/// * `path` - POSIX-style remote path
///
/// # Returns
/// The substring after the last `/`, or the whole input if it has none.
pub fn base_name(path: &str) -> &str {
    match path.rfind(REMOTE_PATH_SEPARATOR) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Join a remote directory and an entry name into a full source path.
///
/// Trailing separators on `directory` are collapsed so that `"/pub/"` and
/// `"/pub"` produce the same result.
///
/// # Arguments
/// * `directory` - Remote directory
/// * `entry` - Entry name as returned by the directory listing
///
/// # Returns
/// `"{directory}/{entry}"`.
pub fn join_remote_path(directory: &str, entry: &str) -> String {
    format!(
        "{}{}{}",
        directory.trim_end_matches(REMOTE_PATH_SEPARATOR),
        REMOTE_PATH_SEPARATOR,
        entry
    )
}

/// Turn a remote directory into a key prefix ending in exactly one separator.
///
/// # Arguments
/// * `directory` - Remote directory
///
/// # Returns
/// `"{directory}/"`, so `"/pub/data"` and `"/pub/data/"` both give `"/pub/data/"`.
pub fn directory_prefix(directory: &str) -> String {
    format!(
        "{}{}",
        directory.trim_end_matches(REMOTE_PATH_SEPARATOR),
        REMOTE_PATH_SEPARATOR
    )
}

/// Compute the destination object key for a source file.
///
/// The prefix is used verbatim; no separator is inserted, so `"backup-"`
/// yields `"backup-a.txt"`.
///
/// # Arguments
/// * `output_prefix` - Key prefix; may be empty
/// * `source_path` - Full remote path of the source file
///
/// # Returns
/// `output_prefix` followed by the base name of `source_path`.
pub fn destination_key(output_prefix: &str, source_path: &str) -> String {
    format!("{}{}", output_prefix, base_name(source_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name_nested() {
        assert_eq!(base_name("/pub/data/a.txt"), "a.txt");
    }

    #[test]
    fn test_base_name_without_separator() {
        assert_eq!(base_name("a.txt"), "a.txt");
    }

    #[test]
    fn test_base_name_trailing_separator() {
        assert_eq!(base_name("/pub/data/"), "");
    }

    #[test]
    fn test_join_remote_path() {
        assert_eq!(join_remote_path("/pub/data", "a.txt"), "/pub/data/a.txt");
        assert_eq!(join_remote_path("/pub/data/", "a.txt"), "/pub/data/a.txt");
    }

    #[test]
    fn test_join_remote_path_root() {
        assert_eq!(join_remote_path("/", "a.txt"), "/a.txt");
    }

    #[test]
    fn test_destination_key_with_prefix() {
        assert_eq!(destination_key("backup/", "/pub/data/a.txt"), "backup/a.txt");
        assert_eq!(destination_key("backup", "/pub/data/a.txt"), "backupa.txt");
    }

    #[test]
    fn test_destination_key_keeps_prefix_verbatim() {
        assert_eq!(destination_key("backup-", "/pub/data/a.txt"), "backup-a.txt");
        assert_eq!(destination_key("2024_", "/pub/data/a.txt"), "2024_a.txt");
    }

    #[test]
    fn test_destination_key_mirrors_source_directory() {
        let prefix: String = directory_prefix("/pub/data");
        assert_eq!(destination_key(&prefix, "/pub/data/a.txt"), "/pub/data/a.txt");
    }

    #[test]
    fn test_directory_prefix() {
        assert_eq!(directory_prefix("/pub/data"), "/pub/data/");
        assert_eq!(directory_prefix("/pub/data/"), "/pub/data/");
        assert_eq!(directory_prefix("/"), "/");
    }

    #[test]
    fn test_destination_key_empty_prefix() {
        assert_eq!(destination_key("", "/pub/data/a.txt"), "a.txt");
    }
}
