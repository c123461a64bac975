//! Derives the contents-search `file` and `path` globs from a single path-like query.

const SEPARATOR: char = '/';
const CURRENT_DIR: &str = ".";

/// Glob pair sent to the contents index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchPatterns {
    pub file: String,
    pub dir: String,
}

/// Splits `input` into a filename glob and a directory glob.
///
/// Without a directory component the file glob is wrapped in wildcards on both
/// sides. With one, the directory glob carries the leading wildcard and the file
/// glob only trails. Any string is accepted.
pub fn split(input: &str) -> SearchPatterns {
    let base = basename(input);
    let dir = dirname(input);

    if dir.is_empty() || dir == CURRENT_DIR {
        SearchPatterns {
            file: format!("*{base}*"),
            dir: String::new(),
        }
    } else {
        SearchPatterns {
            file: format!("{base}*"),
            dir: format!("*{dir}"),
        }
    }
}

/// POSIX `basename`: trailing separators collapse, `.` and `..` stay literal.
pub fn basename(input: &str) -> &str {
    if input.is_empty() {
        return input;
    }
    let trimmed = input.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind(SEPARATOR) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// POSIX `dirname`: returns `.` when there is no separator.
pub fn dirname(input: &str) -> &str {
    let trimmed = input.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() {
        return if input.is_empty() { CURRENT_DIR } else { "/" };
    }
    match trimmed.rfind(SEPARATOR) {
        Some(idx) => {
            let parent = trimmed[..idx].trim_end_matches(SEPARATOR);
            if parent.is_empty() { "/" } else { parent }
        }
        None => CURRENT_DIR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_gets_wildcards_on_both_sides() {
        for input in ["libssl.so", "busybox", "a", ".", ".."] {
            let patterns = split(input);
            assert_eq!(patterns.dir, "", "input {input}");
            assert_eq!(patterns.file, format!("*{input}*"), "input {input}");
        }
    }

    #[test]
    fn directory_component_moves_leading_wildcard() {
        let patterns = split("lib/foo");
        assert_eq!(patterns.file, "foo*");
        assert_eq!(patterns.dir, "*lib");

        let patterns = split("usr/lib/libcrypto.so");
        assert_eq!(patterns.file, "libcrypto.so*");
        assert_eq!(patterns.dir, "*usr/lib");
    }

    #[test]
    fn empty_input_degenerates_to_double_wildcard() {
        let patterns = split("");
        assert_eq!(patterns.file, "**");
        assert_eq!(patterns.dir, "");
    }

    #[test]
    fn current_dir_prefix_is_treated_as_no_directory() {
        let patterns = split("./busybox");
        assert_eq!(patterns.file, "*busybox*");
        assert_eq!(patterns.dir, "");
    }

    #[test]
    fn posix_edge_cases() {
        assert_eq!(basename("usr/lib/"), "lib");
        assert_eq!(dirname("usr/lib/"), "usr");
        assert_eq!(basename("/"), "/");
        assert_eq!(dirname("/"), "/");
        assert_eq!(dirname("/bin"), "/");
        assert_eq!(dirname("a//b"), "a");
        assert_eq!(dirname("../x"), "..");

        let patterns = split("/bin/sh");
        assert_eq!(patterns.file, "sh*");
        assert_eq!(patterns.dir, "*/bin");
    }
}
