use std::io::{self, IsTerminal, Read};

use apk_file::ApkFileError;
use clap::ArgMatches;

/// Resolves the raw query from `--stdin`, `--query` or the positional argument.
pub fn resolve(matches: &ArgMatches, stdin: bool) -> Result<String, ApkFileError> {
    if stdin {
        let handle = io::stdin();
        if handle.is_terminal() {
            return Err(ApkFileError::Input(
                "stdin is invalid, expected piped input".into(),
            ));
        }
        return query_from_reader(handle.lock());
    }

    matches
        .get_one::<String>("query")
        .or_else(|| matches.get_one::<String>("query-flag"))
        .cloned()
        .ok_or_else(|| ApkFileError::Input("must pass a file to search for".into()))
}

/// First line of `reader`, without its line terminator.
fn query_from_reader(mut reader: impl Read) -> Result<String, ApkFileError> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer).map_err(|err| match err.kind() {
        io::ErrorKind::InvalidData => ApkFileError::Input("stdin is not valid UTF-8".into()),
        _ => ApkFileError::Io(err),
    })?;
    let line = buffer.lines().next().unwrap_or_default();
    if line.is_empty() {
        return Err(ApkFileError::Input("stdin is empty".into()));
    }
    Ok(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_line_without_newline() {
        let query = query_from_reader("usr/lib/libz\nignored\n".as_bytes()).unwrap();
        assert_eq!(query, "usr/lib/libz");

        let query = query_from_reader("libssl.so\r\n".as_bytes()).unwrap();
        assert_eq!(query, "libssl.so");
    }

    #[test]
    fn empty_stdin_is_an_input_error() {
        let err = query_from_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, ApkFileError::Input(ref msg) if msg == "stdin is empty"));
        assert!(query_from_reader("\n".as_bytes()).is_err());
    }

    #[test]
    fn non_utf8_stdin_is_an_input_error() {
        let err = query_from_reader(&[0x6c, 0x69, 0x62, 0xff, 0xfe, b'\n'][..]).unwrap_err();
        assert!(matches!(err, ApkFileError::Input(ref msg) if msg.contains("UTF-8")));
    }
}
