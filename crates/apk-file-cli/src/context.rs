use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use apk_file::{
    ApkFileError, Architecture, Branch, Choice, ExportFormat, Repository, SearchConfig, Wildcard,
};
use clap::ArgMatches;

/// Where the rendered export goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File,
}

impl Choice for OutputTarget {
    const FIELD: &'static str = "output type";
    const ALL: &'static [Self] = &[OutputTarget::Stdout, OutputTarget::File];

    fn as_str(self) -> &'static str {
        match self {
            OutputTarget::Stdout => "stdout",
            OutputTarget::File => "file",
        }
    }
}

impl FromStr for OutputTarget {
    type Err = ApkFileError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse_choice(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputSettings {
    pub format: ExportFormat,
    pub target: OutputTarget,
    pub prefix: PathBuf,
    pub basename: String,
}

impl OutputSettings {
    /// `<prefix>/<basename>.<ext>` for file output.
    pub fn file_path(&self) -> PathBuf {
        self.prefix
            .join(format!("{}.{}", self.basename, self.format.extension()))
    }
}

/// Flag values resolved and validated once, before any input is read.
#[derive(Clone, Debug)]
pub struct SearchSession {
    pub config: SearchConfig,
    pub wildcard: Option<Wildcard>,
    pub branch: Branch,
    pub repository: Repository,
    pub architecture: Architecture,
    pub output: OutputSettings,
    pub stdin: bool,
}

impl SearchSession {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, ApkFileError> {
        let mut config = SearchConfig::default();
        if let Some(endpoint) = matches.get_one::<String>("endpoint") {
            config.endpoint = endpoint.clone();
        }
        config.timeout = matches
            .get_one::<u64>("timeout")
            .map(|secs| Duration::from_secs(*secs));

        let wildcard = match string_flag(matches, "wildcard") {
            "" => None,
            value => Some(Wildcard::parse_choice(value)?),
        };
        let branch = Branch::parse_or(string_flag(matches, "branch"), config.defaults.branch)?;
        let repository =
            Repository::parse_or(string_flag(matches, "repo"), config.defaults.repository)?;
        let architecture =
            Architecture::parse_or(string_flag(matches, "arch"), config.defaults.architecture)?;

        let output = OutputSettings {
            format: string_flag(matches, "output").parse()?,
            target: OutputTarget::parse_or(
                string_flag(matches, "output-type"),
                OutputTarget::default(),
            )?,
            prefix: PathBuf::from(string_flag(matches, "output-prefix")),
            basename: string_flag(matches, "output-basename").to_string(),
        };

        Ok(Self {
            config,
            wildcard,
            branch,
            repository,
            architecture,
            output,
            stdin: matches.get_flag("stdin"),
        })
    }
}

fn string_flag<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_target_accepts_known_values() {
        assert_eq!("file".parse::<OutputTarget>().unwrap(), OutputTarget::File);
        let err = "printer".parse::<OutputTarget>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "printer is not a valid output type, allowed: stdout, file"
        );
    }

    #[test]
    fn file_path_uses_format_extension() {
        let settings = OutputSettings {
            format: ExportFormat::Postgres,
            target: OutputTarget::File,
            prefix: PathBuf::from("output"),
            basename: "results".into(),
        };
        assert_eq!(settings.file_path(), PathBuf::from("output/results.sql"));
    }
}
