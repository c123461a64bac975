use std::fmt;
use std::str::FromStr;

use url::Url;
use url::form_urlencoded;

use crate::error::ApkFileError;
use crate::pattern::SearchPatterns;

/// Contents search endpoint of the Alpine package index.
pub const DEFAULT_ENDPOINT: &str = "https://pkgs.alpinelinux.org/contents";

/// A closed set of values accepted for one query field.
pub trait Choice: Copy + Sized + 'static {
    /// Field name used in validation messages.
    const FIELD: &'static str;
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(|value| value.as_str()).collect()
    }

    fn parse_choice(value: &str) -> Result<Self, ApkFileError> {
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| ApkFileError::Validation {
                field: Self::FIELD,
                value: value.to_string(),
                allowed: Self::allowed(),
            })
    }

    /// Like [`Choice::parse_choice`], but an empty value selects `default`.
    fn parse_or(value: &str, default: Self) -> Result<Self, ApkFileError> {
        if value.is_empty() {
            Ok(default)
        } else {
            Self::parse_choice(value)
        }
    }
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal, default = $default:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )+
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl Choice for $name {
            const FIELD: &'static str = $field;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ApkFileError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::parse_choice(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum! {
    /// Alpine release line.
    Branch, "branch", default = V3_8 {
        Edge => "edge",
        V3_8 => "v3.8",
        V3_7 => "v3.7",
        V3_6 => "v3.6",
        V3_5 => "v3.5",
        V3_4 => "v3.4",
        V3_3 => "v3.3",
    }
}

choice_enum! {
    /// Package repository within a branch.
    Repository, "repo", default = Main {
        Main => "main",
        Community => "community",
        Testing => "testing",
    }
}

choice_enum! {
    /// Target architecture of the package build.
    Architecture, "arch", default = X86_64 {
        X86 => "x86",
        X86_64 => "x86_64",
        Armhf => "armhf",
        Aarch64 => "aarch64",
        Ppc64le => "ppc64le",
        S390x => "s390x",
    }
}

choice_enum! {
    /// Wildcard appended to the raw query before it is split.
    Wildcard, "wildcard", default = Star {
        Star => "*",
        Question => "?",
    }
}

/// Values used when a query field is left empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchDefaults {
    pub branch: Branch,
    pub repository: Repository,
    pub architecture: Architecture,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            branch: Branch::default(),
            repository: Repository::default(),
            architecture: Architecture::default(),
        }
    }
}

/// One validated contents lookup. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    file_pattern: String,
    dir_pattern: String,
    branch: Branch,
    repository: Repository,
    architecture: Architecture,
}

impl SearchQuery {
    pub fn new(
        patterns: SearchPatterns,
        branch: Branch,
        repository: Repository,
        architecture: Architecture,
    ) -> Self {
        Self {
            file_pattern: patterns.file,
            dir_pattern: patterns.dir,
            branch,
            repository,
            architecture,
        }
    }

    /// Validates the textual enum fields and assembles a query. Empty enum values
    /// fall back to `defaults`.
    pub fn build(
        file_pattern: &str,
        dir_pattern: &str,
        branch: &str,
        repository: &str,
        architecture: &str,
        defaults: &SearchDefaults,
    ) -> Result<Self, ApkFileError> {
        Ok(Self {
            file_pattern: file_pattern.to_string(),
            dir_pattern: dir_pattern.to_string(),
            branch: Branch::parse_or(branch, defaults.branch)?,
            repository: Repository::parse_or(repository, defaults.repository)?,
            architecture: Architecture::parse_or(architecture, defaults.architecture)?,
        })
    }

    pub fn file_pattern(&self) -> &str {
        &self.file_pattern
    }

    pub fn dir_pattern(&self) -> &str {
        &self.dir_pattern
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub fn repository(&self) -> Repository {
        self.repository
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    /// Form-encoded parameters in the fixed order `file, path, branch, repo, arch`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("file", &self.file_pattern)
            .append_pair("path", &self.dir_pattern)
            .append_pair("branch", self.branch.as_str())
            .append_pair("repo", self.repository.as_str())
            .append_pair("arch", self.architecture.as_str())
            .finish()
    }

    /// Joins the endpoint with this query, replacing any query the endpoint carried.
    pub fn url(&self, endpoint: &str) -> Result<Url, ApkFileError> {
        let mut url = Url::parse(endpoint).map_err(|err| ApkFileError::Validation {
            field: "endpoint",
            value: format!("{endpoint} ({err})"),
            allowed: vec!["absolute http(s) URL"],
        })?;
        url.set_query(Some(&self.to_query_string()));
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn libssl() -> SearchQuery {
        SearchQuery::build(
            "*libssl.so*",
            "",
            "v3.8",
            "main",
            "x86_64",
            &SearchDefaults::default(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_unknown_branch_with_allowed_values() {
        let err = SearchQuery::build(
            "*foo*",
            "",
            "v9.9",
            "main",
            "x86_64",
            &SearchDefaults::default(),
        )
        .unwrap_err();

        match &err {
            ApkFileError::Validation {
                field,
                value,
                allowed,
            } => {
                assert_eq!(*field, "branch");
                assert_eq!(value, "v9.9");
                assert_eq!(
                    allowed,
                    &vec!["edge", "v3.8", "v3.7", "v3.6", "v3.5", "v3.4", "v3.3"]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("v9.9"));
        assert!(message.contains("edge, v3.8, v3.7"));
    }

    #[test]
    fn rejects_unknown_repo_and_arch() {
        let defaults = SearchDefaults::default();
        let repo = SearchQuery::build("f", "", "edge", "extras", "x86", &defaults).unwrap_err();
        assert!(matches!(repo, ApkFileError::Validation { field: "repo", .. }));

        let arch = SearchQuery::build("f", "", "edge", "main", "riscv64", &defaults).unwrap_err();
        assert!(matches!(arch, ApkFileError::Validation { field: "arch", .. }));
    }

    #[test]
    fn empty_enum_values_use_defaults() {
        let query = SearchQuery::build("f", "", "", "", "", &SearchDefaults::default()).unwrap();
        assert_eq!(query.branch(), Branch::V3_8);
        assert_eq!(query.repository(), Repository::Main);
        assert_eq!(query.architecture(), Architecture::X86_64);
    }

    #[test]
    fn query_string_has_fixed_key_order() {
        let query = libssl();
        assert_eq!(
            query.to_query_string(),
            "file=*libssl.so*&path=&branch=v3.8&repo=main&arch=x86_64"
        );
        assert_eq!(query.to_query_string(), libssl().to_query_string());
    }

    #[test]
    fn query_string_percent_encodes_values() {
        let query = SearchQuery::build(
            "a b?*",
            "*usr/lib",
            "edge",
            "community",
            "aarch64",
            &SearchDefaults::default(),
        )
        .unwrap();
        assert_eq!(
            query.to_query_string(),
            "file=a+b%3F*&path=*usr%2Flib&branch=edge&repo=community&arch=aarch64"
        );
    }

    #[test]
    fn url_appends_query_to_endpoint() {
        let url = libssl().url(DEFAULT_ENDPOINT).unwrap();
        assert_eq!(
            url.as_str(),
            "https://pkgs.alpinelinux.org/contents?file=*libssl.so*&path=&branch=v3.8&repo=main&arch=x86_64"
        );
        assert!(libssl().url("not a url").is_err());
    }

    #[test]
    fn wildcard_parses_both_symbols() {
        assert_eq!("*".parse::<Wildcard>().unwrap(), Wildcard::Star);
        assert_eq!("?".parse::<Wildcard>().unwrap(), Wildcard::Question);
        assert!("%".parse::<Wildcard>().is_err());
    }
}
