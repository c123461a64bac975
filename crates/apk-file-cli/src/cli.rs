use std::ffi::OsString;
use std::io::IsTerminal;
use std::process::ExitCode;

use apk_file::{ExportFormat, build_query, export, search};
use clap::{Arg, ArgAction, Command, value_parser};
use tracing_subscriber::EnvFilter;

use crate::context::SearchSession;
use crate::error::{CliError, ExitStatus};
use crate::{input, output};

const NAME: &str = "apk-file";

pub fn run() -> ExitCode {
    match run_cli(std::env::args_os()) {
        Ok(code) => code,
        Err(err) => {
            err.print();
            err.exit_code()
        }
    }
}

/// Parses arguments, validates every enum flag, then performs the single lookup and
/// writes the export. Flag validation and input errors surface before any network
/// access.
pub fn run_cli<I, S>(args: I) -> Result<ExitCode, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let matches = build_cli().try_get_matches_from(args)?;
    init_tracing(matches.get_flag("debug"));

    let session = SearchSession::from_matches(&matches)?;
    let raw = input::resolve(&matches, session.stdin)?;
    log_parameters(&session, &raw);

    let query = build_query(
        &raw,
        session.wildcard,
        session.branch,
        session.repository,
        session.architecture,
    );
    let fetcher = session.config.fetcher();
    let extraction = search(&fetcher, &session.config.endpoint, &query)?;

    let exported = export(
        &extraction.records,
        session.output.format,
        &session.output.basename,
    )?;
    output::emit(&exported, &session.output, extraction.records.len())?;
    Ok(ExitCode::from(ExitStatus::Ok.code()))
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}

fn log_parameters(session: &SearchSession, raw: &str) {
    tracing::info!(
        input = raw,
        wildcard = ?session.wildcard,
        branch = %session.branch,
        repo = %session.repository,
        arch = %session.architecture,
        stdin = session.stdin,
        format = %session.output.format,
        "search parameters"
    );
}

/// Root `clap::Command`. Enum-valued flags are accepted as plain strings and
/// validated by the library so rejection messages list the allowed values.
fn build_cli() -> Command {
    Command::new(NAME)
        .about("Search apk package contents via the command line")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("query")
                .value_name("QUERY")
                .help("File or path to search for, e.g. libssl.so or usr/lib/libz"),
        )
        .arg(
            Arg::new("query-flag")
                .long("query")
                .value_name("QUERY")
                .conflicts_with("query")
                .help("Query to look up; alternative to the positional argument"),
        )
        .arg(
            Arg::new("wildcard")
                .long("wildcard")
                .value_name("CHAR")
                .help("Query wildcard appended to the query (*, ?)"),
        )
        .arg(
            Arg::new("branch")
                .long("branch")
                .default_value("v3.8")
                .help("Alpine branch (edge, v3.8, v3.7, v3.6, v3.5, v3.4, v3.3)"),
        )
        .arg(
            Arg::new("repo")
                .long("repo")
                .default_value("main")
                .help("Repository to search in (main, community, testing)"),
        )
        .arg(
            Arg::new("arch")
                .long("arch")
                .default_value("x86_64")
                .help("Arch to search for (x86, x86_64, armhf, aarch64, ppc64le, s390x)"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .value_name("FORMAT")
                .default_value("yaml")
                .help(format!(
                    "Output results with ({}) format",
                    ExportFormat::names().join(", ")
                )),
        )
        .arg(
            Arg::new("output-type")
                .long("output-type")
                .default_value("stdout")
                .help("Output results to stdout or file"),
        )
        .arg(
            Arg::new("output-prefix")
                .long("output-prefix")
                .value_name("DIR")
                .default_value("output")
                .help("Directory for file output"),
        )
        .arg(
            Arg::new("output-basename")
                .long("output-basename")
                .value_name("NAME")
                .default_value("results")
                .help("File name stem for file output; also names the SQL table and worksheet"),
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .value_name("URL")
                .help("Contents search endpoint (default: https://pkgs.alpinelinux.org/contents)"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .value_parser(value_parser!(u64))
                .help("Abort the lookup after this many seconds"),
        )
        .arg(
            Arg::new("stdin")
                .long("stdin")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["query", "query-flag"])
                .help("Read the query from piped stdin"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
}
