use std::process::ExitCode;

fn main() -> ExitCode {
    apk_file_cli::run()
}
