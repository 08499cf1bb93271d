//! Entry point for the `matprops` command.
#![forbid(unsafe_code)]

use matprops_cli::CliError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = matprops_cli::run() {
        if let CliError::ArgumentParsing(parse_error) = &err {
            // Help, version, and usage errors carry their own exit codes.
            parse_error.exit();
        }
        eprintln!("matprops: {err}");
        std::process::exit(1);
    }
}
