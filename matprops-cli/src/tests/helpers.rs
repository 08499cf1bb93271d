//! Test helpers for invoking the CLI against scratch databases.

use super::*;
use camino::Utf8PathBuf;
use tempfile::TempDir;

/// Path to the shared 100-record fixture.
pub(super) fn fixture_csv() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../matprops-data/tests/fixtures/materials.csv")
}

/// Parse `args` as a `matprops` invocation and run it, capturing stdout.
pub(super) fn invoke<I, S>(args: I) -> Result<String, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut invocation = vec!["matprops".to_owned()];
    invocation.extend(args.into_iter().map(Into::into));
    let cli = Cli::try_parse_from(invocation).map_err(CliError::ArgumentParsing)?;
    let mut out = Vec::new();
    run_command(cli.command, &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

/// A scratch directory holding a database filled from the fixture.
#[derive(Debug)]
pub(super) struct IngestedDatabase {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl IngestedDatabase {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("materials.db"))
            .expect("utf-8 workspace");
        let output = invoke([
            "ingest".to_owned(),
            format!("--{ARG_READ}"),
            fixture_csv().into_string(),
            format!("--{ARG_STORE}"),
            path.to_string(),
        ])
        .expect("ingest fixture");
        assert!(output.starts_with("stored 100 of 100 records"), "{output}");
        Self { _dir: dir, path }
    }

    pub(super) fn path(&self) -> &Utf8PathBuf {
        &self.path
    }
}
