//! Runs the `unitprop` binary on the instances in `tests/cnf`.
#![allow(dead_code, reason = "not every test file uses every helper")]

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::time::Duration;

use wait_timeout::ChildExt;

#[derive(Debug)]
pub(crate) struct Files {
    pub(crate) instance_file: PathBuf,
    pub(crate) log_file: PathBuf,
    pub(crate) err_file: PathBuf,
}

impl Files {
    pub(crate) fn read_log(&self) -> String {
        std::fs::read_to_string(&self.log_file).expect("Failed to read unitprop output")
    }

    pub(crate) fn cleanup(self) -> std::io::Result<()> {
        std::fs::remove_file(self.log_file)?;
        std::fs::remove_file(self.err_file)?;

        Ok(())
    }
}

pub(crate) fn instance_path(file_name: &str) -> PathBuf {
    PathBuf::from(format!("{}/tests/cnf/{file_name}", env!("CARGO_MANIFEST_DIR")))
}

/// Runs `unitprop` on the instance, writing its output next to the instance in files named
/// after `run_name` so that tests sharing an instance do not interfere.
pub(crate) fn run_unitprop<'a>(
    instance_path: impl AsRef<Path>,
    run_name: &str,
    args: impl IntoIterator<Item = &'a str>,
) -> (Files, ExitStatus) {
    const TEST_TIMEOUT: Duration = Duration::from_secs(60);

    let instance_path = instance_path.as_ref();

    let unitprop = PathBuf::from(env!("CARGO_BIN_EXE_unitprop"));

    let log_file_path = instance_path.with_extension(format!("{run_name}.log"));
    let err_file_path = instance_path.with_extension(format!("{run_name}.err"));

    let mut command = Command::new(unitprop);

    for arg in args {
        let _ = command.arg(arg);
    }

    let mut child = command
        .arg(instance_path)
        .stdout(File::create(&log_file_path).expect("Failed to create log file."))
        .stderr(File::create(&err_file_path).expect("Failed to create error file."))
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run unitprop.");

    let status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => panic!("unitprop took more than {} seconds", TEST_TIMEOUT.as_secs()),
        Ok(Some(status)) => status,
        Err(e) => panic!("error starting unitprop: {e}"),
    };

    let files = Files {
        instance_file: instance_path.to_path_buf(),
        log_file: log_file_path,
        err_file: err_file_path,
    };

    (files, status)
}
