use std::ffi::OsStr;
use std::process::{Command, Output};

/// Run the `loadtally` binary with the given arguments and no stdin.
///
/// # Errors
///
/// Returns an error if the binary cannot be located or spawned.
pub fn run_loadtally<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = loadtally_bin()?;
    Command::new(bin)
        .args(args)
        .env("LOADTALLY_LOG", "error")
        .env_remove("RUST_LOG")
        .stdin(std::process::Stdio::null())
        .output()
        .map_err(|err| format!("run loadtally failed: {}", err))
}

/// Fail with both output streams attached when the process did not succeed.
///
/// # Errors
///
/// Returns an error describing the failed run.
pub fn ensure_success(output: &Output) -> Result<(), String> {
    if output.status.success() {
        Ok(())
    } else {
        Err(format!(
            "status: {}\nstdout: {}\nstderr: {}",
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ))
    }
}

fn loadtally_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_loadtally").map_or_else(
        || Err("CARGO_BIN_EXE_loadtally missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
