use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Output, Stdio};

use anyhow::{anyhow, Result as AnyhowResult};

/// Runs the binary, optionally feeding `stdin`, and returns its output
/// whatever the exit status.
pub fn run_sample2info_raw(
    args: &[&str],
    stdin: Option<&str>,
) -> AnyhowResult<Output> {
    let exe = Path::new(env!("CARGO_BIN_EXE_sample2info"));
    assert!(exe.exists());

    let mut child = std::process::Command::new(exe)
        .args(args)
        .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(input) = stdin {
        let mut child_stdin =
            child.stdin.take().ok_or_else(|| anyhow!("no stdin handle"))?;
        child_stdin.write_all(input.as_bytes())?;
    }
    Ok(child.wait_with_output()?)
}

pub fn run_sample2info(args: &[&str]) -> AnyhowResult<String> {
    let output = run_sample2info_raw(args, None)?;
    if output.status.success() {
        Ok(String::from_utf8(output.stdout)?)
    } else {
        Err(anyhow!(
            "failed to run {:?}, {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        ))
    }
}

pub fn read_text_file(fp: &str) -> String {
    let mut fh = File::open(fp).unwrap();
    let mut buff = String::new();
    fh.read_to_string(&mut buff).unwrap();
    buff
}

pub fn check_against_expected_text_file(output: &str, expected_fp: &str) {
    // expected files were hand-checked for correctness.
    let expected = read_text_file(expected_fp);
    similar_asserts::assert_eq!(output, expected.as_str());
}
