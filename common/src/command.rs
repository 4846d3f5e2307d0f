use std::{
    process::Stdio,
    time::{Duration, Instant},
};

use anyhow::Result;
use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::process::Command;

use crate::error::CommandError;

lazy_static::lazy_static! {
    static ref DOTS_STYLE: ProgressStyle = ProgressStyle::with_template("{spinner} {msg} {elapsed_precise}").unwrap().tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    pub static ref GREEN_TICK: StyledObject<&'static str> = style("✔").green();
    pub static ref RED_CROSS: StyledObject<&'static str> = style("✗").red();
}

pub fn progress(msg: &str) -> ProgressBar {
    let w = ProgressBar::new_spinner();
    w.set_style(DOTS_STYLE.clone());
    w.enable_steady_tick(Duration::from_millis(80));
    w.set_message(msg.to_owned());
    w
}

/// Renders `cmd` and `args` the way they would be typed into a POSIX shell.
pub fn command_line(cmd: &str, args: &[String]) -> String {
    std::iter::once(cmd)
        .chain(args.iter().map(String::as_str))
        .map(quote)
        .collect::<Vec<String>>()
        .join(" ")
}

fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@,+%".contains(c));
    if plain {
        arg.to_owned()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Runs `cmd` to completion and returns its standard output.
///
/// `msgs` holds the in-progress, failure and success messages. Arguments are
/// handed to the process as-is, no shell is involved. A non-zero exit turns
/// into [`CommandError::Failed`] with the captured standard error.
pub async fn command(cmd: &str, args: &[String], verbose: bool, msgs: [&str; 3]) -> Result<String> {
    let line = command_line(cmd, args);
    tracing::info!("{line}");

    let mut pb = None;
    if !verbose {
        pb = Some(progress(msgs[0]));
    }

    let start_time = Instant::now();
    let output = Command::new(cmd)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;
    let dur = start_time.elapsed();

    let output = match output {
        Ok(o) => o,
        Err(source) => {
            clear_progress(pb);
            tracing::error!("{} {}", RED_CROSS.to_string(), msgs[1]);
            return Err(CommandError::Spawn {
                command: line,
                source,
            }
            .into());
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if verbose {
        tracing::debug!("stdout: {stdout}");
        tracing::debug!("stderr: {stderr}");
    }

    if !output.status.success() {
        clear_progress(pb);
        tracing::error!("{} {}", RED_CROSS.to_string(), msgs[1]);
        return Err(CommandError::Failed {
            command: line,
            code: output.status.code(),
            stderr,
        }
        .into());
    }

    finish_progress(msgs[2], cmd, dur, pb);
    Ok(stdout)
}

fn clear_progress(pb: Option<ProgressBar>) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}

fn elapsed_time_str(dur: &Duration) -> String {
    let seconds = dur.as_secs() % 60;
    let minutes = (dur.as_secs() / 60) % 60;
    let hours = (dur.as_secs() / 60) / 60;
    format!("{:0>2}:{:0>2}:{:0>2}", hours, minutes, seconds)
}

pub fn finish_progress(
    status_message: &str,
    context: &str,
    dur: Duration,
    pb: Option<ProgressBar>,
) {
    clear_progress(pb);

    println!(
        "{} {} ({}) took, {}",
        GREEN_TICK.to_string(),
        status_message,
        context,
        elapsed_time_str(&dur)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(a: &[&str]) -> Vec<String> {
        a.iter().map(|s| s.to_string()).collect()
    }

    const MSGS: [&str; 3] = ["Running", "Could not run", "Ran"];

    #[test]
    fn command_line_quotes_when_needed() {
        let line = command_line(
            "az",
            &args(&[
                "vmss",
                "update-instances",
                "--instance-ids",
                "*",
                "--set",
                r#"virtualMachineProfile.networkProfile={"a": 1}"#,
                "it's",
                "",
            ]),
        );
        assert_eq!(
            line,
            r#"az vmss update-instances --instance-ids '*' --set 'virtualMachineProfile.networkProfile={"a": 1}' 'it'\''s' ''"#
        );
    }

    #[test]
    fn elapsed_time_is_padded() {
        assert_eq!(elapsed_time_str(&Duration::from_secs(3725)), "01:02:05");
    }

    #[tokio::test]
    async fn returns_stdout() {
        let out = command("sh", &args(&["-c", "echo '[\"vmss1\"]'"]), true, MSGS)
            .await
            .unwrap();
        assert_eq!(out.trim(), r#"["vmss1"]"#);
    }

    #[tokio::test]
    async fn failure_carries_stderr() {
        let err = command("sh", &args(&["-c", "echo boom >&2; exit 3"]), true, MSGS)
            .await
            .unwrap_err();
        match err.downcast_ref::<CommandError>() {
            Some(CommandError::Failed { code, stderr, .. }) => {
                assert_eq!(*code, Some(3));
                assert_eq!(stderr.trim(), "boom");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let err = command("definitely-not-a-real-binary-1f3a", &[], true, MSGS)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CommandError>(),
            Some(CommandError::Spawn { .. })
        ));
    }
}
