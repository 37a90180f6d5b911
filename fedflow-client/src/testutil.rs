//! Test doubles for the flow client
//!
//! Fake flow-client "scripts" are plain /bin/sh files written into a temp
//! dir; the client is pointed at them via its interpreter setting. The
//! recording variants save their argv (and the config file they were
//! handed) next to the script so tests can assert on the wire protocol.

use std::fs;
use std::time::Duration;

use tempfile::TempDir;

use crate::{FlowClient, FlowConfig};

/// A client whose "flow client" is the given shell script body.
pub(crate) fn fake_tool(script_body: &str) -> (TempDir, FlowClient) {
    let dir = tempfile::tempdir().expect("create script dir");
    let script = dir.path().join("flow_client.sh");
    fs::write(&script, format!("#!/bin/sh\n{script_body}\n")).expect("write script");

    let config = FlowConfig::new(&script, dir.path())
        .with_interpreter("/bin/sh")
        .with_poll_interval(Duration::from_millis(1));

    (dir, FlowClient::new(config))
}

/// A client whose tool prints the given JSON (or any text) and exits 0.
pub(crate) fn json_tool(response: &str) -> (TempDir, FlowClient) {
    fake_tool(&format!("printf '%s' '{response}'"))
}

/// A client whose tool records its argv to `args.txt` (one argument per
/// line) and any `-c` config file to `seen_conf.json`, then prints the
/// given response.
pub(crate) fn recording_tool(response: &str) -> (TempDir, FlowClient) {
    let body = format!(
        r#"here="$(dirname "$0")"
printf '%s\n' "$@" > "$here/args.txt"
prev=""
for a in "$@"; do
  if [ "$prev" = "-c" ]; then cp "$a" "$here/seen_conf.json"; fi
  prev="$a"
done
printf '%s' '{response}'"#
    );
    fake_tool(&body)
}

/// Reads the argv a recording tool saved.
pub(crate) fn recorded_args(dir: &TempDir) -> Vec<String> {
    let raw = fs::read_to_string(dir.path().join("args.txt")).expect("tool recorded args");
    raw.lines().map(ToString::to_string).collect()
}

/// Reads the config document a recording tool saw.
pub(crate) fn recorded_conf(dir: &TempDir) -> serde_json::Value {
    let raw = fs::read_to_string(dir.path().join("seen_conf.json")).expect("tool saw a config");
    serde_json::from_str(&raw).expect("recorded config is JSON")
}
