use std::process::Command;

fn combined_output(output: &std::process::Output) -> String {
    let mut combined = String::new();
    combined.push_str(&String::from_utf8_lossy(&output.stdout));
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    combined
}

fn signpipe_bin() -> &'static str {
    option_env!("CARGO_BIN_EXE_signpipe").expect("signpipe test binary not built")
}

#[test]
fn signpipe_help_mentions_the_pipeline() {
    let output = Command::new(signpipe_bin())
        .arg("--help")
        .output()
        .expect("run signpipe --help");
    assert!(output.status.success());
    let combined = combined_output(&output);
    assert!(combined.contains("Sign-language frame pipeline"));
}

#[test]
fn signpipe_list_labels_prints_the_demo_catalog() {
    let output = Command::new(signpipe_bin())
        .arg("--list-labels")
        .output()
        .expect("run signpipe --list-labels");
    assert!(output.status.success());
    let combined = combined_output(&output);
    assert!(combined.contains("hello"));
    assert!(combined.contains("please"));
}

#[test]
fn signpipe_offline_session_reports_a_summary() {
    let output = Command::new(signpipe_bin())
        .output()
        .expect("run the signpipe offline demo");
    assert!(output.status.success());
    let combined = combined_output(&output);
    assert!(combined.contains("session:"));
    // The scripted session includes a low-confidence reset.
    assert!(combined.contains("undetermined"));
}

#[test]
fn signpipe_json_mode_emits_tagged_events() {
    let output = Command::new(signpipe_bin())
        .arg("--json")
        .output()
        .expect("run signpipe --json");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#""event":"result""#));
    assert!(stdout.contains(r#""event":"summary""#));
}

#[test]
fn signpipe_rejects_out_of_range_flags() {
    let output = Command::new(signpipe_bin())
        .args(["--window-frames", "0"])
        .output()
        .expect("run signpipe with a bad flag");
    assert!(!output.status.success());
    let combined = combined_output(&output);
    assert!(combined.contains("--window-frames"));
}
