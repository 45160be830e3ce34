//! Pipeline behaviour against stand-in ffmpeg scripts: cleanup on every exit
//! path, error mapping, and the exact commands issued.

#![cfg(unix)]

mod common;

use std::path::PathBuf;

use common::{fake_tools, Workspace};
use video_appender::{video::temp::is_temp_name, AppendError, Config, VideoAppender};

fn appender_with(ffmpeg: PathBuf) -> VideoAppender {
    let mut config = Config::default();
    config.tools.ffmpeg = ffmpeg;
    VideoAppender::new(config)
}

fn assert_no_temporaries(ws: &Workspace) {
    let leftovers: Vec<String> = ws.entries().into_iter().filter(|n| is_temp_name(n)).collect();
    assert!(leftovers.is_empty(), "temporary files left: {:?}", leftovers);
}

#[tokio::test]
async fn test_successful_append_leaves_only_output() {
    let tools = fake_tools();
    let ws = Workspace::new();

    let report = appender_with(tools.ok())
        .append(&ws.input, &ws.tail, &ws.output)
        .await
        .unwrap();

    assert_eq!(report.output, ws.output);
    assert_eq!(std::fs::read_to_string(&ws.output).unwrap(), "fake media\n");
    assert_eq!(ws.entries(), vec!["input.mp4", "joined.mp4", "tail.mp4"]);
}

#[tokio::test]
async fn test_first_normalization_failure() {
    let tools = fake_tools();
    let ws = Workspace::new();

    let err = appender_with(tools.fail())
        .append(&ws.input, &ws.tail, &ws.output)
        .await
        .unwrap_err();

    match err {
        AppendError::Normalization { source_path, stderr } => {
            assert_eq!(source_path, ws.input.display().to_string());
            assert_eq!(stderr, "boom: Invalid data found when processing input");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!ws.output.exists());
    assert_no_temporaries(&ws);
}

#[tokio::test]
async fn test_second_normalization_failure_removes_first_intermediate() {
    let tools = fake_tools();
    let ws = Workspace::new();

    let err = appender_with(tools.fail_on_tail())
        .append(&ws.input, &ws.tail, &ws.output)
        .await
        .unwrap_err();

    assert!(
        matches!(err, AppendError::Normalization { ref source_path, .. } if source_path.ends_with("tail.mp4"))
    );
    assert!(!ws.output.exists());
    assert_no_temporaries(&ws);
}

#[tokio::test]
async fn test_concat_failure_removes_everything() {
    let tools = fake_tools();
    let ws = Workspace::new();

    let err = appender_with(tools.fail_concat())
        .append(&ws.input, &ws.tail, &ws.output)
        .await
        .unwrap_err();

    assert!(matches!(err, AppendError::Concat { ref stderr } if stderr == "concat: Non-monotonous DTS"));
    assert!(!ws.output.exists());
    assert_eq!(ws.entries(), vec!["input.mp4", "tail.mp4"]);
}

#[tokio::test]
async fn test_rerun_overwrites_output() {
    let tools = fake_tools();
    let ws = Workspace::new();
    std::fs::write(&ws.output, b"stale").unwrap();

    let appender = appender_with(tools.ok());
    appender.append(&ws.input, &ws.tail, &ws.output).await.unwrap();
    appender.append(&ws.input, &ws.tail, &ws.output).await.unwrap();

    assert_eq!(std::fs::read_to_string(&ws.output).unwrap(), "fake media\n");
    assert_no_temporaries(&ws);
}

#[tokio::test]
async fn test_commands_and_manifest() {
    let tools = fake_tools();
    let ws = Workspace::new();

    appender_with(tools.recording())
        .append(&ws.input, &ws.tail, &ws.output)
        .await
        .unwrap();

    let calls = std::fs::read_to_string(tools.calls_log()).unwrap();
    let calls: Vec<&str> = calls.lines().collect();
    assert_eq!(calls.len(), 3);

    let normalize_tail = "-c:v libx264 -c:a aac -preset fast -crf 23 -movflags +faststart -r 30 -s 1080x1920 -y";
    assert!(calls[0].starts_with(&format!("-i {} ", ws.input.display())));
    assert!(calls[0].contains(normalize_tail));
    assert!(calls[1].starts_with(&format!("-i {} ", ws.tail.display())));
    assert!(calls[1].contains(normalize_tail));
    assert!(calls[2].starts_with("-f concat -safe 0 -i "));
    assert!(calls[2].contains(" -c copy -y "));

    let manifest = std::fs::read_to_string(tools.manifest_log()).unwrap();
    let lines: Vec<&str> = manifest.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("file '/"));
    assert!(lines[0].contains("/norm_input_"));
    assert!(lines[1].contains("/norm_append_"));
    assert!(lines.iter().all(|l| l.ends_with(".mp4'")));

    assert_no_temporaries(&ws);
}

#[tokio::test]
async fn test_batch_continues_past_failures() {
    let tools = fake_tools();
    let ws = Workspace::new();
    let other = ws.dir.path().join("second.mp4");
    std::fs::write(&other, b"second").unwrap();
    let out_dir = ws.dir.path().join("out");

    let inputs = vec![ws.input.clone(), ws.dir.path().join("missing.mp4"), other];
    let report = appender_with(tools.ok())
        .append_batch(&inputs, &ws.tail, &out_dir)
        .await
        .unwrap();

    assert_eq!(
        report.succeeded,
        vec![out_dir.join("appended-0-input.mp4"), out_dir.join("appended-2-second.mp4")]
    );
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].input, inputs[1]);
    assert!(report.succeeded.iter().all(|p| p.exists()));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_non_utf8_output_directory() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tools = fake_tools();
    let ws = Workspace::new();
    let out_dir = ws.dir.path().join(OsStr::from_bytes(b"clips_\xff"));
    std::fs::create_dir(&out_dir).unwrap();
    let output = out_dir.join("joined.mp4");

    appender_with(tools.ok())
        .append(&ws.input, &ws.tail, &output)
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "fake media\n");
    let entries: Vec<_> = std::fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("joined.mp4")]);
}
