use folio::config::FolioConfig;
use folio::tooling::cli::{CliContext, Commands, OutputFormat};
use std::fs;
use tempfile::TempDir;

const SCRIPT: &str = r#"
steps:
  - op: create_folder
    name: images
  - op: create_file
    name: diagram.png
    parent: images
  - op: create_file
    name: main
  - op: create_folder
    name: inner
    parent: images
  - op: move
    path: images
    into: images/inner
  - op: select
    path: main.tex
"#;

fn context() -> CliContext {
    CliContext::from_config(FolioConfig::default())
}

#[test]
fn test_replay_text_reports_rejections() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("steps.yaml");
    fs::write(&script, SCRIPT).unwrap();

    let out = context()
        .execute(&Commands::Replay {
            script,
            dir: None,
            format: OutputFormat::Text,
        })
        .unwrap();

    assert!(out.starts_with("v images/\n    diagram.png\n  > inner/\n  main.tex *\n"));
    assert!(out.contains("Applied 5 step(s), 1 rejected"));
    assert!(out.contains("step 5 (move)"));
}

#[test]
fn test_replay_json_over_loaded_directory() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("project");
    fs::create_dir(&project).unwrap();
    fs::write(project.join("main.tex"), "body").unwrap();
    let script = dir.path().join("steps.json");
    fs::write(
        &script,
        r#"{"steps": [{"op": "rename", "path": "main.tex", "name": "thesis"}]}"#,
    )
    .unwrap();

    let out = context()
        .execute(&Commands::Replay {
            script,
            dir: Some(project),
            format: OutputFormat::Json,
        })
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["applied"], 1);
    assert_eq!(value["tree"][0]["name"], "thesis.tex");
    assert_eq!(value["tree"][0]["content"], "body");
    assert_eq!(value["selected"], value["tree"][0]["id"]);
}

#[test]
fn test_replay_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("steps.txt");
    fs::write(&script, "steps: []").unwrap();
    let err = context()
        .execute(&Commands::Replay {
            script,
            dir: None,
            format: OutputFormat::Text,
        })
        .unwrap_err();
    assert!(err.to_string().contains("Unsupported script format"));
}

#[test]
fn test_show_table_lists_every_row() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("figs")).unwrap();
    fs::write(dir.path().join("figs/a.png"), [0x89, b'P', b'N', b'G']).unwrap();
    fs::write(dir.path().join("main.tex"), "x").unwrap();

    let out = context()
        .execute(&Commands::Show {
            dir: dir.path().to_path_buf(),
            format: OutputFormat::Table,
            expand: true,
            no_color: true,
        })
        .unwrap();
    assert!(out.contains("figs"));
    assert!(out.contains("a.png"));
    assert!(out.contains("main.tex"));
    assert!(out.contains("png"));
}
