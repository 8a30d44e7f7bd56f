//! Command-line front end tests
//!
//! Tests argument handling and the file-to-file path of the `arbor` tool.

use std::fs;
use std::path::PathBuf;

use arbor_cli::{Cli, Emit, process, render_error, run};
use clap::Parser;

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("arbor").chain(args.iter().copied())).unwrap()
}

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("arbor-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn file_to_file() {
    let input = scratch("in.js");
    let output = scratch("out.js");
    fs::write(&input, "if (has('a')) { on() } else { off() }\nrest();\n").unwrap();

    let cli = cli(&[
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-e",
        "a",
    ]);
    run(&cli).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "{on()}rest()\n");
}

#[test]
fn missing_input_file_is_io_error() {
    let cli = cli(&[scratch("does-not-exist.js").to_str().unwrap()]);
    let err = run(&cli).unwrap_err();
    assert!(err.to_string().starts_with("io error"), "{err}");
}

#[test]
fn parse_errors_name_the_input() {
    let input = scratch("broken.js");
    fs::write(&input, "ok();\nif (").unwrap();
    let cli = cli(&[input.to_str().unwrap()]);

    let rendered = render_error(&run(&cli).unwrap_err());
    assert!(rendered.starts_with("parse error at 2:5"), "{rendered}");
    assert!(rendered.contains("\n  if (\n      ^"), "{rendered}");
    assert!(rendered.ends_with(&format!("at {}", input.display())), "{rendered}");
}

#[test]
fn emit_ast_then_read_it_back() {
    let to_ast = cli(&["--emit", "ast", "--no-prune"]);
    assert_eq!(to_ast.emit, Emit::Ast);
    let json = process(&to_ast, "x = has('f') ? 1 : 2").unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["kind"], "Toplevel");

    assert_eq!(process(&cli(&["--from-ast", "-e", "f"]), &json).unwrap(), "x=1");
    assert_eq!(process(&cli(&["--from-ast", "-d", "f"]), &json).unwrap(), "x=2");
}

#[test]
fn rejects_unknown_flags() {
    let result = Cli::try_parse_from(["arbor", "--frobnicate"]);
    assert!(result.is_err());
}
