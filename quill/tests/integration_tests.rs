use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn quill(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quill"))
        .args(args)
        .env_remove("QUILL_LOG")
        .output()
        .expect("failed to run quill")
}

fn run(name: &str) -> Output {
    let path = fixture(name);
    quill(&[path.to_str().unwrap()])
}

fn run_with(flags: &[&str], name: &str) -> Output {
    let path = fixture(name);
    let mut args = flags.to_vec();
    args.push(path.to_str().unwrap());
    quill(&args)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn prints_tree() {
    let output = run("fib.ql");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\
Program
  Function fib -> Int
    Param: n: Int
    Block
      If
        Binary(<=)
          Var(n)
          Int(1)
      Then:
        Return
          Var(n)
      Return
        Binary(+)
          Call(fib)
            Binary(-)
              Var(n)
              Int(1)
          Call(fib)
            Binary(-)
              Var(n)
              Int(2)
  Function main -> Void
    Block
      Let(result: Int)
        Call(fib)
          Int(10)
      Call(print)
        Var(result)
"
    );
    assert_eq!(stderr(&output), "");
}

#[test]
fn empty_program() {
    let output = run("empty.ql");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Program\n");
}

#[test]
fn parse_error() {
    let output = run("missing_semi.ql");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert_eq!(
        stderr(&output),
        "Error: Parse error at line 2, col 14: Expected `;` after statement\n    return 1 let\n             ^\n"
    );
}

#[test]
fn lex_error() {
    let output = run("unterminated_string.ql");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output)
        .starts_with("Error: Lex error at line 3, col 2: Unterminated string\n}\n"));
}

#[test]
fn missing_file() {
    let output = run("does_not_exist.ql");
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.starts_with("Error: Could not open file: "));
    assert!(stderr.contains("does_not_exist.ql"));
}

#[test]
fn max_depth_flag() {
    let path = fixture("fib.ql");
    let path = path.to_str().unwrap();

    assert!(quill(&["--max-depth", "8", path]).status.success());

    let output = quill(&["--max-depth", "2", path]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Nesting depth exceeds the limit of 2"));
}

#[test]
fn max_depth_is_capped() {
    let output = run_with(&["--max-depth", "1000000"], "fib.ql");
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("--max-depth"), "stderr: {}", stderr);
    assert!(stderr.contains("1..=256"), "stderr: {}", stderr);

    let depth = 200_000;
    let path = std::env::temp_dir().join(format!("quill-deep-{}.ql", std::process::id()));
    std::fs::write(
        &path,
        format!(
            "fn f() -> Int {{ return {}1{} }}",
            "(".repeat(depth),
            ")".repeat(depth)
        ),
    )
    .unwrap();
    let output = quill(&["--max-depth", "256", path.to_str().unwrap()]);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(crate::stderr(&output).contains("Nesting depth exceeds the limit of 256"));
}

#[test]
fn usage_errors() {
    assert_eq!(quill(&[]).status.code(), Some(1));
    assert_eq!(quill(&["--max-depth", "many", "x.ql"]).status.code(), Some(1));

    let help = quill(&["--help"]);
    assert_eq!(help.status.code(), Some(0));
    assert!(stdout(&help).contains("--max-depth"));
}
