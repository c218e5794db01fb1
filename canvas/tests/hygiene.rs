//! Hygiene: enforces coding standards at test time
//!
//! Scans the canvas crate's production sources (everything under `src/` that
//! is not a `_test.rs` file) for patterns the crate does not allow. Each
//! pattern has a budget; all budgets are zero and only ever go down.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

/// A forbidden pattern and how many occurrences are tolerated.
struct Budget {
    pattern: &'static str,
    max: usize,
    reason: &'static str,
}

const PANICS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, reason: "crashes the wasm module" },
    Budget { pattern: ".expect(", max: 0, reason: "crashes the wasm module" },
    Budget { pattern: "panic!(", max: 0, reason: "crashes the wasm module" },
    Budget { pattern: "unreachable!(", max: 0, reason: "crashes the wasm module" },
    Budget { pattern: "todo!(", max: 0, reason: "unfinished code path" },
    Budget { pattern: "unimplemented!(", max: 0, reason: "unfinished code path" },
];

const SILENT_LOSS: &[Budget] = &[
    Budget { pattern: "let _ =", max: 0, reason: "discards a result without inspecting it" },
    Budget { pattern: ".ok()", max: 0, reason: "discards an error without inspecting it" },
];

const STYLE: &[Budget] = &[
    Budget { pattern: "#[allow(dead_code)]", max: 0, reason: "hides unused code" },
    Budget { pattern: "println!(", max: 0, reason: "use the log crate" },
    Budget { pattern: "eprintln!(", max: 0, reason: "use the log crate" },
];

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|f| (f.path.clone(), f.content.lines().filter(|l| l.contains(pattern)).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

fn check(budgets: &[Budget]) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the canvas crate root");

    let mut failures = Vec::new();
    for budget in budgets {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let detail: Vec<String> = found.iter().map(|(path, c)| format!("    {path}: {c}")).collect();
            failures.push(format!(
                "  `{}` found {count}, max {} ({})\n{}",
                budget.pattern,
                budget.max,
                budget.reason,
                detail.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "hygiene budget exceeded:\n{}", failures.join("\n"));
}

#[test]
fn panic_budgets() {
    check(PANICS);
}

#[test]
fn silent_loss_budgets() {
    check(SILENT_LOSS);
}

#[test]
fn style_budgets() {
    check(STYLE);
}
