//! Hygiene: enforces coding standards at test time.
//!
//! Scans the crate's production sources for antipatterns. Each pattern has a
//! budget; lower it when you remove a hit, never raise it.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    note: &'static str,
}

const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, note: "propagate or handle the error" },
    Budget { pattern: ".expect(", max: 0, note: "propagate or handle the error" },
    Budget { pattern: "panic!(", max: 0, note: "a panic tears down the whole WASM app" },
    Budget { pattern: "unreachable!(", max: 0, note: "model the state instead" },
    Budget { pattern: "todo!(", max: 0, note: "finish the stub" },
    Budget { pattern: "unimplemented!(", max: 0, note: "finish the stub" },
    Budget { pattern: "let _ =", max: 0, note: "inspect or log the discarded value" },
    // Parse-to-Option conversions in config, date and route-id parsing.
    Budget { pattern: ".ok()", max: 7, note: "only for parse fallbacks" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, note: "delete unused code" },
];

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`, excluding `*_test.rs`.
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
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")), "run from the crate root");
}

#[test]
fn antipattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let listing = found.iter().map(|(path, c)| format!("    {path}: {c}")).collect::<Vec<_>>().join("\n");
            failures.push(format!(
                "{} budget exceeded: found {count}, max {} ({}).\n{listing}",
                budget.pattern, budget.max, budget.note
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn every_test_file_is_attached() {
    let files = source_files();
    let mut missing = Vec::new();
    for dir in ["src", "src/net", "src/pages", "src/state", "src/util"] {
        let Ok(entries) = fs::read_dir(dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.ends_with("_test.rs") {
                continue;
            }
            let attach = format!("#[path = \"{name}\"]");
            if !files.iter().any(|f| f.content.contains(&attach)) {
                missing.push(format!("{dir}/{name}"));
            }
        }
    }
    assert!(missing.is_empty(), "test files never compiled: {missing:?}");
}
