use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bytemask_core::{DecodeOptions, decode_jsonl_file};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.jsonl");
        if !input.exists() {
            continue;
        }
        let options = load_options(&path.join("options.json"))?;
        let output = path.join("expected_report.json");
        regenerate_one(&input, &options, &output)?;
    }

    Ok(())
}

fn load_options(path: &Path) -> Result<DecodeOptions, String> {
    if !path.exists() {
        return Ok(DecodeOptions::default());
    }
    let json = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    serde_json::from_str(&json).map_err(|err| format!("invalid {}: {}", path.display(), err))
}

fn regenerate_one(input: &Path, options: &DecodeOptions, output: &Path) -> Result<(), String> {
    let report = decode_jsonl_file(input, options)
        .map_err(|err| format!("decoding failed for {}: {}", input.display(), err))?;
    let json = serde_json::to_string(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
