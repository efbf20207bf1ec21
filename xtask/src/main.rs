//! Developer tasks (schema generation, contract fixtures, conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use posture_types::{DecisionType, Severity, explain};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("Cannot determine current directory")?,
    };

    // If we're in the xtask directory, go up one level
    if manifest_dir.ends_with("xtask")
        && let Some(parent) = manifest_dir.parent()
    {
        return Ok(parent.to_path_buf());
    }
    Ok(manifest_dir)
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

fn contracts_fixtures_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("contracts").join("fixtures"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(posture_types::PostureReportV1)
}

fn generate_decision_schema() -> schemars::Schema {
    schema_for!(posture_types::Decision)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(posture_settings::PostureConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "posture.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "posture.decision.v1.json",
            generate: generate_decision_schema,
        },
        SchemaSpec {
            filename: "posture.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate contract fixtures against the report schema");
    eprintln!("  conform-full      Contract fixtures + posture binary output vs golden reports");
    eprintln!("  explain-coverage  Validate every catalog check has an explanation");
}

/// Kinds and annotation keys: lowercase ASCII, digits, `_` and `.`.
fn is_valid_token(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.')
}

fn compile_report_schema() -> anyhow::Result<jsonschema::Validator> {
    let schema = serde_json::to_value(generate_report_schema())
        .context("Failed to convert report schema to JSON")?;
    jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {}", e))
}

/// Semantic rules the schema cannot express.
fn report_invariant_errors(name: &str, value: &serde_json::Value) -> Vec<String> {
    let mut errors = Vec::new();
    let decisions = value
        .get("decisions")
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();

    for (i, decision) in decisions.iter().enumerate() {
        let Some(header) = decision.get("header") else {
            continue;
        };
        let kind = header.get("kind").and_then(|v| v.as_str()).unwrap_or_default();
        if !is_valid_token(kind) {
            errors.push(format!("{name}: decisions[{i}].header.kind '{kind}' is not a valid token"));
        }
        if let Some(annotations) = header.get("annotations").and_then(|v| v.as_object()) {
            for key in annotations.keys() {
                if !is_valid_token(key) {
                    errors.push(format!(
                        "{name}: decisions[{i}] annotation key '{key}' is not a valid token"
                    ));
                }
            }
        }

        let decision_type = header.get("type").and_then(|v| v.as_str());
        let severity = header.get("severity").and_then(|v| v.as_str());
        if decision_type == Some(DecisionType::Allow.as_str())
            && severity != Some(Severity::Info.as_str())
        {
            errors.push(format!("{name}: decisions[{i}] is allow but severity is not info"));
        }
        if decision_type == Some(DecisionType::Undetermined.as_str()) {
            errors.push(format!("{name}: decisions[{i}] is undetermined"));
        }
    }
    errors
}

fn json_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Validate contract fixtures against the generated report schema plus the
/// decision invariants.
fn conform() -> anyhow::Result<()> {
    let compiled = compile_report_schema()?;
    println!("✓ posture.report.v1 schema compiles");

    let fixtures_dir = contracts_fixtures_dir()?;
    if !fixtures_dir.exists() {
        bail!("contracts/fixtures/ not found at {}", fixtures_dir.display());
    }

    let files = json_files(&fixtures_dir)?;
    if files.is_empty() {
        bail!("No JSON fixtures found in {}", fixtures_dir.display());
    }

    let mut errors = Vec::new();
    for path in &files {
        let name = file_label(path);
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", name))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} as JSON", name))?;

        for err in compiled.iter_errors(&value) {
            errors.push(format!("{}: schema validation: {}", name, err));
        }
        errors.extend(report_invariant_errors(&name, &value));
        println!("  ✓ {} checked", name);
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {} contract fixtures pass conformance checks!", files.len());
    Ok(())
}

/// Contract fixtures, then run the built binary on each CLI fixture directory
/// and compare the normalized report with its golden file.
fn conform_full() -> anyhow::Result<()> {
    conform()?;

    println!("\n--- Full conformance: posture binary output ---\n");

    let compiled = compile_report_schema()?;
    let root = project_root()?;
    let posture_bin = root.join("target").join("debug").join("posture");

    #[cfg(target_os = "windows")]
    let posture_bin = posture_bin.with_extension("exe");

    if !posture_bin.exists() {
        bail!(
            "posture binary not found at {}.\nRun `cargo build -p posture-cli` first.",
            posture_bin.display()
        );
    }

    let cli_fixtures = root
        .join("crates")
        .join("posture-cli")
        .join("tests")
        .join("fixtures");
    let mut errors = Vec::new();

    for entry in fs::read_dir(&cli_fixtures).context("Failed to read CLI fixtures")? {
        let fixture_dir = entry?.path();
        let requests = fixture_dir.join("requests.jsonl");
        let golden_path = fixture_dir.join("expected.report.json");
        if !requests.exists() || !golden_path.exists() {
            continue;
        }
        let name = file_label(&fixture_dir);

        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let report_out = temp_dir.path().join("report.json");

        let output = std::process::Command::new(&posture_bin)
            .arg("--config")
            .arg(fixture_dir.join("posture.toml"))
            .arg("evaluate")
            .arg("--input")
            .arg(&requests)
            .arg("--report-out")
            .arg(&report_out)
            .output()
            .with_context(|| format!("Failed to run posture on fixture '{}'", name))?;

        // 0 and 2 are verdicts; anything else is a tool failure.
        if !matches!(output.status.code(), Some(0) | Some(2)) {
            errors.push(format!(
                "fixture '{}': posture exited with {:?}: {}",
                name,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            ));
            continue;
        }

        let report: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(&report_out)
                .with_context(|| format!("fixture '{}': no report output generated", name))?,
        )
        .with_context(|| format!("Failed to parse report for fixture '{}'", name))?;

        for err in compiled.iter_errors(&report) {
            errors.push(format!("fixture '{}': schema validation: {}", name, err));
        }
        errors.extend(report_invariant_errors(&name, &report));

        let golden: serde_json::Value = serde_json::from_str(&fs::read_to_string(&golden_path)?)?;
        if posture_test_util::normalize_nondeterministic(report) != golden {
            errors.push(format!(
                "fixture '{}': output differs from expected.report.json",
                name
            ));
        } else {
            println!("  ✓ fixture '{}' matches golden report", name);
        }
    }

    if !errors.is_empty() {
        eprintln!("\nFull conformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Full conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ Full conformance checks passed!");
    Ok(())
}

/// Every catalog check must be documented, and every documented kind must exist.
fn explain_coverage() -> anyhow::Result<()> {
    let checks = posture_catalog::builtin_checks();
    let mut errors = Vec::new();

    for meta in &checks {
        match explain::lookup_explanation(meta.kind) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Check '{}' has empty title", meta.kind));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Check '{}' has empty description", meta.kind));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("Check '{}' has empty remediation", meta.kind));
                }
            }
            None => errors.push(format!("Check '{}' has no explanation", meta.kind)),
        }
    }

    for kind in explain::all_kinds() {
        if !checks.iter().any(|m| m.kind == *kind) {
            errors.push(format!("Explanation '{}' has no catalog check", kind));
        }
    }

    if errors.is_empty() {
        println!("✓ {} checks have explanations", checks.len());
        println!("\n✓ All explain coverage checks passed!");
        return Ok(());
    }

    for error in &errors {
        eprintln!("  - {}", error);
    }
    bail!("Explain coverage validation failed with {} errors", errors.len())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "conform-full" => conform_full(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
