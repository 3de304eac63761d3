//! Integration tests for the normalizer pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use normalizer::{
    AnalysisReport, FdStatus, NormalForm, NormalizationConfig, Normalizer, NormalizerConfig, NormalizerError, Question,
    TargetForm, WarningKind,
};

/// Employees with a transitive dept_id → dept_name dependency. Names repeat
/// across employees and "Sales" is shared by two departments.
const EMPLOYEES: &str = "emp_id,emp_name,dept_id,dept_name\n\
                         1,Alice,10,Sales\n\
                         2,Bob,10,Sales\n\
                         3,Carol,20,Ops\n\
                         4,Alice,20,Ops\n\
                         5,Dan,30,Sales\n\
                         6,Erin,30,Sales\n";

/// Helper to write `content` to `name` inside a fresh temp dir.
fn create_test_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test file");
    (dir, path)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
}

// =============================================================================
// Analysis
// =============================================================================

#[test]
fn test_analyze_employee_table() {
    let (_dir, path) = create_test_file("employees.csv", EMPLOYEES);

    let report = Normalizer::new().analyze(&path).expect("Analysis failed");

    assert_eq!(report.rows, 6);
    assert_eq!(report.columns, vec!["emp_id", "emp_name", "dept_id", "dept_name"]);
    assert_eq!(report.source.format, "csv");

    let confirmed: Vec<String> = report
        .functional_dependencies
        .iter()
        .filter(|fd| fd.status == Some(FdStatus::Confirmed))
        .map(|fd| fd.dependency.to_string())
        .collect();
    assert_eq!(
        confirmed,
        vec![
            "[emp_id] → emp_name",
            "[emp_id] → dept_id",
            "[emp_id] → dept_name",
            "[dept_id] → dept_name",
        ]
    );

    // Shared department names keep dept_name → dept_id below threshold.
    assert!(
        !report
            .functional_dependencies
            .iter()
            .any(|fd| fd.dependency.to_string() == "[dept_name] → dept_id")
    );

    assert_eq!(report.candidate_keys.len(), 1);
    assert_eq!(report.candidate_keys[0].columns, vec!["emp_id"]);

    assert_eq!(report.current_normal_form, NormalForm::Second);
    assert_eq!(
        report.violations.get(&NormalForm::Third).map(Vec::as_slice),
        Some(&["Transitive dependency: [dept_id] → dept_name".to_string()][..])
    );
    assert!(report.warnings.is_empty());
}

#[test]
fn test_near_dependencies_need_review() {
    let (_dir, path) = create_test_file("employees.csv", EMPLOYEES);
    let report = Normalizer::new().analyze(&path).expect("Analysis failed");

    // Alice appears twice with different ids: 4 of 5 name groups agree.
    let review: Vec<_> = report
        .functional_dependencies
        .iter()
        .filter(|fd| fd.needs_review())
        .collect();
    assert!(!review.is_empty());
    for fd in &review {
        assert!(fd.determinant().contains("emp_name"));
        assert!((fd.confidence - 0.8).abs() < 1e-9);
        assert_eq!(fd.violations, 1);
        assert_eq!(fd.total_groups, 5);
    }

    let confirmations = report
        .questions
        .iter()
        .filter(|q| matches!(q, Question::FdConfirmation { .. }))
        .count();
    assert_eq!(confirmations, review.len());
    assert_eq!(report.review_count(), review.len());
}

#[test]
fn test_stricter_threshold_drops_near_dependencies() {
    let (_dir, path) = create_test_file("employees.csv", EMPLOYEES);
    let mut config = NormalizerConfig::default();
    config.discovery.confidence_threshold = 0.9;

    let report = Normalizer::with_config(config).analyze(&path).expect("Analysis failed");

    assert_eq!(report.review_count(), 0);
    assert_eq!(report.confirmed_count(), 4);
}

#[test]
fn test_analyze_tsv_with_list_column_is_unf() {
    let content = "id\ttags\n\
                   1\ta,b\n\
                   2\tc;d\n\
                   3\te\n\
                   4\tf|g\n";
    let (_dir, path) = create_test_file("tags.tsv", content);

    let report = Normalizer::new().analyze(&path).expect("Analysis failed");

    assert_eq!(report.source.format, "tsv");
    assert_eq!(report.current_normal_form, NormalForm::Unf);
    assert_eq!(
        report.violations[&NormalForm::First],
        vec!["Column 'tags' may contain non-atomic values"]
    );
}

#[test]
fn test_report_roundtrips_through_json() {
    let (dir, path) = create_test_file("employees.csv", EMPLOYEES);
    let report = Normalizer::new().analyze(&path).expect("Analysis failed");

    let saved = dir.path().join("employees.analysis.json");
    report.save(&saved).expect("save failed");
    let loaded = AnalysisReport::load(&saved).expect("load failed");

    assert_eq!(loaded.functional_dependencies, report.functional_dependencies);
    assert_eq!(loaded.candidate_keys, report.candidate_keys);
    assert_eq!(loaded.current_normal_form, report.current_normal_form);

    // The saved report doubles as a normalization config.
    let config = NormalizationConfig::load(&saved).expect("config load failed");
    assert_eq!(config.confirmed().len(), 4);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = Normalizer::new().analyze(dir.path().join("absent.csv"));
    assert!(matches!(result, Err(NormalizerError::Io { .. })));
}

#[test]
fn test_header_only_file_is_rejected() {
    let (_dir, path) = create_test_file("empty.csv", "a,b,c\n");
    let result = Normalizer::new().analyze(&path);
    assert!(matches!(result, Err(NormalizerError::EmptyData(_))));
}

#[test]
fn test_duplicate_header_is_rejected() {
    let (_dir, path) = create_test_file("dupes.csv", "id,name,name\n1,a,x\n2,b,y\n3,c,z\n");
    let result = Normalizer::new().analyze(&path);
    assert!(matches!(result, Err(NormalizerError::DuplicateColumn(name)) if name == "name"));
}

#[test]
fn test_sampling_limits_rows() {
    let mut content = String::from("id,group\n");
    for i in 0..200 {
        content.push_str(&format!("{},{}\n", i, i % 7));
    }
    let (_dir, path) = create_test_file("big.csv", &content);

    let config = NormalizerConfig {
        sample_rows: Some(50),
        ..NormalizerConfig::default()
    };
    let first = Normalizer::with_config(config.clone()).analyze(&path).unwrap();
    let second = Normalizer::with_config(config).analyze(&path).unwrap();

    assert_eq!(first.rows, 50);
    assert_eq!(first.source.row_count, 50);
    assert_eq!(first.functional_dependencies, second.functional_dependencies);
}

// =============================================================================
// Normalization
// =============================================================================

fn analyze_and_normalize(target: TargetForm) -> (TempDir, normalizer::NormalizeResult) {
    let (dir, path) = create_test_file("employees.csv", EMPLOYEES);
    let normalizer = Normalizer::new();
    let report = normalizer.analyze(&path).expect("Analysis failed");
    let config = NormalizationConfig::from(&report);

    let out = dir.path().join("normalized");
    let result = normalizer
        .normalize(&path, &config, target, &out)
        .expect("Normalization failed");
    (dir, result)
}

#[test]
fn test_normalize_to_3nf() {
    let (_dir, result) = analyze_and_normalize(TargetForm::ThirdNormalForm);
    let decomposition = &result.decomposition;

    let names: Vec<&str> = decomposition.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["emps", "dept_names"]);

    let emps = decomposition.table("emps").unwrap();
    assert_eq!(emps.columns, vec!["emp_id", "emp_name", "dept_id"]);
    assert_eq!(emps.primary_key, vec!["emp_id"]);

    let depts = decomposition.table("dept_names").unwrap();
    assert_eq!(depts.columns, vec!["dept_id", "dept_name"]);
    assert_eq!(depts.primary_key, vec!["dept_id"]);

    assert_eq!(decomposition.foreign_keys.len(), 1);
    let fk = &decomposition.foreign_keys[0];
    assert_eq!(
        (fk.child_table.as_str(), fk.column.as_str(), fk.parent_table.as_str(), fk.parent_column.as_str()),
        ("emps", "dept_id", "dept_names", "dept_id")
    );
    assert!(result.warnings().is_empty());
}

#[test]
fn test_normalize_writes_artifacts() {
    let (_dir, result) = analyze_and_normalize(TargetForm::ThirdNormalForm);
    let out = &result.output_dir;

    assert_eq!(
        read(&out.join("tables").join("dept_names.csv")),
        "dept_id,dept_name\n10,Sales\n20,Ops\n30,Sales\n"
    );
    assert_eq!(
        read(&out.join("tables").join("emps.csv")),
        "emp_id,emp_name,dept_id\n1,Alice,10\n2,Bob,10\n3,Carol,20\n4,Alice,20\n5,Dan,30\n6,Erin,30\n"
    );
    assert_eq!(result.tables.iter().map(|t| t.rows).collect::<Vec<_>>(), vec![6, 3]);

    let schema = read(&out.join("schema.sql"));
    assert!(schema.contains("CREATE TABLE emps"));
    assert!(schema.contains("CREATE TABLE dept_names"));
    assert!(schema.contains("REFERENCES dept_names(dept_id)"));

    let erd = read(&out.join("erd.md"));
    assert!(erd.contains("```mermaid"));
    assert!(erd.contains("erDiagram"));

    let readme = read(&out.join("README.md"));
    assert!(readme.contains("emps"));

    let transform: serde_json::Value = serde_json::from_str(&read(&out.join("transform_config.json"))).unwrap();
    assert_eq!(transform["version"], "1.0");
    assert_eq!(transform["tables"].as_array().unwrap().len(), 2);
    assert_eq!(transform["original_columns"][3], "dept_name");
}

#[test]
fn test_normalize_to_bcnf() {
    let (_dir, result) = analyze_and_normalize(TargetForm::BoyceCodd);
    let decomposition = &result.decomposition;

    let names: Vec<&str> = decomposition.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["dept_names", "emps"]);
    assert_eq!(decomposition.table("emps").unwrap().primary_key, vec!["emp_id"]);
    assert_eq!(decomposition.foreign_keys.len(), 1);
    assert_eq!(decomposition.foreign_keys[0].child_table, "emps");
}

#[test]
fn test_normalize_without_dependencies_keeps_one_table() {
    let content = "a,b\n1,x\n1,y\n2,x\n2,y\n";
    let (dir, path) = create_test_file("pairs.csv", content);
    let normalizer = Normalizer::new();
    let report = normalizer.analyze(&path).unwrap();
    assert!(report.warnings.iter().any(|w| w.kind == WarningKind::NoDependencies));

    let result = normalizer
        .normalize(
            &path,
            &NormalizationConfig::from(&report),
            TargetForm::ThirdNormalForm,
            dir.path().join("out"),
        )
        .unwrap();

    assert_eq!(result.decomposition.tables.len(), 1);
    let table = &result.decomposition.tables[0];
    assert_eq!(table.columns, vec!["a", "b"]);
    assert_eq!(table.primary_key, vec!["a", "b"]);
    assert!(result.warnings().iter().any(|w| w.kind == WarningKind::NoDependencies));
}

#[test]
fn test_header_with_slash_stays_inside_tables_dir() {
    let content = "id,price/unit\n1,5\n2,5\n3,7\n4,7\n";
    let (dir, path) = create_test_file("prices.csv", content);
    let normalizer = Normalizer::new();
    let report = normalizer.analyze(&path).unwrap();

    let out = dir.path().join("out");
    let result = normalizer
        .normalize(&path, &NormalizationConfig::from(&report), TargetForm::ThirdNormalForm, &out)
        .expect("Normalization failed");

    assert_eq!(result.tables.len(), 1);
    let written = &result.tables[0];
    assert!(written.name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'), "{}", written.name);
    assert_eq!(written.path, out.join("tables").join(format!("{}.csv", written.name)));
    assert_eq!(read(&written.path), "id,price/unit\n1,5\n2,5\n3,7\n4,7\n");
}

#[test]
fn test_unsupported_target_is_rejected() {
    let err = "4NF".parse::<TargetForm>().unwrap_err();
    assert!(matches!(err, NormalizerError::UnsupportedTarget(ref t) if t == "4NF"));
    assert_eq!("bcnf".parse::<TargetForm>().unwrap(), TargetForm::BoyceCodd);
    assert_eq!("3nf".parse::<TargetForm>().unwrap(), TargetForm::ThirdNormalForm);
}

#[test]
fn test_edited_config_drives_decomposition() {
    let (dir, path) = create_test_file("employees.csv", EMPLOYEES);
    let config_path = dir.path().join("reviewed.json");
    // A reviewer kept only emp_id → emp_name.
    fs::write(
        &config_path,
        r#"{
            "functional_dependencies": [
                {"determinant": ["emp_id"], "dependent": "emp_name", "confidence": 1.0, "status": "confirmed"},
                {"determinant": ["emp_name"], "dependent": "dept_id", "confidence": 0.8, "status": "needs_review"}
            ],
            "candidate_keys": [{"columns": ["emp_id"]}]
        }"#,
    )
    .unwrap();

    let config = NormalizationConfig::load(&config_path).unwrap();
    let result = Normalizer::new()
        .normalize(&path, &config, TargetForm::ThirdNormalForm, dir.path().join("out"))
        .unwrap();

    let names: Vec<&str> = result.decomposition.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["emp_names", "main"]);
    let main = result.decomposition.table("main").unwrap();
    assert_eq!(main.columns, vec!["emp_id", "dept_id", "dept_name"]);
    assert_eq!(
        result
            .warnings()
            .iter()
            .filter(|w| w.kind == WarningKind::UncoveredAttribute)
            .count(),
        2
    );
}

#[test]
fn test_invalid_config_is_config_error() {
    let (dir, _) = create_test_file("employees.csv", EMPLOYEES);
    let config_path = dir.path().join("bad.json");
    fs::write(
        &config_path,
        r#"{"functional_dependencies": [{"determinant": ["a"], "dependent": "a"}]}"#,
    )
    .unwrap();

    assert!(matches!(
        NormalizationConfig::load(&config_path),
        Err(NormalizerError::Config(_))
    ));
}

#[test]
fn test_natural_join_reconstructs_rows() {
    use std::collections::{BTreeSet, HashMap};

    use normalizer::Parser;

    let (dir, result) = analyze_and_normalize(TargetForm::ThirdNormalForm);
    let parser = Parser::new();
    let (emps, _) = parser.parse_file(result.output_dir.join("tables/emps.csv")).unwrap();
    let (depts, _) = parser.parse_file(result.output_dir.join("tables/dept_names.csv")).unwrap();
    let (original, _) = parser.parse_file(dir.path().join("employees.csv")).unwrap();

    let dept_name: HashMap<&str, &str> = depts.rows.iter().map(|r| (r[0].as_str(), r[1].as_str())).collect();
    let joined: BTreeSet<Vec<String>> = emps
        .rows
        .iter()
        .map(|r| {
            let mut row = r.clone();
            row.push(dept_name[r[2].as_str()].to_string());
            row
        })
        .collect();
    let expected: BTreeSet<Vec<String>> = original.rows.iter().cloned().collect();

    assert_eq!(joined, expected);
}
