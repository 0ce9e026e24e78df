use jsonschema::validator_for;

use crate::scenario::{self, Workspace};

fn read_schema(name: &str) -> serde_json::Value {
  let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  let path = manifest_dir.join("tests").join("schemas").join(name);
  let data = std::fs::read(&path).expect("schema file");
  serde_json::from_slice(&data).expect("valid schema JSON")
}

fn compile_schema(name: &str) -> jsonschema::Validator {
  let schema = read_schema(name);
  validator_for(&schema).expect("compile schema")
}

#[test]
fn report_conforms_to_schema() {
  let ws = Workspace::new(&scenario::responses());
  let v = ws.run_ok();

  let compiled = compile_schema("review-matrix.report.schema.json");
  compiled.validate(&v).expect("schema validation failed for report");
}

#[test]
fn schema_rejects_reports_missing_a_series() {
  let ws = Workspace::new(&scenario::responses());
  let mut v = ws.run_ok();
  v["datasets"].as_array_mut().unwrap().pop();

  let compiled = compile_schema("review-matrix.report.schema.json");
  assert!(!compiled.is_valid(&v));
}
