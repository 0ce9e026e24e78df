use crate::scenario::{self, Workspace};

#[test]
fn pr_details_snapshot() {
  let ws = Workspace::new(&scenario::responses());
  let v = ws.run_ok();
  let details = serde_json::to_string_pretty(&v["pr_details"]).unwrap();

  test_support::insta_settings().bind(|| {
    insta::assert_snapshot!("pr_details", details);
  });
}
