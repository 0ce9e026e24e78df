// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Author x reviewer interaction counts (review requested / review completed) plus authored totals
// role: aggregation/matrix
// inputs: Ordered author list; per-PR author, requested and completed lists
// outputs: 2 x N x N counts; per-author authored counts; reviewer-axis column sums
// invariants:
// - author order fixes the index 0..N-1; lookups go through a map built once
// - cells start at zero and only increase
// - reviewers outside the author list are skipped with a warning
// - record() is called at most once per pull request
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{ReportError, Result};

/// Layer 0 of the matrix.
pub const REQUESTED: usize = 0;
/// Layer 1 of the matrix.
pub const COMPLETED: usize = 1;

#[derive(Debug, Clone)]
pub struct AuthorIndex {
  logins: Vec<String>,
  index: HashMap<String, usize>,
}

impl AuthorIndex {
  pub fn new(logins: &[String]) -> Result<Self> {
    let mut index = HashMap::with_capacity(logins.len());
    for (i, login) in logins.iter().enumerate() {
      if index.insert(login.clone(), i).is_some() {
        return Err(ReportError::Config(format!("author {login:?} listed twice")));
      }
    }
    Ok(Self {
      logins: logins.to_vec(),
      index,
    })
  }

  pub fn get(&self, login: &str) -> Option<usize> {
    self.index.get(login).copied()
  }

  pub fn len(&self) -> usize {
    self.logins.len()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InteractionMatrix {
  cells: [Vec<Vec<u64>>; 2],
}

impl InteractionMatrix {
  pub fn new(n: usize) -> Self {
    Self {
      cells: [vec![vec![0; n]; n], vec![vec![0; n]; n]],
    }
  }

  pub fn get(&self, layer: usize, author: usize, reviewer: usize) -> u64 {
    self.cells[layer][author][reviewer]
  }

  /// Count one pull request's reviewer relationships.
  ///
  /// `context` names the pull request in warnings about reviewers outside the group.
  /// Returns the author's index.
  pub fn record(
    &mut self,
    authors: &AuthorIndex,
    author: &str,
    requested: &[String],
    completed: &[String],
    context: &str,
  ) -> Result<usize> {
    let author_idx = authors
      .get(author)
      .ok_or_else(|| ReportError::data(context, format!("author {author:?} is not in the author list")))?;

    for (layer, reviewers, what) in [
      (REQUESTED, requested, "Review requested to"),
      (COMPLETED, completed, "Reviewed by"),
    ] {
      for reviewer in reviewers {
        match authors.get(reviewer) {
          Some(reviewer_idx) => self.cells[layer][author_idx][reviewer_idx] += 1,
          None => tracing::warn!("{what} other group member: {reviewer} in {context}"),
        }
      }
    }
    Ok(author_idx)
  }

  /// Totals per reviewer for one layer (sum over authors).
  pub fn reviewer_totals(&self, layer: usize) -> Vec<u64> {
    let n = self.cells[layer].len();
    (0..n)
      .map(|j| self.cells[layer].iter().map(|row| row[j]).sum())
      .collect()
  }
}
