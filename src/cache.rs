// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Two-tier response cache persisted across runs (search staleness oracle + raw detail responses)
// role: cache/persistence
// inputs: Search items (html_url, updated_at); endpoint URLs; a GithubApi transport
// outputs: Staleness decisions; cached or freshly fetched payloads (raw or typed)
// side_effects: Network fetches on miss or forced refresh; cache files rewritten by flush()
// invariants:
// - is_stale reads the stored updated_at before overwriting it
// - One staleness decision per pull request is passed to every detail fetch for that pull request
// - Fetch failures propagate; nothing is stored for a failed fetch
// - Files are rewritten in full at the end of a run, never incrementally
// errors: Transport errors bubble unchanged; undecodable payloads become DataConsistency
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{ReportError, Result};
use crate::github::GithubApi;
use crate::model::{EndpointPayload, PullRef, SearchItem};
use crate::util;

/// `html_url` -> last observed `updated_at`. Only ever used to decide staleness.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchCache {
  entries: BTreeMap<String, String>,
}

impl SearchCache {
  pub fn load(path: &Path) -> Result<Self> {
    Ok(Self {
      entries: load_map(path)?,
    })
  }

  pub fn flush(&self, path: &Path) -> Result<()> {
    util::write_json_atomic(path, &self.entries)
  }

  /// True unless the stored `updated_at` equals the item's current one.
  /// The entry is then overwritten with the current value either way.
  pub fn is_stale(&mut self, item: &SearchItem) -> bool {
    let stale = self.entries.get(&item.html_url) != Some(&item.updated_at);
    self
      .entries
      .insert(item.html_url.clone(), item.updated_at.clone());
    stale
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
  pub hits: usize,
  pub fetches: usize,
}

/// Endpoint URL -> last fetched raw JSON response.
#[derive(Debug, Default, Clone)]
pub struct DetailCache {
  entries: BTreeMap<String, serde_json::Value>,
  stats: CacheStats,
}

impl DetailCache {
  pub fn load(path: &Path) -> Result<Self> {
    Ok(Self {
      entries: load_map(path)?,
      stats: CacheStats::default(),
    })
  }

  pub fn flush(&self, path: &Path) -> Result<()> {
    util::write_json_atomic(path, &self.entries)
  }

  pub fn stats(&self) -> CacheStats {
    self.stats
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Return the cached response for `url`, fetching it first when absent or
  /// when `force_refresh` is set.
  pub fn get_or_fetch(
    &mut self,
    api: &dyn GithubApi,
    url: &str,
    force_refresh: bool,
  ) -> Result<&serde_json::Value> {
    if force_refresh || !self.entries.contains_key(url) {
      let fresh = api.get_json(url)?;
      tracing::debug!(url, force_refresh, "fetched");
      self.stats.fetches += 1;
      self.entries.insert(url.to_string(), fresh);
    } else {
      tracing::debug!(url, "cache hit");
      self.stats.hits += 1;
    }

    self
      .entries
      .get(url)
      .ok_or_else(|| ReportError::data(url, "entry vanished after insert"))
  }

  /// Typed variant of [`get_or_fetch`](Self::get_or_fetch); the payload type
  /// selects the endpoint.
  pub fn fetch<P: EndpointPayload>(
    &mut self,
    api: &dyn GithubApi,
    pull: &PullRef,
    force_refresh: bool,
  ) -> Result<P> {
    let url = P::ENDPOINT.url(pull);
    let raw = self.get_or_fetch(api, &url, force_refresh)?;
    decode(&url, raw)
  }
}

pub fn decode<T: DeserializeOwned>(context: &str, raw: &serde_json::Value) -> Result<T> {
  T::deserialize(raw).map_err(|e| ReportError::data(context, e.to_string()))
}

fn load_map<V: DeserializeOwned>(path: &Path) -> Result<BTreeMap<String, V>> {
  if !path.exists() {
    tracing::debug!(path = %path.display(), "no cache file yet; starting empty");
    return Ok(BTreeMap::new());
  }
  let bytes = std::fs::read(path).map_err(|e| ReportError::io(path, e))?;
  serde_json::from_slice(&bytes)
    .map_err(|e| ReportError::data(path.display().to_string(), e.to_string()))
}
