//! Filtering over an in-memory snapshot of the feedback collection.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::{feedback::FeedbackItem, id::IdRef};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Filters as received from a query string. Blank values are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuery {
  pub event_id:     Option<String>,
  /// Exact match against the stored visitor type.
  pub visitor_type: Option<String>,
  /// Inclusive lower bound on `createdAt`.
  pub from:         Option<String>,
  /// Inclusive upper bound on `createdAt`.
  pub to:           Option<String>,
  /// Case-insensitive substring searched in `saran` and `kritik`.
  pub search:       Option<String>,
}

// ─── Normalised filter ───────────────────────────────────────────────────────

/// A [`FeedbackQuery`] with its values parsed. All present constraints must
/// hold for an item to match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackFilter {
  pub event:        Option<IdRef>,
  pub visitor_type: Option<String>,
  pub from:         Option<DateTime<Utc>>,
  pub to:           Option<DateTime<Utc>>,
  /// Already lowercased.
  pub search:       Option<String>,
}

impl From<&FeedbackQuery> for FeedbackFilter {
  fn from(q: &FeedbackQuery) -> Self {
    Self {
      event:        present(&q.event_id).map(IdRef::parse),
      visitor_type: present(&q.visitor_type).map(str::to_owned),
      from:         present(&q.from).and_then(parse_bound),
      to:           present(&q.to).and_then(parse_bound),
      search:       present(&q.search).map(str::to_lowercase),
    }
  }
}

impl FeedbackFilter {
  /// Only restrict by event.
  pub fn for_event(event: IdRef) -> Self {
    Self { event: Some(event), ..Self::default() }
  }

  pub fn matches(&self, item: &FeedbackItem) -> bool {
    if let Some(event) = &self.event
      && !event.matches(item.event_id)
    {
      return false;
    }
    if let Some(vt) = &self.visitor_type
      && item.visitor_type.as_str() != vt
    {
      return false;
    }
    if self.from.is_some_and(|from| item.created_at < from) {
      return false;
    }
    if self.to.is_some_and(|to| item.created_at > to) {
      return false;
    }
    if let Some(q) = &self.search {
      return item.saran.to_lowercase().contains(q.as_str())
        || item.kritik.to_lowercase().contains(q.as_str());
    }
    true
  }

  /// Keep the matching items, in their original order.
  pub fn apply(&self, items: Vec<FeedbackItem>) -> Vec<FeedbackItem> {
    items.into_iter().filter(|i| self.matches(i)).collect()
  }
}

fn present(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Parse a date bound. Anything unparseable is treated as no bound.
///
/// Accepts RFC 3339, a zone-less date-time (taken as UTC), or a bare date
/// (midnight UTC).
fn parse_bound(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.with_timezone(&Utc));
  }
  for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
      return Some(naive.and_utc());
    }
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
  use crate::feedback::{Ratings, VisitorType};

  use super::*;

  fn item(id: u64, event_id: u64, visitor_type: VisitorType, at: &str) -> FeedbackItem {
    FeedbackItem {
      id,
      event_id,
      name: format!("visitor {id}"),
      visitor_type,
      employee_id: String::new(),
      email: format!("v{id}@example.com"),
      ratings: Ratings::new(),
      saran: String::new(),
      kritik: String::new(),
      created_at: at.parse().unwrap(),
    }
  }

  fn sample() -> Vec<FeedbackItem> {
    vec![
      item(1, 1, VisitorType::Internal, "2024-05-01T08:00:00.000Z"),
      item(2, 1, VisitorType::Umum, "2024-05-02T08:00:00.000Z"),
      item(3, 2, VisitorType::Internal, "2024-05-03T08:00:00.000Z"),
      item(4, 2, VisitorType::Umum, "2024-05-04T08:00:00.000Z"),
    ]
  }

  fn ids(items: &[FeedbackItem]) -> Vec<u64> {
    items.iter().map(|i| i.id).collect()
  }

  fn query() -> FeedbackQuery { FeedbackQuery::default() }

  #[test]
  fn empty_query_keeps_everything() {
    let filter = FeedbackFilter::from(&query());
    assert_eq!(ids(&filter.apply(sample())), vec![1, 2, 3, 4]);
  }

  #[test]
  fn blank_values_are_ignored() {
    let q = FeedbackQuery {
      event_id: Some("  ".into()),
      visitor_type: Some(String::new()),
      search: Some(String::new()),
      ..query()
    };
    assert_eq!(FeedbackFilter::from(&q), FeedbackFilter::default());
  }

  #[test]
  fn visitor_type_filter_preserves_order() {
    let q = FeedbackQuery { visitor_type: Some("internal".into()), ..query() };
    assert_eq!(ids(&FeedbackFilter::from(&q).apply(sample())), vec![1, 3]);
  }

  #[test]
  fn event_filter_coerces_numeric_text() {
    let q = FeedbackQuery { event_id: Some("2.0".into()), ..query() };
    assert_eq!(ids(&FeedbackFilter::from(&q).apply(sample())), vec![3, 4]);

    let q = FeedbackQuery { event_id: Some("two".into()), ..query() };
    assert!(FeedbackFilter::from(&q).apply(sample()).is_empty());
  }

  #[test]
  fn date_bounds_are_inclusive() {
    let q = FeedbackQuery {
      from: Some("2024-05-02T08:00:00.000Z".into()),
      to: Some("2024-05-03T08:00:00Z".into()),
      ..query()
    };
    assert_eq!(ids(&FeedbackFilter::from(&q).apply(sample())), vec![2, 3]);
  }

  #[test]
  fn bare_dates_mean_midnight_utc() {
    let q = FeedbackQuery {
      from: Some("2024-05-02".into()),
      to: Some("2024-05-04".into()),
      ..query()
    };
    assert_eq!(ids(&FeedbackFilter::from(&q).apply(sample())), vec![2, 3]);
  }

  #[test]
  fn invalid_dates_impose_no_constraint() {
    let q = FeedbackQuery {
      from: Some("yesterday".into()),
      to: Some("2024-13-45".into()),
      ..query()
    };
    let filter = FeedbackFilter::from(&q);
    assert!(filter.from.is_none() && filter.to.is_none());
    assert_eq!(filter.apply(sample()).len(), 4);
  }

  #[test]
  fn search_is_case_insensitive_over_both_fields() {
    let mut items = sample();
    items[1].kritik = "Late signage".into();
    items[2].saran = "More SIGNAGE near the hall".into();

    for needle in ["signage", "SIGNAGE", "SigNage"] {
      let q = FeedbackQuery { search: Some(needle.into()), ..query() };
      assert_eq!(ids(&FeedbackFilter::from(&q).apply(items.clone())), vec![2, 3]);
    }

    let q = FeedbackQuery { search: Some("catering".into()), ..query() };
    assert!(FeedbackFilter::from(&q).apply(items).is_empty());
  }

  #[test]
  fn filters_combine_conjunctively() {
    let q = FeedbackQuery {
      event_id: Some("1".into()),
      visitor_type: Some("umum".into()),
      ..query()
    };
    assert_eq!(ids(&FeedbackFilter::from(&q).apply(sample())), vec![2]);
  }
}
