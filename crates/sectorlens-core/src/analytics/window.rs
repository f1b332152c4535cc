use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{AnalyticsError, DateSpan, Dated, TradeDate};

/// Inclusive date window; either bound may be open.
///
/// Construction rejects `start > end`, so every live window is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    start: Option<TradeDate>,
    end: Option<TradeDate>,
}

impl DateWindow {
    pub fn new(start: Option<TradeDate>, end: Option<TradeDate>) -> Result<Self, AnalyticsError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(AnalyticsError::InvalidRange { start, end });
            }
        }
        Ok(Self { start, end })
    }

    pub fn between(start: TradeDate, end: TradeDate) -> Result<Self, AnalyticsError> {
        Self::new(Some(start), Some(end))
    }

    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Builds a window from optional `YYYY-MM-DD` strings.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, AnalyticsError> {
        let start = start.map(TradeDate::parse).transpose()?;
        let end = end.map(TradeDate::parse).transpose()?;
        Self::new(start, end)
    }

    pub const fn start(&self) -> Option<TradeDate> {
        self.start
    }

    pub const fn end(&self) -> Option<TradeDate> {
        self.end
    }

    pub fn contains(&self, date: TradeDate) -> bool {
        self.start.map_or(true, |start| start <= date) && self.end.map_or(true, |end| date <= end)
    }

    /// True when the window and `span` share at least one day.
    pub fn overlaps(&self, span: DateSpan) -> bool {
        self.start.map_or(true, |start| start <= span.last)
            && self.end.map_or(true, |end| span.first <= end)
    }

    /// True when both bounds lie inside `span`. An open bound stands for the
    /// span's own bound.
    pub fn is_fully_within(&self, span: DateSpan) -> bool {
        self.start.map_or(true, |start| span.contains(start))
            && self.end.map_or(true, |end| span.contains(end))
    }

    /// Pulls bounds lying outside `span` back onto it. Open bounds take
    /// the span's own bound; a window disjoint from the span yields `None`.
    pub fn clamp_to(&self, span: DateSpan) -> Option<Self> {
        if !self.overlaps(span) {
            return None;
        }
        let start = self.start.map_or(span.first, |start| start.max(span.first));
        let end = self.end.map_or(span.last, |end| end.min(span.last));
        Some(Self {
            start: Some(start),
            end: Some(end),
        })
    }
}

impl Display for DateWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let bound = |date: Option<TradeDate>| date.map_or_else(|| String::from(".."), |d| d.to_string());
        write!(f, "[{}, {}]", bound(self.start), bound(self.end))
    }
}

/// Contiguous run of `items` whose dates fall inside `window`.
///
/// `items` must be sorted by date. Returns `None` when nothing matches.
pub fn select<'a, T: Dated>(items: &'a [T], window: &DateWindow) -> Option<&'a [T]> {
    let lower = window
        .start
        .map_or(0, |start| items.partition_point(|item| item.date() < start));
    let upper = window
        .end
        .map_or(items.len(), |end| items.partition_point(|item| item.date() <= end));
    (lower < upper).then(|| &items[lower..upper])
}

/// [`select`] with raw bounds; fails fast on an inverted range.
pub fn select_range<T: Dated>(
    items: &[T],
    start: Option<TradeDate>,
    end: Option<TradeDate>,
) -> Result<Option<&[T]>, AnalyticsError> {
    let window = DateWindow::new(start, end)?;
    Ok(select(items, &window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Observation, ValidationError};

    fn date(value: &str) -> TradeDate {
        TradeDate::parse(value).expect("valid date")
    }

    fn points() -> Vec<Observation> {
        ["2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"]
            .iter()
            .enumerate()
            .map(|(index, day)| Observation::new(date(day), index as f64))
            .collect()
    }

    #[test]
    fn inclusive_bounds() {
        let points = points();
        let window = DateWindow::between(date("2024-01-03"), date("2024-01-04")).expect("window");
        let selected = select(&points, &window).expect("non-empty");
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].date, date("2024-01-03"));
        assert_eq!(selected[1].date, date("2024-01-04"));
    }

    #[test]
    fn open_bounds_select_everything() {
        let points = points();
        assert_eq!(select(&points, &DateWindow::unbounded()).map(<[_]>::len), Some(4));
        let tail = DateWindow::new(Some(date("2024-01-04")), None).expect("window");
        assert_eq!(select(&points, &tail).map(<[_]>::len), Some(2));
    }

    #[test]
    fn disjoint_window_is_empty_not_error() {
        let points = points();
        let window = DateWindow::between(date("2021-01-01"), date("2021-01-05")).expect("window");
        assert!(select(&points, &window).is_none());
    }

    #[test]
    fn inverted_range_fails_fast() {
        let err = select_range(&points(), Some(date("2024-01-05")), Some(date("2024-01-02")))
            .expect_err("must fail");
        assert!(matches!(err, AnalyticsError::InvalidRange { .. }));
    }

    #[test]
    fn malformed_bound_is_validation_error() {
        let err = DateWindow::parse(Some("2024/01/05"), None).expect_err("must fail");
        assert!(matches!(
            err,
            AnalyticsError::Validation(ValidationError::InvalidDate { .. })
        ));
    }

    #[test]
    fn overlap_and_containment() {
        let span = DateSpan {
            first: date("2024-01-01"),
            last: date("2024-12-31"),
        };
        let straddling = DateWindow::between(date("2023-06-01"), date("2024-02-01")).expect("window");
        assert!(straddling.overlaps(span));
        assert!(!straddling.is_fully_within(span));

        let inner = DateWindow::between(date("2024-03-01"), date("2024-04-01")).expect("window");
        assert!(inner.is_fully_within(span));
        assert!(DateWindow::unbounded().is_fully_within(span));

        let covering = DateWindow::between(date("2023-01-01"), date("2025-01-01")).expect("window");
        assert!(covering.overlaps(span));

        let before = DateWindow::between(date("2022-01-01"), date("2022-02-01")).expect("window");
        assert!(!before.overlaps(span));
    }

    #[test]
    fn clamp_pulls_bounds_onto_span() {
        let span = DateSpan {
            first: date("2024-01-01"),
            last: date("2024-12-31"),
        };
        let window = DateWindow::new(Some(date("2023-06-01")), None).expect("window");
        let clamped = window.clamp_to(span).expect("overlapping");
        assert_eq!(clamped.start(), Some(date("2024-01-01")));
        assert_eq!(clamped.end(), Some(date("2024-12-31")));

        let disjoint = DateWindow::between(date("2025-02-01"), date("2025-03-01")).expect("window");
        assert_eq!(disjoint.clamp_to(span), None);
    }
}
