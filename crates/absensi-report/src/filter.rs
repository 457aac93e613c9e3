use std::collections::BTreeSet;

use chrono::{Days, Months, NaiveDate};
use serde::Serialize;

use absensi_core::error::CoreError;
use absensi_core::model::{AttendanceRecord, AttendanceStatus};

/// Records shown per page in the record table.
pub const PAGE_SIZE: usize = 20;

/// Restrict to one status, or keep all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AttendanceStatus),
}

impl std::str::FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            Ok(StatusFilter::Only(s.parse()?))
        }
    }
}

/// Restrict to one class, or keep all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClassFilter {
    #[default]
    All,
    Only(String),
}

impl std::str::FromStr for ClassFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            Ok(ClassFilter::All)
        } else {
            Ok(ClassFilter::Only(s.to_string()))
        }
    }
}

/// Keep records no older than the period, measured back from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePeriod {
    #[default]
    All,
    Week,
    Month,
}

impl std::str::FromStr for DatePeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(DatePeriod::All),
            "week" => Ok(DatePeriod::Week),
            "month" => Ok(DatePeriod::Month),
            other => Err(CoreError::Parse(format!("unknown period: {other}"))),
        }
    }
}

/// The combined status/class/period/page selection applied to the record
/// set. Changing any selector resets the page to 1: the result set the old
/// page number indexed into no longer applies.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFilter {
    status: StatusFilter,
    class: ClassFilter,
    period: DatePeriod,
    page: u32,
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            class: ClassFilter::All,
            period: DatePeriod::All,
            page: 1,
        }
    }
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self.page = 1;
        self
    }

    pub fn with_class(mut self, class: ClassFilter) -> Self {
        self.class = class;
        self.page = 1;
        self
    }

    pub fn with_period(mut self, period: DatePeriod) -> Self {
        self.period = period;
        self.page = 1;
        self
    }

    /// Request a page of the current result set. Apply after the selectors:
    /// every selector change resets the page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }
}

/// One page of filtered records plus the totals the pager needs.
#[derive(Debug, Serialize)]
pub struct FilteredPage<'a> {
    /// Records on the returned page, input order preserved.
    pub records: Vec<&'a AttendanceRecord>,
    /// How many records survived the filters, across all pages.
    #[serde(rename = "totalFiltered")]
    pub total_filtered: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    /// The page actually returned: out-of-range requests clamp to the last
    /// available page, 1 when the filtered set is empty.
    pub page: u32,
    /// 1-based position of the first returned record within the filtered
    /// set, for continuous row numbering across pages.
    #[serde(rename = "startIndex")]
    pub start_index: usize,
}

/// Apply the combined selection: status, then class, then period, then
/// pagination. Pure; the record set is never reordered or mutated.
pub fn query<'a>(
    records: &'a [AttendanceRecord],
    filter: &RecordFilter,
    today: NaiveDate,
) -> FilteredPage<'a> {
    let cutoff = period_cutoff(filter.period, today);
    let filtered: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| match filter.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => r.status == status,
        })
        .filter(|r| match &filter.class {
            ClassFilter::All => true,
            ClassFilter::Only(class) => r.class == *class,
        })
        .filter(|r| match cutoff {
            None => true,
            Some(cutoff) => r.date >= cutoff,
        })
        .collect();

    let total_filtered = filtered.len();
    let total_pages = total_filtered.div_ceil(PAGE_SIZE) as u32;
    let page = filter.page.clamp(1, total_pages.max(1));
    let start = (page as usize - 1) * PAGE_SIZE;

    FilteredPage {
        records: filtered.into_iter().skip(start).take(PAGE_SIZE).collect(),
        total_filtered,
        total_pages,
        page,
        start_index: start + 1,
    }
}

/// Week looks back 7 days, month one calendar month. Records dated on or
/// after the cutoff are kept.
fn period_cutoff(period: DatePeriod, today: NaiveDate) -> Option<NaiveDate> {
    match period {
        DatePeriod::All => None,
        DatePeriod::Week => today.checked_sub_days(Days::new(7)),
        DatePeriod::Month => today.checked_sub_months(Months::new(1)),
    }
}

/// Distinct class values across the record set, sorted. Feeds the class
/// selector's option list.
pub fn class_options(records: &[AttendanceRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.class.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use absensi_core::model::{Coordinates, Gender, Identity, RecordDraft};

    fn record(name: &str, class: &str, status: AttendanceStatus, date: NaiveDate) -> AttendanceRecord {
        let identity = Identity {
            name: name.into(),
            class: class.into(),
            gender: Gender::Putra,
        };
        let draft = RecordDraft::compose(
            &identity,
            status,
            Coordinates::FALLBACK,
            date.and_hms_opt(7, 30, 0).unwrap(),
        );
        AttendanceRecord::from_draft(name.into(), &draft)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn mixed_records() -> Vec<AttendanceRecord> {
        vec![
            record("A", "10A", AttendanceStatus::Hadir, day(11)),
            record("B", "10A", AttendanceStatus::Izin, day(11)),
            record("C", "10B", AttendanceStatus::Hadir, day(12)),
            record("D", "10A", AttendanceStatus::Hadir, day(12)),
            record("E", "10B", AttendanceStatus::Alpha, day(12)),
        ]
    }

    fn ids(page: &FilteredPage<'_>) -> Vec<String> {
        page.records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_independent_filters_commute() {
        let records = mixed_records();
        let status_then_class = RecordFilter::new()
            .with_status(StatusFilter::Only(AttendanceStatus::Hadir))
            .with_class(ClassFilter::Only("10A".into()));
        let class_then_status = RecordFilter::new()
            .with_class(ClassFilter::Only("10A".into()))
            .with_status(StatusFilter::Only(AttendanceStatus::Hadir));

        let a = query(&records, &status_then_class, day(12));
        let b = query(&records, &class_then_status, day(12));
        assert_eq!(ids(&a), ids(&b));
        assert_eq!(ids(&a), vec!["A", "D"]);
    }

    #[test]
    fn test_period_cutoff_is_inclusive() {
        let records = vec![
            record("old", "10A", AttendanceStatus::Hadir, day(1)),
            record("edge", "10A", AttendanceStatus::Hadir, day(5)),
            record("new", "10A", AttendanceStatus::Hadir, day(12)),
        ];
        // Week back from the 12th cuts at the 5th; the edge record stays.
        let week = query(
            &records,
            &RecordFilter::new().with_period(DatePeriod::Week),
            day(12),
        );
        assert_eq!(ids(&week), vec!["edge", "new"]);

        let month = query(
            &records,
            &RecordFilter::new().with_period(DatePeriod::Month),
            day(12),
        );
        assert_eq!(month.total_filtered, 3);
    }

    #[test]
    fn test_period_is_evaluated_against_injected_today() {
        let records = vec![record("A", "10A", AttendanceStatus::Hadir, day(5))];
        let filter = RecordFilter::new().with_period(DatePeriod::Week);
        assert_eq!(query(&records, &filter, day(10)).total_filtered, 1);
        // A month later the same filter sees an empty week.
        let later = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        assert_eq!(query(&records, &filter, later).total_filtered, 0);
    }

    #[test]
    fn test_pagination_splits_45_records_into_3_pages() {
        let records: Vec<AttendanceRecord> = (0..45)
            .map(|i| record(&format!("S{i:02}"), "10A", AttendanceStatus::Hadir, day(11)))
            .collect();

        let page1 = query(&records, &RecordFilter::new(), day(11));
        assert_eq!(page1.total_filtered, 45);
        assert_eq!(page1.total_pages, 3);
        assert_eq!(page1.records.len(), 20);
        assert_eq!(page1.start_index, 1);

        let page3 = query(&records, &RecordFilter::new().with_page(3), day(11));
        assert_eq!(page3.records.len(), 5);
        assert_eq!(page3.start_index, 41);
        assert_eq!(page3.records[0].name, "S40");

        // Out of range clamps to the last page.
        let page4 = query(&records, &RecordFilter::new().with_page(4), day(11));
        assert_eq!(page4.page, 3);
        assert_eq!(ids(&page4), ids(&page3));
    }

    #[test]
    fn test_empty_result_set_clamps_to_page_one() {
        let page = query(&[], &RecordFilter::new().with_page(7), day(11));
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_selector_change_resets_page() {
        let filter = RecordFilter::new()
            .with_page(3)
            .with_status(StatusFilter::Only(AttendanceStatus::Izin));
        assert_eq!(filter.page(), 1);

        let filter = RecordFilter::new()
            .with_status(StatusFilter::Only(AttendanceStatus::Izin))
            .with_page(3);
        assert_eq!(filter.page(), 3);
    }

    #[test]
    fn test_page_preserves_input_order() {
        let records = mixed_records();
        let all = query(&records, &RecordFilter::new(), day(12));
        assert_eq!(ids(&all), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_class_options_sorted_distinct() {
        let records = mixed_records();
        assert_eq!(class_options(&records), vec!["10A", "10B"]);
        assert!(class_options(&[]).is_empty());
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "izin".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(AttendanceStatus::Izin)
        );
        assert!("bolos".parse::<StatusFilter>().is_err());
        assert_eq!(
            "10A".parse::<ClassFilter>().unwrap(),
            ClassFilter::Only("10A".into())
        );
        assert_eq!("week".parse::<DatePeriod>().unwrap(), DatePeriod::Week);
        assert!("year".parse::<DatePeriod>().is_err());
    }
}
