pub mod filter;
pub mod pager;
pub mod stats;

pub use filter::{
    class_options, query, ClassFilter, DatePeriod, FilteredPage, RecordFilter, StatusFilter,
    PAGE_SIZE,
};
pub use pager::{page_window, PageItem};
pub use stats::{DashboardStats, GenderCounts, StatusCounts};
