mod common;
pub use self::common::{Query, SortDirection};

mod list;
pub use self::list::{ListQuery, DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS};
