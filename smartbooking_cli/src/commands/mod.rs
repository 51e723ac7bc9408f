//! CLI subcommand implementations.

pub mod auth;
pub mod departments;
pub mod users;

use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use clap::Args;
use smartbooking_lib::validation::{validate_filter, validate_rows_per_page};
use smartbooking_lib::{
    ListController, ListQuery, LoadStatus, MutationCoordinator, ResourceAccess, Settings,
    SortDirection, DEFAULT_ROWS_PER_PAGE,
};

use crate::output::{OutputFormat, StderrNotifier};

/// Paging, sorting and search flags shared by the list commands.
#[derive(Args, Clone)]
pub struct ListArgs {
    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    pub page: u64,

    /// Rows per page: 5, 10, 25 or 50
    #[arg(long, default_value_t = DEFAULT_ROWS_PER_PAGE)]
    pub page_size: u64,

    /// Field to sort by, using its API name (e.g. lastName, createdAt)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long)]
    pub desc: bool,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,
}

impl ListArgs {
    pub fn to_query(&self) -> Result<ListQuery> {
        let limit = validate_rows_per_page(self.page_size)?;
        if self.page == 0 {
            bail!("--page starts at 1");
        }
        let offset = (self.page - 1)
            .checked_mul(limit)
            .ok_or_else(|| anyhow!("--page {} is out of range", self.page))?;
        let mut query = ListQuery::default().with_page(offset, limit);

        if let Some(field) = &self.sort {
            let direction = if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            query = query.with_sort(field, direction);
        }

        if let Some(search) = &self.search {
            // with_filter resets the offset, so keep the requested page
            let offset = query.offset;
            query = query.with_filter(&validate_filter(search)?);
            query.offset = offset;
        }
        Ok(query)
    }
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_ROWS_PER_PAGE,
            sort: None,
            desc: false,
            search: None,
        }
    }
}

/// One list screen wired to stderr notifications.
pub fn screen<R: ResourceAccess>(resource: R, query: ListQuery, settings: &Settings) -> MutationCoordinator<R> {
    let controller = Arc::new(ListController::with_query(
        Arc::new(resource),
        Arc::new(StderrNotifier),
        query,
    ));
    MutationCoordinator::new(controller).with_utc_offset(settings.utc_offset())
}

/// Prints the current page of a controller, or fails with its last error.
pub fn show_page<R: ResourceAccess>(
    controller: &ListController<R>,
    format: &OutputFormat,
    print: fn(&[R::Item], &OutputFormat),
) -> Result<()> {
    let state = controller.snapshot();
    if state.status == LoadStatus::Failed {
        bail!(
            "could not load {} list: {}",
            controller.resource().label().to_lowercase(),
            state.last_error.unwrap_or_default()
        );
    }

    let limit = state.query.limit.max(1);
    let total_pages = state.result.total_count.div_ceil(limit).max(1);
    eprintln!(
        "Page {}/{} ({} total {}s)",
        state.query.page_index() + 1,
        total_pages,
        state.result.total_count,
        controller.resource().label().to_lowercase()
    );
    print(&state.result.items, format);
    Ok(())
}
