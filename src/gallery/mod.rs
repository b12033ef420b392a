//! Gallery view-model: query, paging, loaded cards and selection mode.
//!
//! Nothing here performs I/O. Transitions return the request the caller must
//! issue, tagged with a `RequestToken`; responses are handed back with their
//! token and anything that is no longer the latest request of its kind is
//! dropped.

mod pagination;
mod query;
mod selection;

pub use pagination::{InFlight, Pagination};
pub use query::{PlatformFilter, Query, SortMode};
pub use selection::{Mode, ToggleLabel, ToggleOutcome};

use tracing::{debug, warn};

use crate::api::{ApiError, Image, MessageResponse, PageResponse};

/// Identifies one issued request so late responses can be fenced off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub token: RequestToken,
    pub page: u32,
    pub query: Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRequest {
    pub token: RequestToken,
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchDelete {
    pub token: RequestToken,
    pub ids: Vec<i64>,
}

/// What the grid area shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GridView {
    /// Nothing loaded yet
    #[default]
    Pending,
    Cards,
    /// Page 1 came back empty
    NoResults,
    /// The server has no configuration yet; prompt for settings
    Unconfigured,
    /// A list request failed with nothing loaded to fall back on
    Failed,
}

/// Result of applying a list response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Replaced(usize),
    Appended(usize),
    NoResults,
    Unconfigured,
    /// Logged; the grid keeps its previous content
    Failed(String),
    /// Not the outstanding request, or superseded by a queued search
    Ignored,
}

/// Result of activating a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Toggled { id: i64, selected: bool },
    OpenDetail(DetailRequest),
}

/// Result of applying a batch delete response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted {
        message: String,
        reload: Option<ListRequest>,
    },
    /// Selection is kept so the user can retry
    Failed(String),
    Ignored,
}

/// A card as it should be drawn. `selected` is `None` outside selection mode.
#[derive(Debug, Clone, Copy)]
pub struct CardView<'a> {
    pub image: &'a Image,
    pub selected: Option<bool>,
}

#[derive(Debug, Default)]
pub struct GalleryState {
    query: Query,
    pagination: Pagination,
    images: Vec<Image>,
    view: GridView,
    mode: Mode,
    /// A search arrived while a list request was outstanding
    search_queued: bool,
    latest_detail: Option<RequestToken>,
    pending_delete: Option<RequestToken>,
    last_token: u64,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn is_loading(&self) -> bool {
        self.pagination.is_loading()
    }

    pub fn has_more(&self) -> bool {
        self.pagination.has_more
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn image(&self, index: usize) -> Option<&Image> {
        self.images.get(index)
    }

    pub fn index_of(&self, id: i64) -> Option<usize> {
        self.images.iter().position(|img| img.no == id)
    }

    pub fn view(&self) -> GridView {
        self.view
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_deleting(&self) -> bool {
        self.pending_delete.is_some()
    }

    fn issue(&mut self) -> RequestToken {
        self.last_token += 1;
        RequestToken(self.last_token)
    }

    /// Cards projected from the loaded images and the selection set.
    pub fn cards(&self) -> impl Iterator<Item = CardView<'_>> + '_ {
        let selection = self.mode.selection();
        self.images.iter().map(move |image| CardView {
            image,
            selected: selection.map(|ids| ids.contains(&image.no)),
        })
    }

    pub fn toggle_label(&self) -> ToggleLabel {
        self.mode.toggle_label()
    }

    // ==================== Fetch / paginate ====================

    /// Start over from page 1 with new criteria.
    ///
    /// While a list request is outstanding the search is queued and issued by
    /// `apply_list` once that response arrives.
    pub fn search(&mut self, query: Query) -> Option<ListRequest> {
        self.query = query;
        self.pagination = self.pagination.reset();
        if self.pagination.is_loading() {
            debug!("list request outstanding, queueing search");
            self.search_queued = true;
            return None;
        }
        Some(self.start_list(1))
    }

    /// Re-run the current search from page 1.
    pub fn reload(&mut self) -> Option<ListRequest> {
        self.search(self.query.clone())
    }

    /// Request the next page for incremental loading, if allowed.
    pub fn load_more(&mut self) -> Option<ListRequest> {
        if self.search_queued || self.view == GridView::Unconfigured {
            return None;
        }
        let page = self.pagination.next_page()?;
        Some(self.start_list(page))
    }

    fn start_list(&mut self, page: u32) -> ListRequest {
        let token = self.issue();
        self.pagination = self.pagination.start(token, page);
        ListRequest {
            token,
            page,
            query: self.query.clone(),
        }
    }

    /// Apply a list response. Returns a follow-up request when a queued
    /// search must now be issued.
    pub fn apply_list(
        &mut self,
        token: RequestToken,
        result: Result<PageResponse, ApiError>,
    ) -> (ListOutcome, Option<ListRequest>) {
        let Some(requested) = self.pagination.requested_page(token) else {
            debug!(?token, "dropping stale list response");
            return (ListOutcome::Ignored, None);
        };

        if self.search_queued {
            self.search_queued = false;
            self.pagination = self.pagination.fail();
            return (ListOutcome::Ignored, Some(self.start_list(1)));
        }

        let outcome = match result {
            Ok(response) => self.apply_page(requested, response),
            Err(err) if requested == 1 && err.is_not_found() => {
                warn!(error = %err, "server reports no configuration");
                self.pagination = self.pagination.fail();
                self.view = GridView::Unconfigured;
                ListOutcome::Unconfigured
            }
            Err(err) => {
                warn!(page = requested, error = %err, "failed to fetch images");
                self.pagination = self.pagination.fail();
                if self.images.is_empty() && self.view != GridView::Unconfigured {
                    self.view = GridView::Failed;
                }
                ListOutcome::Failed(err.detail())
            }
        };
        (outcome, None)
    }

    fn apply_page(&mut self, requested: u32, response: PageResponse) -> ListOutcome {
        let count = response.images.len();
        self.pagination = self
            .pagination
            .complete(response.page, response.total_pages);

        if requested == 1 {
            self.images = response.images;
            if self.images.is_empty() {
                self.pagination = self.pagination.exhausted();
                self.view = GridView::NoResults;
                return ListOutcome::NoResults;
            }
            self.view = GridView::Cards;
            ListOutcome::Replaced(count)
        } else {
            self.images.extend(response.images);
            if count == 0 {
                self.pagination = self.pagination.exhausted();
            }
            ListOutcome::Appended(count)
        }
    }

    /// The server reported it is not configured (e.g. 404 on `/api/config`).
    pub fn mark_unconfigured(&mut self) {
        self.view = GridView::Unconfigured;
    }

    // ==================== Detail ====================

    pub fn open_detail(&mut self, id: i64) -> DetailRequest {
        let token = self.issue();
        self.latest_detail = Some(token);
        DetailRequest { token, id }
    }

    /// True when `token` is the most recent detail request. Consumes it.
    pub fn accept_detail(&mut self, token: RequestToken) -> bool {
        if self.latest_detail == Some(token) {
            self.latest_detail = None;
            true
        } else {
            false
        }
    }

    /// Forget any outstanding detail request (the view was closed).
    pub fn cancel_detail(&mut self) {
        self.latest_detail = None;
    }

    // ==================== Selection / delete ====================

    /// Activate the mode-toggle control.
    pub fn toggle_mode(&mut self) -> ToggleOutcome {
        if self.pending_delete.is_some() {
            return ToggleOutcome::Busy;
        }
        let (mode, outcome) = std::mem::take(&mut self.mode).toggle();
        self.mode = mode;
        outcome
    }

    /// Leave selection mode without deleting.
    pub fn exit_selection(&mut self) {
        if self.pending_delete.is_none() {
            self.mode = Mode::Browse;
        }
    }

    /// Activate a card: toggle it while selecting, otherwise open its details.
    pub fn activate(&mut self, id: i64) -> Activation {
        if self.mode.is_selecting() {
            self.mode = std::mem::take(&mut self.mode).toggle_id(id);
            Activation::Toggled {
                id,
                selected: self.mode.is_selected(id),
            }
        } else {
            Activation::OpenDetail(self.open_detail(id))
        }
    }

    /// Start the confirmed batch delete of the current selection.
    pub fn begin_delete(&mut self) -> Option<BatchDelete> {
        if self.pending_delete.is_some() {
            return None;
        }
        let ids: Vec<i64> = self.mode.selection()?.iter().copied().collect();
        if ids.is_empty() {
            return None;
        }
        let token = self.issue();
        self.pending_delete = Some(token);
        Some(BatchDelete { token, ids })
    }

    pub fn apply_delete(
        &mut self,
        token: RequestToken,
        result: Result<MessageResponse, ApiError>,
    ) -> DeleteOutcome {
        if self.pending_delete != Some(token) {
            return DeleteOutcome::Ignored;
        }
        self.pending_delete = None;

        match result {
            Ok(response) => {
                self.mode = Mode::Browse;
                let reload = self.reload();
                DeleteOutcome::Deleted {
                    message: response.message,
                    reload,
                }
            }
            Err(err) => {
                warn!(error = %err, "batch delete failed");
                DeleteOutcome::Failed(err.detail())
            }
        }
    }
}
