use super::RequestToken;

/// A list request that has been issued but not answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub token: RequestToken,
    pub page: u32,
}

/// Paging position for incremental loading.
///
/// Every transition returns a new value; the gallery swaps it in whole.
/// `page` is the last page applied (0 before the first response of a search).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub has_more: bool,
    pub in_flight: Option<InFlight>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagination {
    pub const fn new() -> Self {
        Self {
            page: 0,
            has_more: true,
            in_flight: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Back to the first page. An outstanding request stays tracked so its
    /// response can still be matched and discarded.
    pub fn reset(self) -> Self {
        Self {
            in_flight: self.in_flight,
            ..Self::new()
        }
    }

    /// Page to request for incremental loading, or `None` while a request is
    /// outstanding or after the last page.
    pub fn next_page(&self) -> Option<u32> {
        if self.is_loading() || !self.has_more {
            None
        } else {
            Some(self.page + 1)
        }
    }

    pub fn start(self, token: RequestToken, page: u32) -> Self {
        Self {
            in_flight: Some(InFlight { token, page }),
            ..self
        }
    }

    /// The page requested under `token`, if that request is the outstanding one.
    pub fn requested_page(&self, token: RequestToken) -> Option<u32> {
        self.in_flight
            .filter(|f| f.token == token)
            .map(|f| f.page)
    }

    pub fn complete(self, page: u32, total_pages: u32) -> Self {
        Self {
            page,
            has_more: page < total_pages,
            in_flight: None,
        }
    }

    /// Stop paging without moving the position.
    pub fn exhausted(self) -> Self {
        Self {
            has_more: false,
            ..self
        }
    }

    pub fn fail(self) -> Self {
        Self {
            in_flight: None,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_pagination_requests_first_page() {
        assert_eq!(Pagination::new().next_page(), Some(1));
    }

    #[test]
    fn in_flight_suppresses_next_page() {
        let p = Pagination::new().start(RequestToken(1), 1);
        assert!(p.is_loading());
        assert_eq!(p.next_page(), None);
    }

    #[test]
    fn has_more_follows_total_pages() {
        let p = Pagination::new().start(RequestToken(1), 1).complete(1, 3);
        assert!(p.has_more);
        assert_eq!(p.next_page(), Some(2));

        let last = p.start(RequestToken(2), 3).complete(3, 3);
        assert!(!last.has_more);
        assert_eq!(last.next_page(), None);
    }

    #[test]
    fn reset_keeps_outstanding_request() {
        let p = Pagination::new()
            .start(RequestToken(1), 1)
            .complete(2, 2)
            .start(RequestToken(7), 3)
            .reset();
        assert_eq!(p.page, 0);
        assert!(p.has_more);
        assert_eq!(p.requested_page(RequestToken(7)), Some(3));
        assert_eq!(p.requested_page(RequestToken(6)), None);
    }

    #[test]
    fn fail_clears_in_flight_only() {
        let p = Pagination::new()
            .start(RequestToken(1), 1)
            .complete(1, 4)
            .start(RequestToken(2), 2)
            .fail();
        assert_eq!(p.page, 1);
        assert!(p.has_more);
        assert_eq!(p.next_page(), Some(2));
    }
}
