use crate::gallery::Query;

use super::AppState;

impl AppState {
    pub fn start_search(&mut self) {
        self.search.start_editing();
    }

    pub fn submit_search(&mut self) {
        let text = self.search.submit();
        self.run_search(text);
    }

    pub fn cancel_search(&mut self) {
        self.search.cancel();
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
        self.run_search(self.search.committed().to_string());
    }

    pub fn cycle_platform(&mut self) {
        self.platform = self.platform.next();
        self.run_search(self.search.committed().to_string());
    }

    /// Re-run the current search from page 1.
    pub fn reload(&mut self) {
        let request = self.gallery.reload();
        self.send_list(request);
    }

    /// Start a fresh search from page 1 with the current sort and platform.
    pub(super) fn run_search(&mut self, text: String) {
        let query = Query::default()
            .with_text(text)
            .with_sort(self.sort)
            .with_platform(self.platform);
        let request = self.gallery.search(query);
        self.send_list(request);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use crate::gallery::{PlatformFilter, SortMode};
    use crate::tui::worker::{WorkerEvent, WorkerRequest};

    #[test]
    fn test_submit_search_requests_page_one() {
        let (mut state, requests, _events) = loaded_app_state(3);
        state.start_search();
        for c in "cat".chars() {
            state.search.input.insert_char(c);
        }
        state.submit_search();

        match drain(&requests).as_slice() {
            [WorkerRequest::List(req)] => {
                assert_eq!(req.page, 1);
                assert_eq!(req.query.text, "cat");
            }
            other => panic!("unexpected requests: {:?}", other),
        }
        assert!(!state.search.editing);
    }

    #[test]
    fn test_cycling_filters_keeps_text() {
        let (mut state, requests, _events) = loaded_app_state(3);
        state.search.input.insert_char('x');
        state.submit_search();
        let first = drain(&requests);
        let token = match first.as_slice() {
            [WorkerRequest::List(req)] => req.token,
            other => panic!("unexpected requests: {:?}", other),
        };
        state.apply_event(WorkerEvent::Listed {
            token,
            result: Ok(page(1..3, 1, 1)),
        });

        state.cycle_sort();
        match drain(&requests).as_slice() {
            [WorkerRequest::List(req)] => {
                assert_eq!(req.query.text, "x");
                assert_eq!(req.query.sort, SortMode::Newest);
                assert_eq!(req.query.platform, PlatformFilter::All);
            }
            other => panic!("unexpected requests: {:?}", other),
        }
    }

    #[test]
    fn test_search_during_load_is_queued_then_issued() {
        let (mut state, requests, _events) = loaded_app_state(3);
        state.move_to_bottom();
        let page_two = match drain(&requests).as_slice() {
            [WorkerRequest::List(req)] => req.token,
            other => panic!("unexpected requests: {:?}", other),
        };

        state.cycle_platform();
        assert!(drain(&requests).is_empty());

        state.apply_event(WorkerEvent::Listed {
            token: page_two,
            result: Ok(page(11..21, 2, 3)),
        });
        // Stale page discarded, queued search goes out
        assert_eq!(state.gallery.images().len(), 10);
        match drain(&requests).as_slice() {
            [WorkerRequest::List(req)] => {
                assert_eq!(req.page, 1);
                assert_eq!(req.query.platform, PlatformFilter::NovelAi);
            }
            other => panic!("unexpected requests: {:?}", other),
        }
    }

    #[test]
    fn test_empty_first_page_stops_paging() {
        let (mut state, requests, _events) = loaded_app_state(3);
        state.search.input.insert_char('z');
        state.submit_search();
        let token = match drain(&requests).as_slice() {
            [WorkerRequest::List(req)] => req.token,
            other => panic!("unexpected requests: {:?}", other),
        };
        state.apply_event(WorkerEvent::Listed {
            token,
            result: Ok(page(0..0, 1, 0)),
        });

        assert!(state.gallery.images().is_empty());
        state.move_to_bottom();
        state.move_down();
        assert!(drain(&requests).is_empty());
    }
}
