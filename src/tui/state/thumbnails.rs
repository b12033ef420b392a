use image::DynamicImage;

use crate::tui::widgets::create_protocol;

use super::AppState;

/// Cards on each side of the cursor whose thumbnails are fetched ahead.
const THUMBNAIL_LOOKAHEAD: usize = 2;

impl AppState {
    /// Queue downloads for the card under the cursor, its neighbours and the
    /// open detail image.
    pub fn request_thumbnails(&mut self) {
        let mut wanted: Vec<(i64, String)> = Vec::new();

        if let Some(detail) = &self.detail {
            let filepath = detail.image.as_ref().map(|img| img.filepath.clone()).or_else(|| {
                self.gallery
                    .index_of(detail.image_id)
                    .and_then(|idx| self.gallery.image(idx))
                    .map(|img| img.filepath.clone())
            });
            if let Some(filepath) = filepath {
                wanted.push((detail.image_id, filepath));
            }
        }

        let start = self.selected_index.saturating_sub(THUMBNAIL_LOOKAHEAD);
        let end = self.selected_index + THUMBNAIL_LOOKAHEAD + 1;
        wanted.extend(
            self.gallery
                .images()
                .iter()
                .skip(start)
                .take(end - start)
                .map(|img| (img.no, img.filepath.clone())),
        );

        for (id, filepath) in wanted {
            if !self.thumbnails.is_settled(id) {
                self.worker.queue_thumbnail(id, &filepath);
            }
        }
    }

    pub(super) fn on_thumbnail(&mut self, id: i64, image: Option<DynamicImage>) {
        match image.and_then(create_protocol) {
            Some(protocol) => self.thumbnails.insert(id, protocol),
            None => self.thumbnails.mark_failed(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use crate::tui::worker::{WorkerEvent, WorkerRequest};

    fn thumbnail_ids(requests: &std::sync::mpsc::Receiver<WorkerRequest>) -> Vec<i64> {
        requests
            .try_iter()
            .filter_map(|r| match r {
                WorkerRequest::Thumbnail { id, .. } => Some(id),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_fetches_around_cursor_once() {
        let (mut state, requests, _events) = loaded_app_state(1);
        state.select_index(4);
        state.request_thumbnails();
        assert_eq!(thumbnail_ids(&requests), vec![3, 4, 5, 6, 7]);

        state.request_thumbnails();
        assert!(thumbnail_ids(&requests).is_empty());
    }

    #[test]
    fn test_failed_thumbnail_is_not_retried() {
        let (mut state, requests, events) = loaded_app_state(1);
        state.request_thumbnails();
        assert_eq!(thumbnail_ids(&requests), vec![1, 2, 3]);

        events.send(WorkerEvent::Thumbnail { id: 1, image: None }).unwrap();
        state.poll_worker();
        assert!(state.thumbnails.is_failed(1));

        state.request_thumbnails();
        assert!(thumbnail_ids(&requests).is_empty());
    }
}
