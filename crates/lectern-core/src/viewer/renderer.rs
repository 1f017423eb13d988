//! Renderer state machine with a stale-result guard.
//!
//! Lifecycle: `Idle -> Loading -> Ready | Failed`. Changing the locator
//! while a render is in flight must not let the superseded render commit
//! pixels: `begin` bumps a per-request generation and cancels the previous
//! request's token, and `commit` refuses any ticket whose generation is no
//! longer current.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::locator::Locator;
use super::source::{DocumentError, DocumentSource, PageBitmap};
use super::PAGE_SCALE;

/// Viewer surface state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RenderState {
    /// No locator yet.
    #[default]
    Idle,
    /// A render is in flight; no partial bitmap is shown.
    Loading,
    /// The committed surface for the current locator.
    Ready(PageBitmap),
    /// User-facing explanation shown in place of the surface.
    Failed(String),
}

impl RenderState {
    pub fn bitmap(&self) -> Option<&PageBitmap> {
        match self {
            RenderState::Ready(bitmap) => Some(bitmap),
            _ => None,
        }
    }
}

/// Handle identifying one render request.
///
/// Holds the generation to compare at commit time and a cancellation token
/// the load path may observe.
#[derive(Debug, Clone)]
pub struct RenderTicket {
    generation: u64,
    locator: Locator,
    cancel: CancellationToken,
}

impl RenderTicket {
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

/// Drives the document viewing pipeline for one viewer surface.
pub struct DocumentRenderer<S> {
    source: S,
    state: RenderState,
    locator: Option<Locator>,
    generation: u64,
    inflight_cancel: Option<CancellationToken>,
}

impl<S: DocumentSource> DocumentRenderer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: RenderState::Idle,
            locator: None,
            generation: 0,
            inflight_cancel: None,
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn locator(&self) -> Option<&Locator> {
        self.locator.as_ref()
    }

    /// Starts a render for `locator`: transitions to `Loading`, supersedes
    /// (and cancels) any in-flight request, and returns the ticket the
    /// eventual result must present at commit time.
    pub fn begin(&mut self, locator: Locator) -> RenderTicket {
        if let Some(cancel) = self.inflight_cancel.take() {
            cancel.cancel();
        }
        self.generation += 1;
        let cancel = CancellationToken::new();
        self.inflight_cancel = Some(cancel.clone());
        self.locator = Some(locator.clone());
        self.state = RenderState::Loading;
        RenderTicket {
            generation: self.generation,
            locator,
            cancel,
        }
    }

    /// Commits a finished render.
    ///
    /// Returns false (and leaves the surface untouched) when the ticket was
    /// superseded by a later `begin` — only the render for the current
    /// locator is allowed to commit pixels.
    pub fn commit(
        &mut self,
        ticket: &RenderTicket,
        result: Result<PageBitmap, DocumentError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(locator = %ticket.locator, "discarding superseded render");
            return false;
        }
        self.inflight_cancel = None;
        self.state = match result {
            Ok(bitmap) => RenderState::Ready(bitmap),
            Err(e) => RenderState::Failed(e.to_string()),
        };
        true
    }

    /// Tears the surface down: cancels any in-flight render and returns to
    /// `Idle`. A stale ticket can no longer commit afterwards.
    pub fn reset(&mut self) {
        if let Some(cancel) = self.inflight_cancel.take() {
            cancel.cancel();
        }
        self.generation += 1;
        self.locator = None;
        self.state = RenderState::Idle;
    }

    /// Runs one full begin -> load -> commit cycle at the fixed page scale.
    pub async fn render(&mut self, locator: Locator) -> &RenderState {
        let ticket = self.begin(locator);
        let result = self.source.load(ticket.locator(), PAGE_SCALE).await;
        self.commit(&ticket, result);
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use image::RgbaImage;
    use tokio::sync::oneshot;

    use super::*;

    /// Stub source whose per-locator results resolve only when the test
    /// says so.
    #[derive(Default)]
    struct ControlledSource {
        pending: Mutex<HashMap<String, oneshot::Receiver<Result<PageBitmap, DocumentError>>>>,
    }

    impl ControlledSource {
        fn expect(&self, locator: &str) -> oneshot::Sender<Result<PageBitmap, DocumentError>> {
            let (tx, rx) = oneshot::channel();
            self.pending
                .lock()
                .unwrap()
                .insert(locator.to_string(), rx);
            tx
        }
    }

    impl DocumentSource for ControlledSource {
        async fn load(
            &self,
            locator: &Locator,
            _scale: f32,
        ) -> Result<PageBitmap, DocumentError> {
            let rx = self
                .pending
                .lock()
                .unwrap()
                .remove(locator.as_str())
                .expect("unexpected load");
            rx.await.expect("test dropped the sender")
        }
    }

    fn bitmap(width: u32, height: u32) -> PageBitmap {
        PageBitmap::new(RgbaImage::new(width, height))
    }

    #[tokio::test]
    async fn successful_render_commits_ready() {
        let source = ControlledSource::default();
        let tx = source.expect("a.pdf");
        tx.send(Ok(bitmap(10, 20))).unwrap();

        let mut renderer = DocumentRenderer::new(source);
        assert_eq!(*renderer.state(), RenderState::Idle);

        let state = renderer.render(Locator::parse("a.pdf")).await;
        let committed = state.bitmap().unwrap();
        assert_eq!((committed.width(), committed.height()), (10, 20));
    }

    #[tokio::test]
    async fn failure_commits_failed_with_message_and_no_bitmap() {
        let source = ControlledSource::default();
        let tx = source.expect("broken.pdf");
        tx.send(Err(DocumentError::Open("bad xref".to_string())))
            .unwrap();

        let mut renderer = DocumentRenderer::new(source);
        let state = renderer.render(Locator::parse("broken.pdf")).await;

        match state {
            RenderState::Failed(msg) => assert!(msg.contains("bad xref")),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(renderer.state().bitmap().is_none());
    }

    #[tokio::test]
    async fn superseded_render_cannot_commit() {
        let source = ControlledSource::default();
        let tx_a = source.expect("a.pdf");
        let tx_b = source.expect("b.pdf");
        let mut renderer = DocumentRenderer::new(source);

        // Locator changes to B while A is still in flight.
        let ticket_a = renderer.begin(Locator::parse("a.pdf"));
        let ticket_b = renderer.begin(Locator::parse("b.pdf"));
        assert!(ticket_a.cancel_token().is_cancelled());
        assert!(!ticket_b.cancel_token().is_cancelled());

        // A resolves late; its commit must be discarded.
        tx_a.send(Ok(bitmap(1, 1))).unwrap();
        let result_a = renderer.source.load(ticket_a.locator(), PAGE_SCALE).await;
        assert!(!renderer.commit(&ticket_a, result_a));
        assert_eq!(*renderer.state(), RenderState::Loading);

        tx_b.send(Ok(bitmap(2, 2))).unwrap();
        let result_b = renderer.source.load(ticket_b.locator(), PAGE_SCALE).await;
        assert!(renderer.commit(&ticket_b, result_b));
        let committed = renderer.state().bitmap().unwrap();
        assert_eq!((committed.width(), committed.height()), (2, 2));
    }

    #[tokio::test]
    async fn reset_tears_down_and_blocks_stale_commit() {
        let source = ControlledSource::default();
        let _tx = source.expect("a.pdf");
        let mut renderer = DocumentRenderer::new(source);

        let ticket = renderer.begin(Locator::parse("a.pdf"));
        renderer.reset();

        assert!(ticket.cancel_token().is_cancelled());
        assert_eq!(*renderer.state(), RenderState::Idle);
        assert!(renderer.locator().is_none());
        assert!(!renderer.commit(&ticket, Ok(bitmap(1, 1))));
        assert_eq!(*renderer.state(), RenderState::Idle);
    }
}
