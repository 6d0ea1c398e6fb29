//! Request generations.
//!
//! Every load takes a [`Ticket`]. Starting a new load cancels the previous
//! ticket, and renders or patches carrying an old ticket are dropped. The
//! generation check and the write to the target happen under one lock, so a
//! slow earlier load can never overwrite a newer view.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

use crate::target::RenderTarget;

/// Proof that a load is allowed to render, until a newer load starts
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    cancel: CancellationToken,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Resolves once a newer load has started.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.cancel.cancelled()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug)]
struct GuardState {
    generation: u64,
    cancel: CancellationToken,
}

/// Serialises writes to a render target by generation
#[derive(Debug)]
pub struct RenderGuard<T: RenderTarget> {
    target: Arc<T>,
    state: Mutex<GuardState>,
}

impl<T: RenderTarget> RenderGuard<T> {
    pub fn new(target: Arc<T>) -> Self {
        Self {
            target,
            state: Mutex::new(GuardState {
                generation: 0,
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// Start a new generation, cancelling the previous one.
    pub fn begin(&self) -> Ticket {
        let mut state = self.state.lock();
        state.cancel.cancel();
        state.generation += 1;
        state.cancel = CancellationToken::new();

        Ticket {
            generation: state.generation,
            cancel: state.cancel.clone(),
        }
    }

    pub fn current_generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Replace the target's content if `ticket` is still current.
    pub fn render(&self, ticket: &Ticket, markup: &str) -> bool {
        let state = self.state.lock();
        if state.generation != ticket.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = state.generation,
                "Dropping render from superseded load"
            );
            return false;
        }
        self.target.replace(markup);
        true
    }

    /// Patch one node of the target if `ticket` is still current.
    pub fn patch(&self, ticket: &Ticket, node_id: &str, text: &str) -> bool {
        let state = self.state.lock();
        if state.generation != ticket.generation {
            return false;
        }
        self.target.patch(node_id, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::MemoryTarget;

    #[test]
    fn test_begin_cancels_previous_ticket() {
        let guard = RenderGuard::new(Arc::new(MemoryTarget::new()));
        let first = guard.begin();
        let second = guard.begin();

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_eq!(second.generation(), first.generation() + 1);
        assert_eq!(guard.current_generation(), second.generation());
    }

    #[test]
    fn test_stale_ticket_cannot_render() {
        let target = Arc::new(MemoryTarget::new());
        let guard = RenderGuard::new(target.clone());
        let stale = guard.begin();
        let current = guard.begin();

        assert!(guard.render(&current, "<p>new</p>"));
        assert!(!guard.render(&stale, "<p>old</p>"));
        assert_eq!(target.markup(), "<p>new</p>");
    }

    #[test]
    fn test_stale_ticket_cannot_patch() {
        let target = Arc::new(MemoryTarget::new());
        let guard = RenderGuard::new(target.clone());
        let stale = guard.begin();
        guard.render(&stale, r#"<span id="uv-index">--</span>"#);
        let _current = guard.begin();

        assert!(!guard.patch(&stale, "uv-index", "9"));
        assert_eq!(target.markup(), r#"<span id="uv-index">--</span>"#);
    }
}
