//! Async action queue around a [`StoreWithMiddleware`].
//!
//! Actions arrive over an unbounded channel and are reduced strictly one at
//! a time: each dispatch finishes, and all of its effects are handled,
//! before the next action is taken off the queue.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::middleware::Middleware;
use crate::store::StoreWithMiddleware;
use crate::Action;

/// Handle given to effect handlers.
///
/// Actions emitted here run right after the current one, ahead of anything
/// still waiting in the channel.
pub struct EffectContext<'a, A> {
    follow_ups: &'a mut VecDeque<A>,
}

impl<A> EffectContext<'_, A> {
    /// Queue a follow-up action.
    pub fn emit(&mut self, action: A) {
        self.follow_ups.push_back(action);
    }
}

/// Drives a store from an action channel until it closes or is cancelled.
pub struct EffectRuntime<S, A: Action, E, M: Middleware<A>> {
    store: StoreWithMiddleware<S, A, E, M>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    cancel: CancellationToken,
}

impl<S, A: Action, E, M: Middleware<A>> EffectRuntime<S, A, E, M> {
    pub fn from_store(store: StoreWithMiddleware<S, A, E, M>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store,
            action_tx,
            action_rx,
            cancel: CancellationToken::new(),
        }
    }

    /// Sender for feeding actions from other tasks.
    ///
    /// The run loop ends once every clone has been dropped.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.action_tx.clone()
    }

    /// Queue an action before (or while) running.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Token that stops the run loop when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn state(&self) -> &Arc<S> {
        self.store.state()
    }

    /// Process actions until the channel closes or the token is cancelled.
    ///
    /// `handle_effect` runs for every effect in emission order.
    /// `on_dispatch` runs once per action with the resulting snapshot and
    /// whether it differs from the previous one. Returns the final snapshot.
    pub async fn run<FE, FD>(self, mut handle_effect: FE, mut on_dispatch: FD) -> Arc<S>
    where
        FE: FnMut(E, &mut EffectContext<'_, A>),
        FD: FnMut(&A, &Arc<S>, bool),
    {
        let Self {
            mut store,
            action_tx,
            mut action_rx,
            cancel,
        } = self;
        // Only external senders keep the loop alive
        drop(action_tx);

        let mut follow_ups = VecDeque::new();
        loop {
            let action = match follow_ups.pop_front() {
                Some(action) => action,
                None => {
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            tracing::debug!("Runtime cancelled");
                            break;
                        }
                        next = action_rx.recv() => match next {
                            Some(action) => action,
                            None => break,
                        },
                    }
                }
            };

            let result = store.dispatch(action.clone());
            let mut ctx = EffectContext {
                follow_ups: &mut follow_ups,
            };
            for effect in result.effects {
                handle_effect(effect, &mut ctx);
            }
            on_dispatch(&action, store.state(), result.changed);
        }

        store.snapshot()
    }
}
