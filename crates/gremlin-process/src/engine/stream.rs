//! `Stream` adapter over a traversal.

use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use futures::Stream;
use gremlin_bytecode::Value;

use super::error::Result;
use super::traversal::Traversal;

/// Lazy stream of traversal values, backed by the same pull primitive as
/// [`Traversal::next`].
///
/// The first poll applies the strategies. An application failure is yielded
/// as an `Err` item; polling again re-applies. Once the traversal is
/// exhausted every poll returns `None`.
pub struct TraversalStream<'a> {
    state: State<'a>,
}

enum State<'a> {
    Ready(&'a mut Traversal),
    Applying(BoxFuture<'a, (&'a mut Traversal, Result<()>)>),
    /// Only observed if a poll panicked mid-transition.
    Poisoned,
}

impl<'a> TraversalStream<'a> {
    pub(crate) fn new(traversal: &'a mut Traversal) -> Self {
        Self {
            state: State::Ready(traversal),
        }
    }
}

impl Stream for TraversalStream<'_> {
    type Item = Result<Value>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match mem::replace(&mut this.state, State::Poisoned) {
                State::Ready(traversal) => {
                    if !traversal.is_applied() {
                        this.state = State::Applying(Box::pin(async move {
                            let result = traversal.apply_strategies().await;
                            (traversal, result)
                        }));
                        continue;
                    }
                    let item = traversal.pull_one();
                    this.state = State::Ready(traversal);
                    return Poll::Ready(item.transpose());
                }
                State::Applying(mut future) => match future.as_mut().poll(cx) {
                    Poll::Pending => {
                        this.state = State::Applying(future);
                        return Poll::Pending;
                    }
                    Poll::Ready((traversal, result)) => {
                        this.state = State::Ready(traversal);
                        if let Err(err) = result {
                            return Poll::Ready(Some(Err(err)));
                        }
                    }
                },
                State::Poisoned => return Poll::Ready(None),
            }
        }
    }
}
