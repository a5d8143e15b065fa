//! Ambient storage for the current scope frame.
//!
//! Each logical execution context sees its own "current frame" pointer:
//! within one thread of synchronous execution that is a thread local, and
//! async tasks carry their chain across `await` points and worker threads
//! through [`ScopedFuture`], which installs the captured chain around every
//! poll. Concurrent tasks never observe each other's chains; a task spawned
//! through [`FutureExt::in_current_scope`] inherits the chain that was
//! current where it was created.

use crate::scope::ScopeFrame;
use pin_project::pin_project;
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

thread_local! {
    static CURRENT_FRAME: RefCell<Option<Arc<ScopeFrame>>> = const { RefCell::new(None) };
}

/// The innermost active frame for the calling context, if any.
pub fn current() -> Option<Arc<ScopeFrame>> {
    CURRENT_FRAME.with(|slot| slot.borrow().clone())
}

/// Swaps the current frame, returning the previous one.
pub(crate) fn replace(next: Option<Arc<ScopeFrame>>) -> Option<Arc<ScopeFrame>> {
    CURRENT_FRAME.with(|slot| std::mem::replace(&mut *slot.borrow_mut(), next))
}

pub(crate) fn set(next: Option<Arc<ScopeFrame>>) {
    let _ = replace(next);
}

/// A future that runs with a captured scope chain installed as the ambient
/// current frame for the duration of every poll.
#[pin_project]
pub struct ScopedFuture<F> {
    #[pin]
    inner: F,
    chain: Option<Arc<ScopeFrame>>,
}

impl<F> Future for ScopedFuture<F>
where
    F: Future,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        let saved = replace(this.chain.take());
        let result = this.inner.poll(cx);
        *this.chain = replace(saved);

        result
    }
}

pub trait FutureExt: Future + Sized {
    /// Runs this future with `chain` as its ambient scope chain.
    fn in_scope(self, chain: Option<Arc<ScopeFrame>>) -> ScopedFuture<Self>;

    /// Runs this future with the chain that is current at the call site,
    /// so a spawned child inherits its creator's open scopes.
    fn in_current_scope(self) -> ScopedFuture<Self> {
        self.in_scope(current())
    }
}

impl<F> FutureExt for F
where
    F: Future,
{
    fn in_scope(self, chain: Option<Arc<ScopeFrame>>) -> ScopedFuture<Self> {
        ScopedFuture { inner: self, chain }
    }
}
