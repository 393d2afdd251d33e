//! Injected accessor for the current page identity.
//!
//! The original contract reads the identity from the rendered document on
//! every dispatch, because navigation replaces the document between page
//! loads. Modeling the read as an injected trait keeps that contract (fresh
//! read per message, never cached by the manager) while letting tests
//! substitute a fixed value.

use bluff_core::PageIdentity;

/// Source of the current page's identity.
///
/// Called once per inbound message. Returning `None` means the current view
/// does not participate in dispatch; the message is dropped.
pub trait PageContext: Send + Sync {
    /// The identity the current view declares, if any.
    fn current_page(&self) -> Option<PageIdentity>;
}

/// A page context pinned to one identity for the whole process lifetime.
///
/// This is what a single-view client (and most tests) want: the identity
/// cannot change without a full page load, which tears the process down.
#[derive(Clone, Copy, Debug)]
pub struct FixedPage(pub PageIdentity);

impl PageContext for FixedPage {
    fn current_page(&self) -> Option<PageIdentity> {
        Some(self.0)
    }
}

impl<F> PageContext for F
where
    F: Fn() -> Option<PageIdentity> + Send + Sync,
{
    fn current_page(&self) -> Option<PageIdentity> {
        self()
    }
}
