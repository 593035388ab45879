//! Visibility and binding state of the shared action modal.

use crate::models::action_target::ActionTarget;
use tokio_util::sync::CancellationToken;

/// Where a pointer event landed relative to the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The dimmed area around the dialog: the modal element itself.
    Backdrop,
    /// Anything inside the dialog box.
    Content,
}

/// The single shared modal.
///
/// Title and destination both derive from the one bound target, so they can
/// never disagree. Each Hidden → Visible transition starts a new lifetime
/// with its own cancellation token; hiding cancels it.
#[derive(Debug)]
pub struct Modal {
    target: Option<ActionTarget>,
    visible: bool,
    lifetime: CancellationToken,
}

impl Default for Modal {
    fn default() -> Self {
        Self::new()
    }
}

impl Modal {
    pub fn new() -> Self {
        let lifetime = CancellationToken::new();
        // hidden from the start: nothing may attach to a lifetime yet
        lifetime.cancel();
        Self {
            target: None,
            visible: false,
            lifetime,
        }
    }

    /// Bind `target` and show the modal. Rebinding while visible keeps the
    /// current lifetime.
    pub fn open(&mut self, target: ActionTarget) {
        self.target = Some(target);
        if !self.visible {
            self.visible = true;
            self.lifetime = CancellationToken::new();
        }
    }

    /// Hide the modal. Returns `false` when it was already hidden.
    pub fn hide(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        self.visible = false;
        self.lifetime.cancel();
        true
    }

    /// Hide only when the pointer landed on the backdrop itself.
    pub fn pointer_down(&mut self, at: PointerTarget) -> bool {
        match at {
            PointerTarget::Backdrop => self.hide(),
            PointerTarget::Content => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn target(&self) -> Option<ActionTarget> {
        self.target
    }

    pub fn title(&self) -> &'static str {
        self.target.map(|t| t.title()).unwrap_or("")
    }

    pub fn destination(&self) -> Option<&'static str> {
        self.target.map(|t| t.endpoint())
    }

    /// Token cancelled when the current visible lifetime ends.
    pub fn lifetime(&self) -> CancellationToken {
        self.lifetime.clone()
    }
}
