//! Window portal binding
//!
//! Window content sometimes needs to escape its natural position in the
//! render tree (menus, dialogs, tooltips). The desktop hands every window a
//! [`PortalTarget`]: either a container to render such content into, or
//! [`PortalTarget::InPlace`] when no container exists.

/// Where floating window content should be rendered
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PortalTarget<C> {
    /// Render into this container
    Container(C),
    /// No container available; render in the natural position
    InPlace,
}

impl<C> Default for PortalTarget<C> {
    fn default() -> Self {
        PortalTarget::InPlace
    }
}

impl<C> PortalTarget<C> {
    /// Build a target from an optional container
    pub fn from_option(container: Option<C>) -> Self {
        match container {
            Some(c) => PortalTarget::Container(c),
            None => PortalTarget::InPlace,
        }
    }

    /// The container, if any
    #[inline]
    pub fn container(&self) -> Option<&C> {
        match self {
            PortalTarget::Container(c) => Some(c),
            PortalTarget::InPlace => None,
        }
    }

    /// Check if content renders in place
    #[inline]
    pub fn is_in_place(&self) -> bool {
        matches!(self, PortalTarget::InPlace)
    }

    /// Borrow the container
    pub fn as_ref(&self) -> PortalTarget<&C> {
        match self {
            PortalTarget::Container(c) => PortalTarget::Container(c),
            PortalTarget::InPlace => PortalTarget::InPlace,
        }
    }
}
