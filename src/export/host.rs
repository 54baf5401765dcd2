//! Off-screen attachment point for export trees.

use crate::scene::tree::VisualTree;

/// Identifier of an attached tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// A detached document body that export trees are appended to while they are captured.
///
/// Trees never share a host with the live preview, so on-screen layout cannot leak into a
/// capture. Attachments are removed by dropping the returned [`Attached`] guard, on every path.
#[derive(Debug, Default)]
pub struct OffscreenHost {
    next_id: u64,
    attached: Vec<(NodeId, VisualTree)>,
    attach_count: u64,
}

impl OffscreenHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `tree`; it stays attached until the guard drops.
    pub fn attach(&mut self, tree: VisualTree) -> Attached<'_> {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.attach_count += 1;
        self.attached.push((id, tree));
        tracing::trace!(node = id.0, "attached off-screen tree");
        Attached { host: self, id }
    }

    /// Trees currently attached.
    pub fn attached_len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Attachments made over the host's lifetime.
    pub fn attach_count(&self) -> u64 {
        self.attach_count
    }

    fn detach(&mut self, id: NodeId) {
        self.attached.retain(|(n, _)| *n != id);
        tracing::trace!(node = id.0, "detached off-screen tree");
    }
}

/// RAII attachment of a tree to an [`OffscreenHost`].
#[derive(Debug)]
pub struct Attached<'a> {
    host: &'a mut OffscreenHost,
    id: NodeId,
}

impl Attached<'_> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The attached tree.
    pub fn tree(&self) -> Option<&VisualTree> {
        self.host
            .attached
            .iter()
            .find(|(n, _)| *n == self.id)
            .map(|(_, t)| t)
    }
}

impl Drop for Attached<'_> {
    fn drop(&mut self) {
        self.host.detach(self.id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/host.rs"]
mod tests;
