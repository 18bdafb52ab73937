//! Row and preview-item handle holders

use crate::stage::NodeId;

/// One gallery row: its title, its image cells, and the paired preview
/// item. Pure handles; all mutation goes through the stage. The image
/// list is fixed at startup and keeps naming the same nodes even while
/// they sit in the preview grid.
#[derive(Debug, Clone)]
pub struct RowModel {
    /// Position index, fixed at startup
    pub index: usize,
    pub label: String,
    pub title: NodeId,
    pub images: Vec<NodeId>,
    pub preview: PreviewModel,
}

/// The preview item paired 1:1 with a row
#[derive(Debug, Clone)]
pub struct PreviewModel {
    pub title: NodeId,
    /// The preview's own images (distinct from the row cells that fly in)
    pub images: Vec<NodeId>,
}
