//! Retained scene of animatable nodes
//!
//! The stage owns every visual the gallery animates: row image cells and
//! titles, the paired preview items, the cover overlay, and the close
//! control. Nodes are created once at startup and never destroyed; open
//! and close gestures only move image nodes between their row wrapper and
//! the paired preview grid. Timelines write node visuals, the UI lays out
//! and paints from them, so the whole scene stays headless-testable.

use crate::row::{PreviewModel, RowModel};

/// Handle to a stage node. Plain index; nodes live as long as the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Axis-aligned rectangle in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 0.0,
        h: 0.0,
    };

    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    pub fn lerp(&self, other: &Rect, t: f32) -> Rect {
        let t = t.clamp(0.0, 1.0);
        Rect {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            w: self.w + (other.w - self.w) * t,
            h: self.h + (other.h - self.h) * t,
        }
    }
}

/// Animatable properties of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub opacity: f32,
    pub scale: f32,
    /// Horizontal offset in percent of the node's own width
    pub x_percent: f32,
    /// Vertical offset in percent of the node's own height
    pub y_percent: f32,
    /// Degrees, clockwise
    pub rotation: f32,
    /// Rotation/flip pivot: 0 = left edge, 1 = right edge
    pub origin_x: f32,
    /// Cover only: viewport-space top edge
    pub top: f32,
    /// Cover only: overlay height
    pub height: f32,
    /// Reflow interpolation: 0 = at the captured rect, 1 = at layout
    pub flip: f32,
}

impl Default for Visual {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            x_percent: 0.0,
            y_percent: 0.0,
            rotation: 0.0,
            origin_x: 0.0,
            top: 0.0,
            height: 0.0,
            flip: 1.0,
        }
    }
}

/// Property selector for tween records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Opacity,
    Scale,
    XPercent,
    YPercent,
    Rotation,
    OriginX,
    Top,
    Height,
    Flip,
}

impl Visual {
    pub fn get(&self, prop: Property) -> f32 {
        match prop {
            Property::Opacity => self.opacity,
            Property::Scale => self.scale,
            Property::XPercent => self.x_percent,
            Property::YPercent => self.y_percent,
            Property::Rotation => self.rotation,
            Property::OriginX => self.origin_x,
            Property::Top => self.top,
            Property::Height => self.height,
            Property::Flip => self.flip,
        }
    }

    pub fn set(&mut self, prop: Property, value: f32) {
        match prop {
            Property::Opacity => self.opacity = value,
            Property::Scale => self.scale = value,
            Property::XPercent => self.x_percent = value,
            Property::YPercent => self.y_percent = value,
            Property::Rotation => self.rotation = value,
            Property::OriginX => self.origin_x = value,
            Property::Top => self.top = value,
            Property::Height => self.height = value,
            Property::Flip => self.flip = value,
        }
    }
}

/// What a node is; image kinds carry the index of the decoded asset they
/// display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    RowImage { row: usize, cell: usize, asset: usize },
    RowTitle { row: usize },
    PreviewImage { row: usize, cell: usize, asset: usize },
    PreviewTitle { row: usize },
    Cover,
    CloseControl,
}

#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub visual: Visual,
    /// Rect the host layout last assigned (UI writes it every frame)
    pub layout: Rect,
    /// Captured pre-move rect for reflow interpolation
    pub flip_from: Rect,
    /// Title mid-flip state toggle
    pub switched: bool,
}

/// Typed stage mutation a timeline step can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageAction {
    SetSwitched { row: usize, on: bool },
    ReturnImagesHome { row: usize },
}

pub struct Stage {
    nodes: Vec<Node>,
    rows: Vec<RowModel>,
    cover: NodeId,
    close_control: NodeId,
    /// Current members of each row's images wrapper, in paint order
    row_wrap: Vec<Vec<NodeId>>,
    /// Current members of each preview item's grid, in paint order
    preview_grid: Vec<Vec<NodeId>>,
    /// Index of the row/preview pair carrying the current markers
    current: Option<usize>,
    /// Row scrolling suppressed while the preview is up
    overflow_hidden: bool,
    /// Cleared when preloading resolves
    loading: bool,
    /// Close control revealed; stays on once shown, only its opacity
    /// animates afterwards (interactivity is gated by the gallery phase)
    close_shown: bool,
    viewport: Rect,
    row_rects: Vec<Rect>,
}

impl Stage {
    /// Build the node graph: one title and `cells_per_row` image cells per
    /// row, a paired preview item with `preview_cells` own images and a
    /// title, plus the shared cover and close control. Assets are numbered
    /// row by row, wrapper cells first.
    pub fn new(labels: &[String], cells_per_row: usize, preview_cells: usize) -> Self {
        let mut nodes = Vec::new();
        let mut rows = Vec::new();
        let mut row_wrap = Vec::new();
        let mut preview_grid = Vec::new();
        let mut asset = 0;

        let mut push = |nodes: &mut Vec<Node>, kind: NodeKind| {
            let id = NodeId(nodes.len());
            nodes.push(Node {
                kind,
                visual: rest_visual(kind),
                layout: Rect::ZERO,
                flip_from: Rect::ZERO,
                switched: false,
            });
            id
        };

        for (row, label) in labels.iter().enumerate() {
            let mut images = Vec::with_capacity(cells_per_row);
            for cell in 0..cells_per_row {
                images.push(push(&mut nodes, NodeKind::RowImage { row, cell, asset }));
                asset += 1;
            }
            let title = push(&mut nodes, NodeKind::RowTitle { row });

            let mut preview_images = Vec::with_capacity(preview_cells);
            for cell in 0..preview_cells {
                preview_images.push(push(&mut nodes, NodeKind::PreviewImage { row, cell, asset }));
                asset += 1;
            }
            let preview_title = push(&mut nodes, NodeKind::PreviewTitle { row });

            row_wrap.push(images.clone());
            preview_grid.push(preview_images.clone());
            rows.push(RowModel {
                index: row,
                label: label.clone(),
                title,
                images,
                preview: PreviewModel {
                    title: preview_title,
                    images: preview_images,
                },
            });
        }

        let cover = push(&mut nodes, NodeKind::Cover);
        let close_control = push(&mut nodes, NodeKind::CloseControl);
        let row_rects = vec![Rect::ZERO; labels.len()];

        Self {
            nodes,
            rows,
            cover,
            close_control,
            row_wrap,
            preview_grid,
            current: None,
            overflow_hidden: false,
            loading: true,
            close_shown: false,
            viewport: Rect::ZERO,
            row_rects,
        }
    }

    /// Total decoded assets the scene expects
    pub fn asset_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| {
                matches!(
                    n.kind,
                    NodeKind::RowImage { .. } | NodeKind::PreviewImage { .. }
                )
            })
            .count()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn value(&self, id: NodeId, prop: Property) -> f32 {
        self.nodes[id.0].visual.get(prop)
    }

    pub fn set_value(&mut self, id: NodeId, prop: Property, value: f32) {
        self.nodes[id.0].visual.set(prop, value);
    }

    pub fn rows(&self) -> &[RowModel] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> &RowModel {
        &self.rows[index]
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn all_titles(&self) -> Vec<NodeId> {
        self.rows.iter().map(|r| r.title).collect()
    }

    pub fn cover(&self) -> NodeId {
        self.cover
    }

    pub fn close_control(&self) -> NodeId {
        self.close_control
    }

    // ----- layout writeback -----

    pub fn set_layout(&mut self, id: NodeId, rect: Rect) {
        self.nodes[id.0].layout = rect;
    }

    pub fn layout(&self, id: NodeId) -> Rect {
        self.nodes[id.0].layout
    }

    /// Rect to paint a node at, honoring any in-flight reflow interpolation
    pub fn draw_rect(&self, id: NodeId) -> Rect {
        let node = &self.nodes[id.0];
        if node.visual.flip >= 1.0 {
            node.layout
        } else {
            node.flip_from.lerp(&node.layout, node.visual.flip)
        }
    }

    pub fn set_viewport(&mut self, rect: Rect) {
        self.viewport = rect;
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_row_rect(&mut self, row: usize, rect: Rect) {
        self.row_rects[row] = rect;
    }

    pub fn row_rect(&self, row: usize) -> Rect {
        self.row_rects[row]
    }

    // ----- markers -----

    /// Mark a row and its paired preview item as current (always as a pair)
    pub fn set_current(&mut self, row: usize) {
        self.current = Some(row);
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn set_overflow_hidden(&mut self, on: bool) {
        self.overflow_hidden = on;
    }

    pub fn overflow_hidden(&self) -> bool {
        self.overflow_hidden
    }

    pub fn set_loading(&mut self, on: bool) {
        self.loading = on;
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn set_close_shown(&mut self) {
        self.close_shown = true;
    }

    pub fn close_shown(&self) -> bool {
        self.close_shown
    }

    pub fn switched(&self, id: NodeId) -> bool {
        self.nodes[id.0].switched
    }

    // ----- containers -----

    pub fn wrap_members(&self, row: usize) -> &[NodeId] {
        &self.row_wrap[row]
    }

    pub fn grid_members(&self, row: usize) -> &[NodeId] {
        &self.preview_grid[row]
    }

    /// Capture each image's current rect, then move the row's image nodes
    /// to the front of the paired preview grid. Returns the moved ids in
    /// row order; their `flip` restarts at 0 against the captured rects.
    pub fn move_images_to_grid(&mut self, row: usize) -> Vec<NodeId> {
        let images = self.rows[row].images.clone();
        debug_assert!(
            images.iter().all(|id| self.row_wrap[row].contains(id)),
            "row {} images moved twice",
            row
        );

        for &id in &images {
            let node = &mut self.nodes[id.0];
            node.flip_from = node.layout;
            node.visual.flip = 0.0;
        }

        self.row_wrap[row].retain(|id| !images.contains(id));
        let mut grid = std::mem::take(&mut self.preview_grid[row]);
        let mut members = images.clone();
        members.append(&mut grid);
        self.preview_grid[row] = members;

        images
    }

    /// Inverse of `move_images_to_grid`: put the row's image nodes back at
    /// the front of its own wrapper.
    pub fn return_images_home(&mut self, row: usize) {
        let images = self.rows[row].images.clone();

        self.preview_grid[row].retain(|id| !images.contains(id));
        let mut wrap = std::mem::take(&mut self.row_wrap[row]);
        let mut members = images.clone();
        members.append(&mut wrap);
        self.row_wrap[row] = members;

        for &id in &images {
            let node = &mut self.nodes[id.0];
            node.visual.flip = 1.0;
            node.flip_from = node.layout;
        }
    }

    pub fn apply(&mut self, action: StageAction) {
        match action {
            StageAction::SetSwitched { row, on } => {
                let title = self.rows[row].title;
                self.nodes[title.0].switched = on;
            }
            StageAction::ReturnImagesHome { row } => {
                self.return_images_home(row);
            }
        }
    }
}

/// Rest pose per node kind. Row images sit hidden and slightly shrunk
/// until a hover reveals them; hover-leave returns them here.
fn rest_visual(kind: NodeKind) -> Visual {
    match kind {
        NodeKind::RowImage { .. } => Visual {
            opacity: 0.0,
            scale: crate::motion::IMAGE_HIDDEN_SCALE,
            ..Visual::default()
        },
        NodeKind::Cover | NodeKind::CloseControl => Visual {
            opacity: 0.0,
            ..Visual::default()
        },
        _ => Visual::default(),
    }
}
