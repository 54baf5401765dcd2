use crate::assets::store::ImageHandle;
use crate::background::resolve::Paint;
use crate::foundation::core::{Affine, Rect, Size};
use crate::layout::arrangement::{Arrangement, BoxShadow, CompositeLayout, LogoAnchor};
use crate::params::store::Snapshot;

/// Root of a composite: the padded box carrying the background paint.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerNode {
    /// Outer box size in CSS pixels.
    pub size: Size,
    /// Applied padding.
    pub padding: f64,
    /// Background paint.
    pub paint: Paint,
    /// Children in paint order.
    pub children: Vec<VisualNode>,
}

/// The framed screenshot element.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageNode {
    /// Source pixels.
    pub image: ImageHandle,
    /// Layout box in outer-box coordinates.
    pub rect: Rect,
    /// Visible part of the source, in source pixels.
    pub source_crop: Rect,
    /// Box-local to outer-box transform (zoom about the center included).
    pub transform: Affine,
    /// Corner radius in box-local pixels.
    pub border_radius: f64,
    /// Shadow, if any.
    pub shadow: Option<BoxShadow>,
}

/// The logo overlay element.
#[derive(Clone, Debug, PartialEq)]
pub struct LogoNode {
    /// Logo pixels.
    pub image: ImageHandle,
    /// Positioned box.
    pub rect: Rect,
    /// Logo pixels inside `rect`.
    pub content: Rect,
    /// CSS offsets that produced `rect`.
    pub anchor: LogoAnchor,
}

/// A child of the container.
#[derive(Clone, Debug, PartialEq)]
pub enum VisualNode {
    /// Screenshot.
    Image(ImageNode),
    /// Logo.
    Logo(LogoNode),
}

/// Geometry summary used to compare two trees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeGeometry {
    /// Outer box size.
    pub outer: Size,
    /// Applied padding.
    pub padding: f64,
    /// Image layout box.
    pub image_box: Rect,
    /// Image corner radius.
    pub border_radius: f64,
    /// Logo box, when present.
    pub logo: Option<Rect>,
}

impl TreeGeometry {
    /// Scale every length by `k` (device pixels at a supersampling factor).
    pub fn scaled(self, k: f64) -> Self {
        let scale_rect = |r: Rect| Rect::new(r.x0 * k, r.y0 * k, r.x1 * k, r.y1 * k);
        Self {
            outer: Size::new(self.outer.width * k, self.outer.height * k),
            padding: self.padding * k,
            image_box: scale_rect(self.image_box),
            border_radius: self.border_radius * k,
            logo: self.logo.map(scale_rect),
        }
    }

    /// Compare within `tol` on every length.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        let near = |a: f64, b: f64| (a - b).abs() <= tol;
        let near_rect = |a: Rect, b: Rect| {
            near(a.x0, b.x0) && near(a.y0, b.y0) && near(a.x1, b.x1) && near(a.y1, b.y1)
        };
        near(self.outer.width, other.outer.width)
            && near(self.outer.height, other.outer.height)
            && near(self.padding, other.padding)
            && near_rect(self.image_box, other.image_box)
            && near(self.border_radius, other.border_radius)
            && match (self.logo, other.logo) {
                (Some(a), Some(b)) => near_rect(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

/// A self-contained visual tree for one composite.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualTree {
    root: ContainerNode,
}

impl VisualTree {
    /// Build the tree for a laid-out composite.
    pub fn build(layout: &CompositeLayout, source: &ImageHandle, logo: Option<&ImageHandle>) -> Self {
        let mut children = Vec::with_capacity(2);
        children.push(VisualNode::Image(ImageNode {
            image: source.clone(),
            rect: layout.image.rect,
            source_crop: layout.image.source_crop,
            transform: layout.image.transform(),
            border_radius: layout.image.border_radius,
            shadow: layout.image.shadow,
        }));
        if let (Some(placed), Some(handle)) = (&layout.logo, logo) {
            children.push(VisualNode::Logo(LogoNode {
                image: handle.clone(),
                rect: placed.rect,
                content: placed.content,
                anchor: placed.anchor,
            }));
        }

        Self {
            root: ContainerNode {
                size: layout.outer,
                padding: layout.padding,
                paint: layout.background.clone(),
                children,
            },
        }
    }

    /// Lay out and build a snapshot; `None` when there is no source image.
    pub fn from_snapshot(snapshot: &Snapshot) -> Option<Self> {
        let source = snapshot.source.as_ref()?;
        match Arrangement::from_snapshot(snapshot) {
            Arrangement::Empty => None,
            Arrangement::Composite(layout) => Some(Self::build(
                &layout,
                source,
                snapshot.params.logo.resource.as_ref(),
            )),
        }
    }

    /// The container node.
    pub fn root(&self) -> &ContainerNode {
        &self.root
    }

    /// Outer box size in CSS pixels.
    pub fn size(&self) -> Size {
        self.root.size
    }

    /// The screenshot element.
    pub fn image_node(&self) -> Option<&ImageNode> {
        self.root.children.iter().find_map(|n| match n {
            VisualNode::Image(i) => Some(i),
            VisualNode::Logo(_) => None,
        })
    }

    /// The logo element.
    pub fn logo_node(&self) -> Option<&LogoNode> {
        self.root.children.iter().find_map(|n| match n {
            VisualNode::Logo(l) => Some(l),
            VisualNode::Image(_) => None,
        })
    }

    /// Geometry summary.
    pub fn geometry(&self) -> TreeGeometry {
        let (image_box, border_radius) = self
            .image_node()
            .map(|i| (i.rect, i.border_radius))
            .unwrap_or((Rect::ZERO, 0.0));
        TreeGeometry {
            outer: self.root.size,
            padding: self.root.padding,
            image_box,
            border_radius,
            logo: self.logo_node().map(|l| l.rect),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/tree.rs"]
mod tests;
