//! Declarative vertex attribute layout.
//!
//! A layout is an ordered list of attribute kinds. Stride and per-attribute
//! byte offsets are derived from that order; nothing is stored twice.

/// Kind of a per-vertex attribute. All kinds are tightly packed `f32` lanes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VertexAttributeKind {
    /// `[f32; 3]`
    Position,
    /// `[f32; 2]`
    Texture,
    /// `[f32; 3]`
    Normal,
    /// `[f32; 4]`
    Color,
}

impl VertexAttributeKind {
    /// Size in bytes.
    #[inline]
    pub const fn size(self) -> u32 {
        match self {
            Self::Position | Self::Normal => 12,
            Self::Texture => 8,
            Self::Color => 16,
        }
    }

    /// Number of `f32` components.
    #[inline]
    pub const fn component_count(self) -> u32 {
        self.size() / std::mem::size_of::<f32>() as u32
    }
}

/// One resolved attribute: shader location, kind and byte offset in a vertex.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttributeBinding {
    pub location: u32,
    pub kind: VertexAttributeKind,
    pub offset: u32,
}

/// Ordered attribute list plus the running stride.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct VertexLayout {
    kinds: Vec<VertexAttributeKind>,
    stride: u32,
}

impl VertexLayout {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attribute; stride grows by the attribute's size.
    pub fn push(&mut self, kind: VertexAttributeKind) {
        self.kinds.push(kind);
        self.stride += kind.size();
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, kind: VertexAttributeKind) -> Self {
        self.push(kind);
        self
    }

    /// Total byte size of one vertex record.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    #[inline]
    pub fn kinds(&self) -> &[VertexAttributeKind] {
        &self.kinds
    }

    /// Resolves locations and offsets in declaration order.
    ///
    /// Location `i` is the `i`-th declared attribute; its offset is the sum of
    /// the sizes of every attribute declared before it.
    pub fn bindings(&self) -> impl Iterator<Item = AttributeBinding> + '_ {
        self.kinds
            .iter()
            .enumerate()
            .scan(0u32, |offset, (location, &kind)| {
                let binding = AttributeBinding {
                    location: location as u32,
                    kind,
                    offset: *offset,
                };
                *offset += kind.size();
                Some(binding)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use VertexAttributeKind::*;

    #[test]
    fn sizes_match_float_lanes() {
        assert_eq!(Position.size(), 12);
        assert_eq!(Texture.size(), 8);
        assert_eq!(Normal.size(), 12);
        assert_eq!(Color.size(), 16);
        assert_eq!(Color.component_count(), 4);
        assert_eq!(Texture.component_count(), 2);
    }

    #[test]
    fn stride_is_sum_of_sizes() {
        let layout = VertexLayout::new().with(Position).with(Texture);
        assert_eq!(layout.stride(), 20);

        let layout = layout.with(Normal).with(Color);
        assert_eq!(layout.stride(), 48);
        assert_eq!(layout.len(), 4);
    }

    #[test]
    fn offsets_are_running_sums() {
        let layout = VertexLayout::new()
            .with(Position)
            .with(Color)
            .with(Texture)
            .with(Normal);

        let offsets: Vec<(u32, u32)> = layout.bindings().map(|b| (b.location, b.offset)).collect();
        assert_eq!(offsets, vec![(0, 0), (1, 12), (2, 28), (3, 36)]);
    }

    #[test]
    fn empty_layout_has_no_bindings() {
        let layout = VertexLayout::new();
        assert!(layout.is_empty());
        assert_eq!(layout.stride(), 0);
        assert_eq!(layout.bindings().count(), 0);
    }
}
