use std::fmt;

use crate::error::{GrafError, Result};

/// The closed set of built-in shapes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Circle,
    Square,
    Cube,
    Pyramid,
    Frustum,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Cube,
        ShapeKind::Pyramid,
        ShapeKind::Frustum,
    ];

    /// Next shape in the viewer's cycle: Cube → Square → Circle → Pyramid → Frustum → Cube.
    pub const fn next(self) -> Self {
        match self {
            ShapeKind::Cube => ShapeKind::Square,
            ShapeKind::Square => ShapeKind::Circle,
            ShapeKind::Circle => ShapeKind::Pyramid,
            ShapeKind::Pyramid => ShapeKind::Frustum,
            ShapeKind::Frustum => ShapeKind::Cube,
        }
    }

    /// Stable integer code, following declaration order.
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Result<Self> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| GrafError::config(format!("unknown shape type code {code}")))
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Cube => "cube",
            ShapeKind::Pyramid => "pyramid",
            ShapeKind::Frustum => "frustum",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_in_declaration_order() {
        for (i, kind) in ShapeKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.code(), i as u32);
            assert_eq!(ShapeKind::from_code(i as u32), Ok(kind));
        }
        assert!(ShapeKind::from_code(5).unwrap_err().is_config());
    }

    #[test]
    fn next_cycles_through_every_kind() {
        let mut kind = ShapeKind::Cube;
        let mut seen = Vec::new();
        for _ in 0..ShapeKind::ALL.len() {
            seen.push(kind);
            kind = kind.next();
        }
        assert_eq!(kind, ShapeKind::Cube);
        assert_eq!(
            seen,
            vec![
                ShapeKind::Cube,
                ShapeKind::Square,
                ShapeKind::Circle,
                ShapeKind::Pyramid,
                ShapeKind::Frustum,
            ]
        );
    }
}
