//! 面、棱边与对齐方向
//!
//! `Face` 是位标志集合，单个面可以用 `|` 组合成棱边（`Edge`）。

use crate::error::CsgError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// 轴对齐方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Alignment {
    X,
    Y,
    #[default]
    Z,
    NegX,
    NegY,
    NegZ,
}

impl Alignment {
    /// 轴索引（0=X, 1=Y, 2=Z），正负方向相同
    pub fn axis_index(&self) -> usize {
        match self {
            Alignment::X | Alignment::NegX => 0,
            Alignment::Y | Alignment::NegY => 1,
            Alignment::Z | Alignment::NegZ => 2,
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Alignment::NegX | Alignment::NegY | Alignment::NegZ)
    }
}

/// 轴对齐面的位标志
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Face(u8);

impl Face {
    pub const LEFT: Face = Face(0x01);
    pub const RIGHT: Face = Face(0x02);
    pub const FRONT: Face = Face(0x04);
    pub const BACK: Face = Face(0x08);
    pub const BOTTOM: Face = Face(0x10);
    pub const TOP: Face = Face(0x20);

    /// 六个单面，按标志位顺序
    pub const ALL: [Face; 6] = [
        Face::LEFT,
        Face::RIGHT,
        Face::FRONT,
        Face::BACK,
        Face::BOTTOM,
        Face::TOP,
    ];

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn contains(&self, other: Face) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    /// 是否恰好是六个单面之一
    pub fn is_single(&self) -> bool {
        Self::ALL.contains(self)
    }

    /// 对面
    pub fn opposite(self) -> Result<Face, CsgError> {
        match self {
            Face::LEFT => Ok(Face::RIGHT),
            Face::RIGHT => Ok(Face::LEFT),
            Face::FRONT => Ok(Face::BACK),
            Face::BACK => Ok(Face::FRONT),
            Face::BOTTOM => Ok(Face::TOP),
            Face::TOP => Ok(Face::BOTTOM),
            other => Err(CsgError::UnsupportedFace(other.0)),
        }
    }

    fn label(&self) -> Option<&'static str> {
        match *self {
            Face::LEFT => Some("Left"),
            Face::RIGHT => Some("Right"),
            Face::FRONT => Some("Front"),
            Face::BACK => Some("Back"),
            Face::BOTTOM => Some("Bottom"),
            Face::TOP => Some("Top"),
            _ => None,
        }
    }
}

/// 获取单面的对面，组合面或空值返回 `UnsupportedFace`
pub fn get_opposite(face: Face) -> Result<Face, CsgError> {
    face.opposite()
}

impl BitOr for Face {
    type Output = Face;

    fn bitor(self, rhs: Self) -> Self::Output {
        Face(self.0 | rhs.0)
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = self.label() {
            return write!(f, "Face::{label}");
        }
        let names: Vec<&str> = Self::ALL
            .iter()
            .filter(|face| self.contains(**face))
            .filter_map(|face| face.label())
            .collect();
        write!(f, "Face({:#04x} = {})", self.0, names.join(" | "))
    }
}

/// 棱边：两个相邻面的组合
pub struct Edge;

impl Edge {
    pub const LEFT_FRONT: Face = Face(Face::LEFT.0 | Face::FRONT.0);
    pub const LEFT_BACK: Face = Face(Face::LEFT.0 | Face::BACK.0);
    pub const LEFT_BOTTOM: Face = Face(Face::LEFT.0 | Face::BOTTOM.0);
    pub const LEFT_TOP: Face = Face(Face::LEFT.0 | Face::TOP.0);
    pub const RIGHT_FRONT: Face = Face(Face::RIGHT.0 | Face::FRONT.0);
    pub const RIGHT_BACK: Face = Face(Face::RIGHT.0 | Face::BACK.0);
    pub const RIGHT_BOTTOM: Face = Face(Face::RIGHT.0 | Face::BOTTOM.0);
    pub const RIGHT_TOP: Face = Face(Face::RIGHT.0 | Face::TOP.0);
    pub const FRONT_BOTTOM: Face = Face(Face::FRONT.0 | Face::BOTTOM.0);
    pub const FRONT_TOP: Face = Face(Face::FRONT.0 | Face::TOP.0);
    pub const BACK_BOTTOM: Face = Face(Face::BACK.0 | Face::BOTTOM.0);
    pub const BACK_TOP: Face = Face(Face::BACK.0 | Face::TOP.0);

    pub const ALL: [Face; 12] = [
        Self::LEFT_FRONT,
        Self::LEFT_BACK,
        Self::LEFT_BOTTOM,
        Self::LEFT_TOP,
        Self::RIGHT_FRONT,
        Self::RIGHT_BACK,
        Self::RIGHT_BOTTOM,
        Self::RIGHT_TOP,
        Self::FRONT_BOTTOM,
        Self::FRONT_TOP,
        Self::BACK_BOTTOM,
        Self::BACK_TOP,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_pairs() {
        assert_eq!(Face::LEFT.opposite(), Ok(Face::RIGHT));
        assert_eq!(Face::FRONT.opposite(), Ok(Face::BACK));
        assert_eq!(Face::TOP.opposite(), Ok(Face::BOTTOM));
    }

    #[test]
    fn test_opposite_is_involution() {
        for face in Face::ALL {
            let back = get_opposite(get_opposite(face).unwrap()).unwrap();
            assert_eq!(back, face);
            assert_ne!(get_opposite(face).unwrap(), face);
        }
    }

    #[test]
    fn test_opposite_rejects_non_single_faces() {
        for edge in Edge::ALL {
            assert!(!edge.is_single());
            assert_eq!(edge.opposite(), Err(CsgError::UnsupportedFace(edge.bits())));
        }
        assert!(Face::default().opposite().is_err());
        assert!(Face::from_bits(0x40).opposite().is_err());
    }

    #[test]
    fn test_edge_composition() {
        assert_eq!(Face::LEFT | Face::TOP, Edge::LEFT_TOP);
        assert!(Edge::RIGHT_BACK.contains(Face::BACK));
        assert!(!Edge::RIGHT_BACK.contains(Face::LEFT));
        assert_eq!(format!("{:?}", Face::TOP), "Face::Top");
        assert_eq!(format!("{:?}", Edge::LEFT_TOP), "Face(0x21 = Left | Top)");
    }

    #[test]
    fn test_alignment_axis() {
        assert_eq!(Alignment::NegY.axis_index(), 1);
        assert!(Alignment::NegZ.is_negative());
        assert_eq!(Alignment::default(), Alignment::Z);
    }
}
