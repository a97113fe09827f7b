//! Resize handles on a window frame

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DesktopError;

/// Edge or corner of a window being dragged to resize it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeEdge {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeEdge {
    /// Check if the handle moves the top edge
    #[inline]
    pub fn moves_top(self) -> bool {
        matches!(self, ResizeEdge::N | ResizeEdge::NE | ResizeEdge::NW)
    }

    /// Check if the handle moves the bottom edge
    #[inline]
    pub fn moves_bottom(self) -> bool {
        matches!(self, ResizeEdge::S | ResizeEdge::SE | ResizeEdge::SW)
    }

    /// Check if the handle moves the left edge
    #[inline]
    pub fn moves_left(self) -> bool {
        matches!(self, ResizeEdge::W | ResizeEdge::NW | ResizeEdge::SW)
    }

    /// Check if the handle moves the right edge
    #[inline]
    pub fn moves_right(self) -> bool {
        matches!(self, ResizeEdge::E | ResizeEdge::NE | ResizeEdge::SE)
    }

    /// Check if this is a corner handle
    #[inline]
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            ResizeEdge::NE | ResizeEdge::NW | ResizeEdge::SE | ResizeEdge::SW
        )
    }

    /// Get CSS cursor style for this handle
    pub fn cursor(self) -> &'static str {
        match self {
            ResizeEdge::N | ResizeEdge::S => "ns-resize",
            ResizeEdge::E | ResizeEdge::W => "ew-resize",
            ResizeEdge::NE | ResizeEdge::SW => "nesw-resize",
            ResizeEdge::NW | ResizeEdge::SE => "nwse-resize",
        }
    }
}

impl FromStr for ResizeEdge {
    type Err = DesktopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(ResizeEdge::N),
            "s" => Ok(ResizeEdge::S),
            "e" => Ok(ResizeEdge::E),
            "w" => Ok(ResizeEdge::W),
            "ne" => Ok(ResizeEdge::NE),
            "nw" => Ok(ResizeEdge::NW),
            "se" => Ok(ResizeEdge::SE),
            "sw" => Ok(ResizeEdge::SW),
            _ => Err(DesktopError::InvalidOperation {
                op: "begin_resize",
                reason: "unknown resize edge",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("se".parse::<ResizeEdge>().unwrap(), ResizeEdge::SE);
        assert_eq!("n".parse::<ResizeEdge>().unwrap(), ResizeEdge::N);
        assert!("up".parse::<ResizeEdge>().is_err());
    }

    #[test]
    fn test_edges_moved() {
        assert!(ResizeEdge::NW.moves_top() && ResizeEdge::NW.moves_left());
        assert!(!ResizeEdge::NW.moves_bottom() && !ResizeEdge::NW.moves_right());
        assert!(ResizeEdge::E.moves_right() && !ResizeEdge::E.is_corner());
        assert!(ResizeEdge::SW.is_corner());
    }

    #[test]
    fn test_cursor() {
        assert_eq!(ResizeEdge::S.cursor(), "ns-resize");
        assert_eq!(ResizeEdge::SE.cursor(), "nwse-resize");
        assert_eq!(ResizeEdge::NE.cursor(), "nesw-resize");
    }
}
