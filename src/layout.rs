//! # Coordinate Model
//!
//! Positions of the six draggable elements, three per canvas face.
//!
//! | Element | Face | Default |
//! |---------|------|---------|
//! | `header-top` / `header-bottom` | front / back | (20, 24) |
//! | `logo-top` / `logo-bottom` | front / back | (310, 20) |
//! | `footer-top` / `footer-bottom` | front / back | (100, 350) |
//!
//! Offsets are integer pixels from the top-left corner of the element's own
//! canvas. They are never clamped: a drag may push an element to a negative
//! offset or past the canvas edge.
//!
//! The key set is closed. [`ElementPositions`] stores one field per element,
//! so no key can be added or removed, and deserialisation rejects unknown keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A point in canvas (or pointer) pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Difference between two positions. Arithmetic saturates at the `i32` bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Sub for Position {
    type Output = Offset;

    fn sub(self, rhs: Position) -> Offset {
        Offset {
            dx: self.x.saturating_sub(rhs.x),
            dy: self.y.saturating_sub(rhs.y),
        }
    }
}

impl Sub<Offset> for Position {
    type Output = Position;

    fn sub(self, rhs: Offset) -> Position {
        Position::new(self.x.saturating_sub(rhs.dx), self.y.saturating_sub(rhs.dy))
    }
}

impl Add<Offset> for Position {
    type Output = Position;

    fn add(self, rhs: Offset) -> Position {
        Position::new(self.x.saturating_add(rhs.dx), self.y.saturating_add(rhs.dy))
    }
}

/// One rendered side of the flyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
}

impl Face {
    pub const ALL: [Face; 2] = [Face::Front, Face::Back];

    pub fn as_str(self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
        }
    }

    /// The three draggable elements living on this face.
    pub fn elements(self) -> [ElementId; 3] {
        Slot::ALL.map(|slot| ElementId::new(self, slot))
    }
}

impl FromStr for Face {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "front" => Ok(Face::Front),
            "back" => Ok(Face::Back),
            _ => Err(format!("Unknown face '{}'", s)),
        }
    }
}

/// Which block an element renders, independent of face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Header,
    Logo,
    Footer,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Header, Slot::Logo, Slot::Footer];
}

/// Identifier of a draggable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementId {
    HeaderTop,
    LogoTop,
    FooterTop,
    HeaderBottom,
    LogoBottom,
    FooterBottom,
}

impl ElementId {
    pub const ALL: [ElementId; 6] = [
        ElementId::HeaderTop,
        ElementId::LogoTop,
        ElementId::FooterTop,
        ElementId::HeaderBottom,
        ElementId::LogoBottom,
        ElementId::FooterBottom,
    ];

    pub fn new(face: Face, slot: Slot) -> Self {
        match (face, slot) {
            (Face::Front, Slot::Header) => ElementId::HeaderTop,
            (Face::Front, Slot::Logo) => ElementId::LogoTop,
            (Face::Front, Slot::Footer) => ElementId::FooterTop,
            (Face::Back, Slot::Header) => ElementId::HeaderBottom,
            (Face::Back, Slot::Logo) => ElementId::LogoBottom,
            (Face::Back, Slot::Footer) => ElementId::FooterBottom,
        }
    }

    /// `-top` elements belong to the front, `-bottom` to the back.
    pub fn face(self) -> Face {
        match self {
            ElementId::HeaderTop | ElementId::LogoTop | ElementId::FooterTop => Face::Front,
            _ => Face::Back,
        }
    }

    pub fn slot(self) -> Slot {
        match self {
            ElementId::HeaderTop | ElementId::HeaderBottom => Slot::Header,
            ElementId::LogoTop | ElementId::LogoBottom => Slot::Logo,
            ElementId::FooterTop | ElementId::FooterBottom => Slot::Footer,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementId::HeaderTop => "header-top",
            ElementId::LogoTop => "logo-top",
            ElementId::FooterTop => "footer-top",
            ElementId::HeaderBottom => "header-bottom",
            ElementId::LogoBottom => "logo-bottom",
            ElementId::FooterBottom => "footer-bottom",
        }
    }

    /// Hardcoded position restored by a reset.
    pub fn default_position(self) -> Position {
        match self.slot() {
            Slot::Header => Position::new(20, 24),
            Slot::Logo => Position::new(310, 20),
            Slot::Footer => Position::new(100, 350),
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("Unknown element '{}'", s))
    }
}

/// Position of every draggable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementPositions {
    #[serde(rename = "header-top")]
    header_top: Position,
    #[serde(rename = "logo-top")]
    logo_top: Position,
    #[serde(rename = "footer-top")]
    footer_top: Position,
    #[serde(rename = "header-bottom")]
    header_bottom: Position,
    #[serde(rename = "logo-bottom")]
    logo_bottom: Position,
    #[serde(rename = "footer-bottom")]
    footer_bottom: Position,
}

impl Default for ElementPositions {
    fn default() -> Self {
        Self {
            header_top: ElementId::HeaderTop.default_position(),
            logo_top: ElementId::LogoTop.default_position(),
            footer_top: ElementId::FooterTop.default_position(),
            header_bottom: ElementId::HeaderBottom.default_position(),
            logo_bottom: ElementId::LogoBottom.default_position(),
            footer_bottom: ElementId::FooterBottom.default_position(),
        }
    }
}

impl ElementPositions {
    pub fn get(&self, id: ElementId) -> Position {
        *self.slot_ref(id)
    }

    pub fn set(&mut self, id: ElementId, position: Position) {
        *self.slot_mut(id) = position;
    }

    /// Restore the hardcoded defaults for all six elements.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, Position)> + '_ {
        ElementId::ALL.into_iter().map(|id| (id, self.get(id)))
    }

    fn slot_ref(&self, id: ElementId) -> &Position {
        match id {
            ElementId::HeaderTop => &self.header_top,
            ElementId::LogoTop => &self.logo_top,
            ElementId::FooterTop => &self.footer_top,
            ElementId::HeaderBottom => &self.header_bottom,
            ElementId::LogoBottom => &self.logo_bottom,
            ElementId::FooterBottom => &self.footer_bottom,
        }
    }

    fn slot_mut(&mut self, id: ElementId) -> &mut Position {
        match id {
            ElementId::HeaderTop => &mut self.header_top,
            ElementId::LogoTop => &mut self.logo_top,
            ElementId::FooterTop => &mut self.footer_top,
            ElementId::HeaderBottom => &mut self.header_bottom,
            ElementId::LogoBottom => &mut self.logo_bottom,
            ElementId::FooterBottom => &mut self.footer_bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_documented_values() {
        let positions = ElementPositions::default();
        assert_eq!(positions.get(ElementId::HeaderTop), Position::new(20, 24));
        assert_eq!(positions.get(ElementId::HeaderBottom), Position::new(20, 24));
        assert_eq!(positions.get(ElementId::LogoTop), Position::new(310, 20));
        assert_eq!(positions.get(ElementId::LogoBottom), Position::new(310, 20));
        assert_eq!(positions.get(ElementId::FooterTop), Position::new(100, 350));
        assert_eq!(positions.get(ElementId::FooterBottom), Position::new(100, 350));
    }

    #[test]
    fn test_reset_restores_every_element() {
        let mut positions = ElementPositions::default();
        for (i, id) in ElementId::ALL.into_iter().enumerate() {
            positions.set(id, Position::new(-5 * i as i32, 999));
        }
        positions.reset();
        assert_eq!(positions, ElementPositions::default());
    }

    #[test]
    fn test_set_accepts_out_of_bounds() {
        let mut positions = ElementPositions::default();
        positions.set(ElementId::LogoTop, Position::new(-40, 1200));
        assert_eq!(positions.get(ElementId::LogoTop), Position::new(-40, 1200));
        // Other elements untouched
        assert_eq!(positions.get(ElementId::LogoBottom), Position::new(310, 20));
    }

    #[test]
    fn test_serializes_exactly_six_keys() {
        let value = serde_json::to_value(ElementPositions::default()).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "footer-bottom",
                "footer-top",
                "header-bottom",
                "header-top",
                "logo-bottom",
                "logo-top"
            ]
        );
        assert_eq!(obj["logo-top"], serde_json::json!({"x": 310, "y": 20}));
    }

    #[test]
    fn test_rejects_unknown_or_missing_keys() {
        let mut value = serde_json::to_value(ElementPositions::default()).unwrap();
        value["qr-top"] = serde_json::json!({"x": 0, "y": 0});
        assert!(serde_json::from_value::<ElementPositions>(value).is_err());

        let mut value = serde_json::to_value(ElementPositions::default()).unwrap();
        value.as_object_mut().unwrap().remove("footer-bottom");
        assert!(serde_json::from_value::<ElementPositions>(value).is_err());
    }

    #[test]
    fn test_element_faces_and_parsing() {
        for id in Face::Front.elements() {
            assert!(id.as_str().ends_with("-top"));
            assert_eq!(id.face(), Face::Front);
        }
        for id in Face::Back.elements() {
            assert!(id.as_str().ends_with("-bottom"));
        }
        for id in ElementId::ALL {
            assert_eq!(id.as_str().parse::<ElementId>().unwrap(), id);
        }
        assert!("notes-bottom".parse::<ElementId>().is_err());
    }

    #[test]
    fn test_position_arithmetic() {
        let element = Position::new(20, 24);
        let pointer = Position::new(120, 74);
        let anchor = pointer - element;
        assert_eq!(anchor, Offset { dx: 100, dy: 50 });
        assert_eq!(Position::new(150, 60) - anchor, Position::new(50, 10));
        assert_eq!(element + Offset { dx: -30, dy: 6 }, Position::new(-10, 30));
    }

    #[test]
    fn test_position_arithmetic_saturates() {
        let anchor = Position::new(i32::MIN, i32::MAX) - Position::new(20, -24);
        assert_eq!(anchor, Offset { dx: i32::MIN, dy: i32::MAX });
        assert_eq!(Position::new(i32::MAX, i32::MIN) - anchor, Position::new(i32::MAX, i32::MIN));
        assert_eq!(Position::new(i32::MAX, 0) + Offset { dx: 1, dy: 0 }, Position::new(i32::MAX, 0));
    }
}
