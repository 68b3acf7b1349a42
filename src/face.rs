//! Cube face labels and the extracted face set.

use crate::error::{PackError, Result};
use std::fmt;

/// Number of faces in a skybox.
pub const FACE_COUNT: usize = 6;

/// Face labels in output order.
///
/// The label is attached by position only; extraction slices a 3x2 grid and
/// does not reproject the sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    /// Index 0, -X.
    Left,
    /// Index 1, -Z.
    Front,
    /// Index 2, +X.
    Right,
    /// Index 3, +Z.
    Back,
    /// Index 4, +Y.
    Top,
    /// Index 5, -Y.
    Bottom,
}

impl CubeFace {
    /// All faces in index order.
    pub const ALL: [CubeFace; FACE_COUNT] = [
        Self::Left,
        Self::Front,
        Self::Right,
        Self::Back,
        Self::Top,
        Self::Bottom,
    ];

    /// Position of this face in the output sequence.
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Front => 1,
            Self::Right => 2,
            Self::Back => 3,
            Self::Top => 4,
            Self::Bottom => 5,
        }
    }

    /// Face for an output index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable label with its axis, e.g. `left (-x)`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "left (-x)",
            Self::Front => "front (-z)",
            Self::Right => "right (+x)",
            Self::Back => "back (+z)",
            Self::Top => "top (+y)",
            Self::Bottom => "bottom (-y)",
        }
    }
}

impl fmt::Display for CubeFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Front => "front",
            Self::Right => "right",
            Self::Back => "back",
            Self::Top => "top",
            Self::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// One extracted, PNG-encoded face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceImage {
    /// Which face this is.
    pub face: CubeFace,
    /// Side length in pixels.
    pub size: u32,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
}

impl FaceImage {
    /// Output index of this face.
    pub fn index(&self) -> usize {
        self.face.index()
    }
}

/// The faces produced by one conversion.
///
/// Holds either no faces or all six in index order, never a partial set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionResult {
    faces: Vec<FaceImage>,
}

impl ConversionResult {
    /// A result with no faces (not yet converted, or failed).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a complete result.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::EmptyInput`] unless exactly six faces are given
    /// in index order.
    pub fn from_faces(faces: Vec<FaceImage>) -> Result<Self> {
        if faces.len() != FACE_COUNT {
            return Err(PackError::EmptyInput(format!(
                "expected {FACE_COUNT} faces, got {}",
                faces.len()
            )));
        }
        if let Some((pos, face)) = faces
            .iter()
            .enumerate()
            .find(|(pos, face)| face.index() != *pos)
        {
            return Err(PackError::EmptyInput(format!(
                "face at position {pos} is {} (index {})",
                face.face,
                face.index()
            )));
        }
        Ok(Self { faces })
    }

    /// Number of faces (0 or 6).
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// True when no conversion output is held.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// True when all six faces are present.
    pub fn is_complete(&self) -> bool {
        self.faces.len() == FACE_COUNT
    }

    /// Faces in index order.
    pub fn faces(&self) -> &[FaceImage] {
        &self.faces
    }

    /// Face by label.
    pub fn get(&self, face: CubeFace) -> Option<&FaceImage> {
        self.faces.get(face.index())
    }

    /// Iterate faces in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, FaceImage> {
        self.faces.iter()
    }
}

impl<'a> IntoIterator for &'a ConversionResult {
    type Item = &'a FaceImage;
    type IntoIter = std::slice::Iter<'a, FaceImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.faces.iter()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    fn stub(face: CubeFace) -> FaceImage {
        FaceImage {
            face,
            size: 1,
            png: vec![face.index() as u8],
        }
    }

    #[test]
    fn face_order_is_fixed() {
        let names: Vec<String> = CubeFace::ALL.iter().map(|f| f.to_string()).collect();
        assert_eq!(names, ["left", "front", "right", "back", "top", "bottom"]);
        for (i, face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
            assert_eq!(CubeFace::from_index(i), Some(*face));
        }
        assert_eq!(CubeFace::from_index(6), None);
    }

    #[test]
    fn labels_carry_axes() {
        assert_eq!(CubeFace::Left.label(), "left (-x)");
        assert_eq!(CubeFace::Bottom.label(), "bottom (-y)");
    }

    #[test]
    fn complete_result_accepts_six_in_order() {
        let faces = CubeFace::ALL.iter().map(|f| stub(*f)).collect();
        let result = ConversionResult::from_faces(faces).expect("six faces");
        assert!(result.is_complete());
        assert_eq!(result.len(), 6);
        assert_eq!(result.get(CubeFace::Back).map(|f| f.png[0]), Some(3));
    }

    #[test]
    fn partial_result_is_rejected() {
        let faces = CubeFace::ALL[..5].iter().map(|f| stub(*f)).collect();
        let result = ConversionResult::from_faces(faces);
        assert!(matches!(result, Err(PackError::EmptyInput(_))));
    }

    #[test]
    fn out_of_order_result_is_rejected() {
        let mut faces: Vec<FaceImage> = CubeFace::ALL.iter().map(|f| stub(*f)).collect();
        faces.swap(0, 1);
        assert!(ConversionResult::from_faces(faces).is_err());
    }

    #[test]
    fn empty_result_is_empty() {
        let result = ConversionResult::empty();
        assert!(result.is_empty());
        assert!(!result.is_complete());
        assert_eq!(result.iter().count(), 0);
    }
}
