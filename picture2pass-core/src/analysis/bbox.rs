use serde::{Deserialize, Serialize, Serializer};

/// A 2D axis-aligned bounding box represented by minimum and maximum points.
///
/// Coordinates live in the original (uncropped) page image space, with the
/// origin at the top-left corner and Y increasing downward. On the wire a
/// bbox is the 4-tuple `[x1, y1, x2, y2]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bbox {
    /// The minimum point of the bounding box (top-left corner).
    pub min: glam::Vec2,
    /// The maximum point of the bounding box (bottom-right corner).
    pub max: glam::Vec2,
}

impl Bbox {
    /// Creates a new bounding box from minimum and maximum points.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use picture2pass_core::analysis::bbox::Bbox;
    /// let bbox = Bbox::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 5.0));
    /// ```
    pub fn new(min: glam::Vec2, max: glam::Vec2) -> Self {
        Self { min, max }
    }

    /// Creates a bounding box from `[x1, y1, x2, y2]` coordinates, the
    /// layout used in serialized documents.
    pub fn from_xyxy(coords: [f32; 4]) -> Self {
        let [x1, y1, x2, y2] = coords;
        Self {
            min: glam::Vec2::new(x1, y1),
            max: glam::Vec2::new(x2, y2),
        }
    }

    /// Returns the `[x1, y1, x2, y2]` representation of this bounding box.
    pub fn to_xyxy(&self) -> [f32; 4] {
        [self.min.x, self.min.y, self.max.x, self.max.y]
    }

    /// Calculates the area of the bounding box.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use picture2pass_core::analysis::bbox::Bbox;
    /// let bbox = Bbox::new(Vec2::ZERO, Vec2::new(4.0, 3.0));
    /// assert_eq!(bbox.area(), 12.0);
    /// ```
    pub fn area(&self) -> f32 {
        let length = self.max - self.min;

        length.x * length.y
    }

    /// Calculates the center point of the bounding box.
    pub fn center(&self) -> glam::Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Checks if this bounding box completely contains another bounding box.
    ///
    /// A bounding box is considered to contain another if all four corners
    /// of the contained box are within or on the boundary of the containing
    /// box.
    pub fn contains(&self, other: &Self) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }

    /// Checks if `inner` lies inside this bounding box, allowing each edge
    /// to overhang by up to `tolerance` coordinate units.
    ///
    /// This is a one-sided containment test, not an intersection test: an
    /// inner box that straddles the boundary by more than the tolerance on
    /// any single axis fails the whole test. The check is pure and every
    /// coordinate is evaluated independently.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use picture2pass_core::analysis::bbox::Bbox;
    ///
    /// let outer = Bbox::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    /// let jittered = Bbox::new(Vec2::new(-0.4, 0.0), Vec2::new(10.3, 10.0));
    /// let straddling = Bbox::new(Vec2::new(-2.0, 0.0), Vec2::new(5.0, 5.0));
    ///
    /// assert!(outer.contains_with_tolerance(&jittered, 0.5));
    /// assert!(!outer.contains_with_tolerance(&straddling, 0.5));
    /// ```
    pub fn contains_with_tolerance(&self, inner: &Self, tolerance: f32) -> bool {
        inner.min.x >= self.min.x - tolerance
            && inner.min.y >= self.min.y - tolerance
            && inner.max.x <= self.max.x + tolerance
            && inner.max.y <= self.max.y + tolerance
    }

    /// Rounds each coordinate to the nearest integer.
    ///
    /// Repeated inference over overlapping crops reproduces the same
    /// detection with sub-unit coordinate jitter; the rounded rectangle is
    /// what identity comparison hashes on.
    pub fn rounded(&self) -> [i64; 4] {
        [
            self.min.x.round() as i64,
            self.min.y.round() as i64,
            self.max.x.round() as i64,
            self.max.y.round() as i64,
        ]
    }
}

impl Serialize for Bbox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_xyxy().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Bbox {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <[f32; 4]>::deserialize(deserializer).map(Self::from_xyxy)
    }
}
