//! Labeled 2D point sets with provenance.
//!
//! A [`PointSample`] is one simulated or imaged tumor section at one time
//! point: an ordered sequence of typed points plus the identifiers needed to
//! join it against the payoff table. Samples are validated once at
//! construction and immutable afterwards; every statistic computer consumes
//! them read-only.

use serde::{Deserialize, Serialize};

/// The label attached to each cell in a sample.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    #[display("sensitive")]
    Sensitive,
    #[display("resistant")]
    Resistant,
    #[display("unknown")]
    Unknown,
}

impl CellType {
    /// The opposite subpopulation. `Unknown` has no opposite and maps to
    /// itself.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            CellType::Sensitive => CellType::Resistant,
            CellType::Resistant => CellType::Sensitive,
            CellType::Unknown => CellType::Unknown,
        }
    }
}

impl std::str::FromStr for CellType {
    type Err = SampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sensitive" => Ok(CellType::Sensitive),
            "resistant" => Ok(CellType::Resistant),
            "unknown" => Ok(CellType::Unknown),
            other => Err(SampleError::InvalidCellType {
                value: other.to_string(),
            }),
        }
    }
}

/// Physical-scale regime of a data source.
///
/// Simulated grids (`in_silico`) use lattice units; experimental imaging
/// data (`in_vitro`, `in_vivo`) uses image units roughly an order of
/// magnitude larger. Every statistic parameter record is keyed by this type.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    #[display("in_silico")]
    InSilico,
    #[display("in_vitro")]
    InVitro,
    #[display("in_vivo")]
    InVivo,
}

impl std::str::FromStr for DataType {
    type Err = SampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_silico" => Ok(DataType::InSilico),
            "in_vitro" => Ok(DataType::InVitro),
            "in_vivo" => Ok(DataType::InVivo),
            other => Err(SampleError::InvalidDataType {
                value: other.to_string(),
            }),
        }
    }
}

impl DataType {
    /// All supported data types, in catalog order.
    pub const ALL: [DataType; 3] = [DataType::InSilico, DataType::InVitro, DataType::InVivo];
}

/// One labeled point of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPoint {
    pub x: f32,
    pub y: f32,
    pub cell_type: CellType,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SampleError {
    #[display("unrecognized cell type: {value:?}")]
    InvalidCellType { value: String },
    #[display("unrecognized data type: {value:?}")]
    InvalidDataType { value: String },
    #[display("point {index} has non-finite coordinates ({x}, {y})")]
    NonFiniteCoordinate { index: usize, x: f32, y: f32 },
    #[display("point {index} has negative coordinates ({x}, {y})")]
    NegativeCoordinate { index: usize, x: f32, y: f32 },
}

/// A labeled 2D point set with provenance.
///
/// # Invariants
///
/// All coordinates are finite and non-negative (grid or image coordinate
/// systems); enforced by [`PointSample::new`]. Whether both subpopulations
/// are present is *not* an invariant of the sample itself; cross-type
/// statistics check it as a precondition and skip the sample otherwise.
///
/// # Examples
///
/// ```
/// use spategt_core::{CellPoint, CellType, DataType, PointSample};
///
/// let sample = PointSample::new(
///     "games".into(),
///     "17".into(),
///     DataType::InSilico,
///     vec![
///         CellPoint { x: 0.0, y: 0.0, cell_type: CellType::Sensitive },
///         CellPoint { x: 3.0, y: 4.0, cell_type: CellType::Resistant },
///     ],
/// )
/// .unwrap();
/// assert_eq!(sample.count_of(CellType::Sensitive), 1);
/// assert_eq!(sample.extent(), (3.0, 4.0));
/// ```
#[derive(Debug, Clone)]
pub struct PointSample {
    source_id: String,
    sample_id: String,
    data_type: DataType,
    points: Vec<CellPoint>,
}

impl PointSample {
    /// Builds a sample, validating every coordinate.
    pub fn new(
        source_id: String,
        sample_id: String,
        data_type: DataType,
        points: Vec<CellPoint>,
    ) -> Result<Self, SampleError> {
        for (index, p) in points.iter().enumerate() {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(SampleError::NonFiniteCoordinate {
                    index,
                    x: p.x,
                    y: p.y,
                });
            }
            if p.x < 0.0 || p.y < 0.0 {
                return Err(SampleError::NegativeCoordinate {
                    index,
                    x: p.x,
                    y: p.y,
                });
            }
        }
        Ok(Self {
            source_id,
            sample_id,
            data_type,
            points,
        })
    }

    #[must_use]
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    #[must_use]
    pub fn sample_id(&self) -> &str {
        &self.sample_id
    }

    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    #[must_use]
    pub fn points(&self) -> &[CellPoint] {
        &self.points
    }

    /// Number of points carrying the given label.
    #[must_use]
    pub fn count_of(&self, cell_type: CellType) -> usize {
        self.points
            .iter()
            .filter(|p| p.cell_type == cell_type)
            .count()
    }

    /// Coordinates of all points carrying the given label, in sample order.
    #[must_use]
    pub fn coords_of(&self, cell_type: CellType) -> Vec<[f32; 2]> {
        self.points
            .iter()
            .filter(|p| p.cell_type == cell_type)
            .map(|p| [p.x, p.y])
            .collect()
    }

    /// Coordinates of every point, in sample order.
    #[must_use]
    pub fn all_coords(&self) -> Vec<[f32; 2]> {
        self.points.iter().map(|p| [p.x, p.y]).collect()
    }

    /// Bounding-box extent `(max_x, max_y)` over all points.
    ///
    /// The origin is always `(0, 0)` (coordinates are non-negative), so this
    /// doubles as the study-area dimensions for density normalization. An
    /// empty sample has extent `(0, 0)`.
    #[must_use]
    pub fn extent(&self) -> (f32, f32) {
        let mut max_x = 0.0f32;
        let mut max_y = 0.0f32;
        for p in &self.points {
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        (max_x, max_y)
    }

    /// Bounding-box area of the sample.
    #[must_use]
    pub fn area(&self) -> f32 {
        let (w, h) = self.extent();
        w * h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32, y: f32, cell_type: CellType) -> CellPoint {
        CellPoint { x, y, cell_type }
    }

    fn sample(points: Vec<CellPoint>) -> Result<PointSample, SampleError> {
        PointSample::new("src".into(), "0".into(), DataType::InSilico, points)
    }

    #[test]
    fn test_cell_type_round_trip() {
        for (text, expected) in [
            ("sensitive", CellType::Sensitive),
            ("resistant", CellType::Resistant),
            ("unknown", CellType::Unknown),
        ] {
            assert_eq!(text.parse::<CellType>().unwrap(), expected);
            assert_eq!(expected.to_string(), text);
        }
        assert!("Sensitive".parse::<CellType>().is_err());
    }

    #[test]
    fn test_data_type_serde_names() {
        let json = serde_json::to_string(&DataType::InSilico).unwrap();
        assert_eq!(json, "\"in_silico\"");
        let parsed: DataType = serde_json::from_str("\"in_vivo\"").unwrap();
        assert_eq!(parsed, DataType::InVivo);
    }

    #[test]
    fn test_rejects_non_finite_coordinates() {
        let err = sample(vec![point(f32::NAN, 0.0, CellType::Sensitive)]).unwrap_err();
        assert!(matches!(err, SampleError::NonFiniteCoordinate { index: 0, .. }));
    }

    #[test]
    fn test_rejects_negative_coordinates() {
        let err = sample(vec![
            point(1.0, 1.0, CellType::Sensitive),
            point(-0.5, 2.0, CellType::Resistant),
        ])
        .unwrap_err();
        assert!(matches!(err, SampleError::NegativeCoordinate { index: 1, .. }));
    }

    #[test]
    fn test_counts_and_coords_by_type() {
        let s = sample(vec![
            point(0.0, 0.0, CellType::Sensitive),
            point(1.0, 0.0, CellType::Resistant),
            point(2.0, 0.0, CellType::Sensitive),
            point(3.0, 0.0, CellType::Unknown),
        ])
        .unwrap();
        assert_eq!(s.count_of(CellType::Sensitive), 2);
        assert_eq!(s.count_of(CellType::Resistant), 1);
        assert_eq!(s.coords_of(CellType::Sensitive), vec![[0.0, 0.0], [2.0, 0.0]]);
    }

    #[test]
    fn test_extent_of_empty_sample() {
        let s = sample(vec![]).unwrap();
        assert_eq!(s.extent(), (0.0, 0.0));
        assert_eq!(s.area(), 0.0);
    }

    #[test]
    fn test_opposite_type() {
        assert_eq!(CellType::Sensitive.opposite(), CellType::Resistant);
        assert_eq!(CellType::Resistant.opposite(), CellType::Sensitive);
        assert_eq!(CellType::Unknown.opposite(), CellType::Unknown);
    }
}
