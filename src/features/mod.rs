/// Feature layer: the fixed-order 8-value specimen description.
///
/// ```text
///  form text / table row
///        │
///        ▼
///   ┌───────────┐
///   │   form     │  parse + validate → FeatureVector
///   └───────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ FeatureVector  │  to_row() → [f64; 8] in model order
///   └───────────────┘
/// ```
pub mod categorical;
pub mod form;

use std::fmt;

use thiserror::Error;

use crate::i18n::Language;

pub use categorical::{BarSurface, Categorical, FailureMode, FrpType};
pub use form::FormInput;

/// Number of model inputs.
pub const FEATURE_COUNT: usize = 8;

// ---------------------------------------------------------------------------
// Feature descriptors
// ---------------------------------------------------------------------------

/// One position of the feature vector. Declaration order is model order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Temperature,
    FailureMode,
    FrpType,
    BarSurface,
    BarDiameter,
    AnchorageLength,
    ConcreteStrength,
    CoverRatio,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Temperature,
        Feature::FailureMode,
        Feature::FrpType,
        Feature::BarSurface,
        Feature::BarDiameter,
        Feature::AnchorageLength,
        Feature::ConcreteStrength,
        Feature::CoverRatio,
    ];

    /// Zero-based column position.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Feature::Temperature => "T",
            Feature::FailureMode => "FM",
            Feature::FrpType => "FT",
            Feature::BarSurface => "BS",
            Feature::BarDiameter => "d",
            Feature::AnchorageLength => "la",
            Feature::ConcreteStrength => "fc",
            Feature::CoverRatio => "c/d",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Feature::Temperature => "°C",
            Feature::BarDiameter | Feature::AnchorageLength => "mm",
            Feature::ConcreteStrength => "MPa",
            _ => "",
        }
    }

    pub fn is_categorical(self) -> bool {
        matches!(
            self,
            Feature::FailureMode | Feature::FrpType | Feature::BarSurface
        )
    }

    /// Form label, e.g. `"T (Temperature)"`.
    pub fn label(self, lang: Language) -> String {
        let name = match (self, lang) {
            (Feature::Temperature, Language::English) => "Temperature",
            (Feature::FailureMode, Language::English) => "Failure Mode",
            (Feature::FrpType, Language::English) => "FRP Type",
            (Feature::BarSurface, Language::English) => "FRP Bar Surface",
            (Feature::BarDiameter, Language::English) => "FRP Bar Diameter",
            (Feature::AnchorageLength, Language::English) => "Anchorage Length",
            (Feature::ConcreteStrength, Language::English) => "Concrete Compressive Strength",
            (Feature::CoverRatio, Language::English) => "Concrete Cover / Bar Diameter",
            (Feature::Temperature, Language::Chinese) => "温度",
            (Feature::FailureMode, Language::Chinese) => "失效模式",
            (Feature::FrpType, Language::Chinese) => "FRP类型",
            (Feature::BarSurface, Language::Chinese) => "FRP钢筋表面",
            (Feature::BarDiameter, Language::Chinese) => "FRP钢筋直径",
            (Feature::AnchorageLength, Language::Chinese) => "锚固长度",
            (Feature::ConcreteStrength, Language::Chinese) => "混凝土抗压强度",
            (Feature::CoverRatio, Language::Chinese) => "混凝土覆盖/钢筋直径",
        };
        format!("{} ({name})", self.symbol())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Raised before any model call when a single-record input is unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputValidationError {
    #[error("{feature} is missing")]
    Missing { feature: Feature },
    #[error("{feature}: '{value}' is not a number")]
    NotANumber { feature: Feature, value: String },
    #[error("{feature}: value must be finite")]
    NotFinite { feature: Feature },
    #[error("{feature}: {value} is not a valid category code")]
    UnknownCategory { feature: Feature, value: f64 },
}

// ---------------------------------------------------------------------------
// FeatureVector
// ---------------------------------------------------------------------------

/// One specimen, fully validated. Categorical positions are typed so an
/// out-of-range code cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub temperature: f64,
    pub failure_mode: FailureMode,
    pub frp_type: FrpType,
    pub bar_surface: BarSurface,
    pub bar_diameter: f64,
    pub anchorage_length: f64,
    pub concrete_strength: f64,
    pub cover_ratio: f64,
}

impl FeatureVector {
    /// Raw values in model order.
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [
            self.temperature,
            self.failure_mode.code() as f64,
            self.frp_type.code() as f64,
            self.bar_surface.code() as f64,
            self.bar_diameter,
            self.anchorage_length,
            self.concrete_strength,
            self.cover_ratio,
        ]
    }

    /// Validate a raw row: continuous values finite, categorical values
    /// integral codes of their enumeration.
    pub fn from_row(row: [f64; FEATURE_COUNT]) -> Result<Self, InputValidationError> {
        for feature in Feature::ALL {
            if !row[feature.index()].is_finite() {
                return Err(InputValidationError::NotFinite { feature });
            }
        }
        Ok(Self {
            temperature: row[0],
            failure_mode: category(Feature::FailureMode, row[1])?,
            frp_type: category(Feature::FrpType, row[2])?,
            bar_surface: category(Feature::BarSurface, row[3])?,
            bar_diameter: row[4],
            anchorage_length: row[5],
            concrete_strength: row[6],
            cover_ratio: row[7],
        })
    }
}

fn category<C: Categorical>(feature: Feature, value: f64) -> Result<C, InputValidationError> {
    C::from_value(value).ok_or(InputValidationError::UnknownCategory { feature, value })
}

/// Categorical positions of `row` whose value is not a known code. Positions
/// past the end of a short row count as unknown.
pub fn unknown_categories(row: &[f64]) -> Vec<Feature> {
    let known = |feature: Feature| {
        let v = row.get(feature.index()).copied().unwrap_or(f64::NAN);
        match feature {
            Feature::FailureMode => FailureMode::from_value(v).is_some(),
            Feature::FrpType => FrpType::from_value(v).is_some(),
            Feature::BarSurface => BarSurface::from_value(v).is_some(),
            _ => true,
        }
    };
    Feature::ALL
        .into_iter()
        .filter(|f| f.is_categorical() && !known(*f))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: [f64; FEATURE_COUNT] = [25.0, 2.0, 1.0, 3.0, 12.0, 100.0, 30.0, 1.5];

    #[test]
    fn row_round_trips_through_vector() {
        let v = FeatureVector::from_row(EXAMPLE).unwrap();
        assert_eq!(v.failure_mode, FailureMode::BarPullout);
        assert_eq!(v.frp_type, FrpType::Glass);
        assert_eq!(v.bar_surface, BarSurface::Ribbed);
        assert_eq!(v.to_row(), EXAMPLE);
    }

    #[test]
    fn order_matches_feature_index() {
        for (i, f) in Feature::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
        assert_eq!(Feature::CoverRatio.symbol(), "c/d");
    }

    #[test]
    fn rejects_out_of_range_category() {
        let mut row = EXAMPLE;
        row[2] = 4.0;
        assert_eq!(
            FeatureVector::from_row(row),
            Err(InputValidationError::UnknownCategory {
                feature: Feature::FrpType,
                value: 4.0
            })
        );
    }

    #[test]
    fn rejects_non_finite() {
        let mut row = EXAMPLE;
        row[6] = f64::INFINITY;
        assert!(matches!(
            FeatureVector::from_row(row),
            Err(InputValidationError::NotFinite {
                feature: Feature::ConcreteStrength
            })
        ));
    }

    #[test]
    fn unknown_categories_lists_bad_positions() {
        let row = [25.0, 9.0, 1.0, 0.0, 12.0, 100.0, 30.0, 1.5];
        assert_eq!(
            unknown_categories(&row),
            vec![Feature::FailureMode, Feature::BarSurface]
        );
        assert!(unknown_categories(&EXAMPLE).is_empty());
    }

    #[test]
    fn short_row_reports_absent_categories() {
        assert_eq!(
            unknown_categories(&[25.0, 2.0, 1.0]),
            vec![Feature::BarSurface]
        );
        assert_eq!(unknown_categories(&[]).len(), 3);
    }
}
