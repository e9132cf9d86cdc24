use super::{
    BarSurface, FailureMode, Feature, FeatureVector, FrpType, InputValidationError,
};

// ---------------------------------------------------------------------------
// Form input: what the individual-prediction tab edits
// ---------------------------------------------------------------------------

/// Raw state of the single-record form. Continuous fields hold the text the
/// user typed; categorical fields come from drop-downs and are always valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub temperature: String,
    pub failure_mode: FailureMode,
    pub frp_type: FrpType,
    pub bar_surface: BarSurface,
    pub bar_diameter: String,
    pub anchorage_length: String,
    pub concrete_strength: String,
    pub cover_ratio: String,
}

impl FormInput {
    /// Text buffer behind a continuous feature, `None` for categorical ones.
    pub fn text_mut(&mut self, feature: Feature) -> Option<&mut String> {
        match feature {
            Feature::Temperature => Some(&mut self.temperature),
            Feature::BarDiameter => Some(&mut self.bar_diameter),
            Feature::AnchorageLength => Some(&mut self.anchorage_length),
            Feature::ConcreteStrength => Some(&mut self.concrete_strength),
            Feature::CoverRatio => Some(&mut self.cover_ratio),
            Feature::FailureMode | Feature::FrpType | Feature::BarSurface => None,
        }
    }

    /// Parse every field. Fails on the first missing or malformed value.
    pub fn parse(&self) -> Result<FeatureVector, InputValidationError> {
        Ok(FeatureVector {
            temperature: parse_number(Feature::Temperature, &self.temperature)?,
            failure_mode: self.failure_mode,
            frp_type: self.frp_type,
            bar_surface: self.bar_surface,
            bar_diameter: parse_number(Feature::BarDiameter, &self.bar_diameter)?,
            anchorage_length: parse_number(Feature::AnchorageLength, &self.anchorage_length)?,
            concrete_strength: parse_number(Feature::ConcreteStrength, &self.concrete_strength)?,
            cover_ratio: parse_number(Feature::CoverRatio, &self.cover_ratio)?,
        })
    }
}

fn parse_number(feature: Feature, text: &str) -> Result<f64, InputValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputValidationError::Missing { feature });
    }
    let value = text
        .parse::<f64>()
        .map_err(|_| InputValidationError::NotANumber {
            feature,
            value: text.to_string(),
        })?;
    if !value.is_finite() {
        return Err(InputValidationError::NotFinite { feature });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormInput {
        FormInput {
            temperature: "25".into(),
            failure_mode: FailureMode::BarPullout,
            frp_type: FrpType::Glass,
            bar_surface: BarSurface::Ribbed,
            bar_diameter: " 12 ".into(),
            anchorage_length: "100".into(),
            concrete_strength: "30".into(),
            cover_ratio: "1.5".into(),
        }
    }

    #[test]
    fn parses_complete_form() {
        let v = filled().parse().unwrap();
        assert_eq!(v.to_row(), [25.0, 2.0, 1.0, 3.0, 12.0, 100.0, 30.0, 1.5]);
    }

    #[test]
    fn empty_field_is_missing() {
        let mut form = filled();
        form.anchorage_length.clear();
        assert_eq!(
            form.parse(),
            Err(InputValidationError::Missing {
                feature: Feature::AnchorageLength
            })
        );
    }

    #[test]
    fn text_is_not_a_number() {
        let mut form = filled();
        form.temperature = "warm".into();
        assert!(matches!(
            form.parse(),
            Err(InputValidationError::NotANumber { feature: Feature::Temperature, .. })
        ));
    }

    #[test]
    fn nan_is_rejected() {
        let mut form = filled();
        form.cover_ratio = "NaN".into();
        assert_eq!(
            form.parse(),
            Err(InputValidationError::NotFinite {
                feature: Feature::CoverRatio
            })
        );
    }

    #[test]
    fn categorical_fields_have_no_text_buffer() {
        let mut form = FormInput::default();
        assert!(form.text_mut(Feature::FrpType).is_none());
        form.text_mut(Feature::BarDiameter).unwrap().push_str("16");
        assert_eq!(form.bar_diameter, "16");
    }
}
