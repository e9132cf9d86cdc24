use std::fmt;

use crate::i18n::Language;

// ---------------------------------------------------------------------------
// Categorical feature codes
// ---------------------------------------------------------------------------

/// A categorical feature encoded as a small positive integer.
///
/// The mapping is bidirectional: `code()` gives the integer fed to the model,
/// `from_code()` recovers the variant, and `label()` is the display text.
pub trait Categorical: Copy + Eq + Sized + 'static {
    /// All variants in code order.
    const ALL: &'static [Self];

    fn code(self) -> u8;

    fn label(self, lang: Language) -> &'static str;

    fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.code() == code)
    }

    /// Interpret a raw numeric value as a code. Fractional, negative or
    /// unknown values yield `None`.
    fn from_value(value: f64) -> Option<Self> {
        if value.fract() != 0.0 || !(0.0..=u8::MAX as f64).contains(&value) {
            return None;
        }
        Self::from_code(value as u8)
    }

    /// `"label (code)"`, as shown in the drop-down lists.
    fn display(self, lang: Language) -> String {
        format!("{} ({})", self.label(lang), self.code())
    }
}

/// FM: how the specimen failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FailureMode {
    #[default]
    SandLayerDebonding,
    BarPullout,
    ConcreteShear,
    BarRupture,
    ConcreteSplitting,
}

impl Categorical for FailureMode {
    const ALL: &'static [Self] = &[
        FailureMode::SandLayerDebonding,
        FailureMode::BarPullout,
        FailureMode::ConcreteShear,
        FailureMode::BarRupture,
        FailureMode::ConcreteSplitting,
    ];

    fn code(self) -> u8 {
        match self {
            FailureMode::SandLayerDebonding => 1,
            FailureMode::BarPullout => 2,
            FailureMode::ConcreteShear => 3,
            FailureMode::BarRupture => 4,
            FailureMode::ConcreteSplitting => 5,
        }
    }

    fn label(self, lang: Language) -> &'static str {
        match (self, lang) {
            (FailureMode::SandLayerDebonding, Language::English) => "FRP-sand layer debonding",
            (FailureMode::BarPullout, Language::English) => "FRP bar pullout",
            (FailureMode::ConcreteShear, Language::English) => "Concrete shear failure",
            (FailureMode::BarRupture, Language::English) => "FRP bar rupture",
            (FailureMode::ConcreteSplitting, Language::English) => "Concrete splitting",
            (FailureMode::SandLayerDebonding, Language::Chinese) => "FRP沙层脱粘",
            (FailureMode::BarPullout, Language::Chinese) => "FRP钢筋拔出",
            (FailureMode::ConcreteShear, Language::Chinese) => "混凝土剪切破坏",
            (FailureMode::BarRupture, Language::Chinese) => "FRP钢筋断裂",
            (FailureMode::ConcreteSplitting, Language::Chinese) => "混凝土劈裂",
        }
    }
}

/// FT: fibre of the reinforcing bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrpType {
    #[default]
    Glass,
    Carbon,
    Basalt,
}

impl Categorical for FrpType {
    const ALL: &'static [Self] = &[FrpType::Glass, FrpType::Carbon, FrpType::Basalt];

    fn code(self) -> u8 {
        match self {
            FrpType::Glass => 1,
            FrpType::Carbon => 2,
            FrpType::Basalt => 3,
        }
    }

    fn label(self, _lang: Language) -> &'static str {
        match self {
            FrpType::Glass => "GFRP",
            FrpType::Carbon => "CFRP",
            FrpType::Basalt => "BFRP",
        }
    }
}

/// BS: surface treatment of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BarSurface {
    #[default]
    SandCoated,
    FiberWrappedSandCoated,
    Ribbed,
    FiberWrapped,
    SandCoatedRibbed,
}

impl Categorical for BarSurface {
    const ALL: &'static [Self] = &[
        BarSurface::SandCoated,
        BarSurface::FiberWrappedSandCoated,
        BarSurface::Ribbed,
        BarSurface::FiberWrapped,
        BarSurface::SandCoatedRibbed,
    ];

    fn code(self) -> u8 {
        match self {
            BarSurface::SandCoated => 1,
            BarSurface::FiberWrappedSandCoated => 2,
            BarSurface::Ribbed => 3,
            BarSurface::FiberWrapped => 4,
            BarSurface::SandCoatedRibbed => 5,
        }
    }

    fn label(self, lang: Language) -> &'static str {
        match (self, lang) {
            (BarSurface::SandCoated, Language::English) => "Sand-coated",
            (BarSurface::FiberWrappedSandCoated, Language::English) => "Fiber-wrapped sand-coated",
            (BarSurface::Ribbed, Language::English) => "Ribbed",
            (BarSurface::FiberWrapped, Language::English) => "Fiber-wrapped",
            (BarSurface::SandCoatedRibbed, Language::English) => "Sand-coated ribbed",
            (BarSurface::SandCoated, Language::Chinese) => "砂涂层",
            (BarSurface::FiberWrappedSandCoated, Language::Chinese) => "纤维包裹砂涂层",
            (BarSurface::Ribbed, Language::Chinese) => "肋纹",
            (BarSurface::FiberWrapped, Language::Chinese) => "纤维包裹",
            (BarSurface::SandCoatedRibbed, Language::Chinese) => "砂涂层肋纹",
        }
    }
}

macro_rules! display_code {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.code())
            }
        })*
    };
}

display_code!(FailureMode, FrpType, BarSurface);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bijective<C: Categorical + fmt::Debug>() {
        for (i, v) in C::ALL.iter().enumerate() {
            assert_eq!(v.code() as usize, i + 1);
            assert_eq!(C::from_code(v.code()), Some(*v));
        }
        assert_eq!(C::from_code(0), None);
        assert_eq!(C::from_code(C::ALL.len() as u8 + 1), None);
    }

    #[test]
    fn codes_map_both_ways() {
        assert_bijective::<FailureMode>();
        assert_bijective::<FrpType>();
        assert_bijective::<BarSurface>();
    }

    #[test]
    fn from_value_rejects_fractional_and_negative() {
        assert_eq!(FrpType::from_value(2.0), Some(FrpType::Carbon));
        assert_eq!(FrpType::from_value(2.5), None);
        assert_eq!(FrpType::from_value(-1.0), None);
        assert_eq!(FrpType::from_value(f64::NAN), None);
    }

    #[test]
    fn display_label_carries_code() {
        assert_eq!(
            BarSurface::Ribbed.display(Language::English),
            "Ribbed (3)"
        );
        assert_eq!(FailureMode::BarPullout.display(Language::Chinese), "FRP钢筋拔出 (2)");
    }
}
