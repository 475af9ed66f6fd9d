use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Business sector of a company, as far as small-company classification
/// cares about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    #[default]
    General,
    ProfessionalServices,
}

impl Sector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::ProfessionalServices => "professional_services",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "general" => Some(Self::General),
            "professional_services" => Some(Self::ProfessionalServices),
            _ => None,
        }
    }

    pub fn from_professional_services_flag(is_professional_services: bool) -> Self {
        if is_professional_services {
            Self::ProfessionalServices
        } else {
            Self::General
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyType {
    #[serde(rename = "Small")]
    Small,
    #[serde(rename = "Medium/Large")]
    MediumLarge,
}

impl CompanyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::MediumLarge => "Medium/Large",
        }
    }
}

impl std::fmt::Display for CompanyType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of small-company classification.
///
/// Medium and large companies carry the rates that apply to them, so later
/// steps never re-derive them from a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyClassification {
    Small,
    MediumLarge {
        tax_rate: Decimal,
        levy_rate: Decimal,
    },
}

impl CompanyClassification {
    pub fn company_type(&self) -> CompanyType {
        match self {
            Self::Small => CompanyType::Small,
            Self::MediumLarge { .. } => CompanyType::MediumLarge,
        }
    }

    pub fn tax_rate(&self) -> Decimal {
        match self {
            Self::Small => Decimal::ZERO,
            Self::MediumLarge { tax_rate, .. } => *tax_rate,
        }
    }

    pub fn levy_rate(&self) -> Decimal {
        match self {
            Self::Small => Decimal::ZERO,
            Self::MediumLarge { levy_rate, .. } => *levy_rate,
        }
    }
}
