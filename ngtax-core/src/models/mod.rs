mod cit;
mod company;
mod pit;
mod pit_band;
mod tax_year_config;

pub use cit::{CitInput, CitResult};
pub use company::{CompanyClassification, CompanyType, Sector};
pub use pit::{BandTax, PitInput, PitResult};
pub use pit_band::PitBand;
pub use tax_year_config::{
    CitRates, CitThresholds, DevLevyRule, InvalidConfiguration, RentReliefRule, TaxYearConfig,
};
