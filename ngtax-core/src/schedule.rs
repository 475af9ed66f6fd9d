use std::sync::Arc;

use chrono::NaiveDate;

use crate::{InvalidConfiguration, TaxEngine, TaxYearConfig};

/// Tax-year configurations ordered by the date they take effect.
///
/// Each configuration is validated once when the schedule is built; lookups
/// only hand out engines over already-validated data.
#[derive(Debug, Clone)]
pub struct ConfigSchedule {
    configs: Vec<Arc<TaxYearConfig>>,
}

impl ConfigSchedule {
    /// Builds a schedule from any number of configurations.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidConfiguration`] found, or
    /// [`InvalidConfiguration::DuplicateEffectiveDate`] if two configurations
    /// take effect on the same day.
    pub fn new(mut configs: Vec<TaxYearConfig>) -> Result<Self, InvalidConfiguration> {
        for config in &configs {
            config.validate()?;
        }

        configs.sort_by_key(|c| c.effective_from);
        if let Some(pair) = configs
            .windows(2)
            .find(|pair| pair[0].effective_from == pair[1].effective_from)
        {
            return Err(InvalidConfiguration::DuplicateEffectiveDate(
                pair[0].effective_from,
            ));
        }

        Ok(Self {
            configs: configs.into_iter().map(Arc::new).collect(),
        })
    }

    /// The engine for the latest configuration in effect on `date`, if any.
    pub fn active_on(
        &self,
        date: NaiveDate,
    ) -> Option<TaxEngine> {
        self.configs
            .iter()
            .rev()
            .find(|c| c.effective_from <= date)
            .map(|c| TaxEngine::from_validated(Arc::clone(c)))
    }

    /// The engine for the most recent configuration.
    pub fn latest(&self) -> Option<TaxEngine> {
        self.configs
            .last()
            .map(|c| TaxEngine::from_validated(Arc::clone(c)))
    }

    /// Effective dates, oldest first.
    pub fn effective_dates(&self) -> Vec<NaiveDate> {
        self.configs.iter().map(|c| c.effective_from).collect()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::test_support::test_config;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config_from(
        effective_from: NaiveDate,
        standard_rate: Decimal,
    ) -> TaxYearConfig {
        let mut config = test_config();
        config.tax_year = effective_from.year();
        config.effective_from = effective_from;
        config.cit_rates.standard = standard_rate;
        config
    }

    #[test]
    fn active_on_picks_latest_effective_config() {
        let schedule = ConfigSchedule::new(vec![
            config_from(date(2027, 1, 1), dec!(0.25)),
            config_from(date(2026, 1, 1), dec!(0.30)),
        ])
        .unwrap();

        let engine_2026 = schedule.active_on(date(2026, 6, 30)).unwrap();
        let engine_2027 = schedule.active_on(date(2027, 1, 1)).unwrap();

        assert_eq!(engine_2026.config().cit_rates.standard, dec!(0.30));
        assert_eq!(engine_2027.config().cit_rates.standard, dec!(0.25));
        assert_eq!(schedule.effective_dates(), vec![date(2026, 1, 1), date(2027, 1, 1)]);
    }

    #[test]
    fn active_on_before_first_config_is_none() {
        let schedule = ConfigSchedule::new(vec![test_config()]).unwrap();

        assert!(schedule.active_on(date(2025, 12, 31)).is_none());
    }

    #[test]
    fn latest_returns_newest_config() {
        let schedule = ConfigSchedule::new(vec![
            config_from(date(2026, 1, 1), dec!(0.30)),
            config_from(date(2028, 1, 1), dec!(0.20)),
        ])
        .unwrap();

        assert_eq!(schedule.len(), 2);
        assert_eq!(
            schedule.latest().unwrap().config().effective_from,
            date(2028, 1, 1)
        );
    }

    #[test]
    fn empty_schedule_has_no_engine() {
        let schedule = ConfigSchedule::new(vec![]).unwrap();

        assert!(schedule.is_empty());
        assert!(schedule.latest().is_none());
    }

    #[test]
    fn duplicate_effective_dates_are_rejected() {
        let result = ConfigSchedule::new(vec![test_config(), test_config()]);

        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("more than one configuration is effective from 2026-01-01".to_string())
        );
    }

    #[test]
    fn invalid_member_rejects_whole_schedule() {
        let mut bad = config_from(date(2027, 1, 1), dec!(0.30));
        bad.rent_relief.cap = dec!(-1);

        let result = ConfigSchedule::new(vec![test_config(), bad]);

        assert!(matches!(
            result,
            Err(InvalidConfiguration::NegativeValue { .. })
        ));
    }
}
