//! Ride catalogue and economy tuning.
//!
//! The catalogue is an ordered table: index = unlock order. It is validated
//! once at construction and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RideDefinition {
    pub name: String,
    pub base_earnings_per_minute: f64,
    pub unlock_price: f64,
}

impl RideDefinition {
    pub fn new(name: impl Into<String>, base_earnings_per_minute: f64, unlock_price: f64) -> Self {
        Self { name: name.into(), base_earnings_per_minute, unlock_price }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RideDefinition>", into = "Vec<RideDefinition>")]
pub struct RideCatalog {
    rides: Vec<RideDefinition>,
}

impl RideCatalog {
    /// Validate and freeze an ordered ride list.
    pub fn new(rides: Vec<RideDefinition>) -> Result<Self, CatalogError> {
        if rides.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut previous = 0.0_f64;
        for (index, ride) in rides.iter().enumerate() {
            let bad = |field| CatalogError::BadNumber { index, name: ride.name.clone(), field };
            let earnings = ride.base_earnings_per_minute;
            if !(earnings.is_finite() && earnings >= 0.0) {
                return Err(bad("base earnings"));
            }
            if !(ride.unlock_price.is_finite() && ride.unlock_price >= 0.0) {
                return Err(bad("unlock price"));
            }
            if ride.unlock_price < previous {
                return Err(CatalogError::PriceDecreases {
                    index,
                    price: ride.unlock_price,
                    previous,
                });
            }
            previous = ride.unlock_price;
        }
        Ok(Self { rides })
    }

    pub fn len(&self) -> usize {
        self.rides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RideDefinition> {
        self.rides.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RideDefinition> {
        self.rides.iter()
    }
}

impl Default for RideCatalog {
    /// The five-ride park: each unlock is roughly a 10x jump.
    fn default() -> Self {
        Self {
            rides: vec![
                RideDefinition::new("Shooting Range", 2.0, 0.0),
                RideDefinition::new("Haunted House", 5.0, 5_000.0),
                RideDefinition::new("Ferris Wheel", 10.0, 50_000.0),
                RideDefinition::new("Roller Coaster", 20.0, 500_000.0),
                RideDefinition::new("Drop Tower", 40.0, 5_000_000.0),
            ],
        }
    }
}

impl TryFrom<Vec<RideDefinition>> for RideCatalog {
    type Error = CatalogError;
    fn try_from(rides: Vec<RideDefinition>) -> Result<Self, Self::Error> {
        Self::new(rides)
    }
}

impl From<RideCatalog> for Vec<RideDefinition> {
    fn from(c: RideCatalog) -> Self {
        c.rides
    }
}

impl<'a> IntoIterator for &'a RideCatalog {
    type Item = &'a RideDefinition;
    type IntoIter = std::slice::Iter<'a, RideDefinition>;
    fn into_iter(self) -> Self::IntoIter {
        self.rides.iter()
    }
}

/// Economy constants.
///
/// Deserializing checks the values with [`Tuning::validate`]; missing
/// fields take their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TuningFields")]
pub struct Tuning {
    /// Level multiplier gain per level up to `level_kink`.
    pub level_step: f64,
    pub level_kink: u32,
    /// Level multiplier gain per level past the kink.
    pub post_kink_step: f64,
    /// Weight of `log10(minutes + 1)` in the time multiplier.
    pub time_damping: f64,
    pub upgrade_base_floor: f64,
    pub upgrade_base_divisor: f64,
    /// Ratio between successive upgrade costs; must be > 1.
    pub upgrade_growth: f64,
}

impl Tuning {
    /// Reject constants that would break the economy: a growth ratio at or
    /// below 1 (costs stop rising), a zero cost base, or negative or
    /// non-finite multiplier gains.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let checks = [
            ("level_step", self.level_step, self.level_step >= 0.0),
            ("post_kink_step", self.post_kink_step, self.post_kink_step >= 0.0),
            ("time_damping", self.time_damping, self.time_damping >= 0.0),
            ("upgrade_base_floor", self.upgrade_base_floor, self.upgrade_base_floor > 0.0),
            ("upgrade_base_divisor", self.upgrade_base_divisor, self.upgrade_base_divisor > 0.0),
            ("upgrade_growth", self.upgrade_growth, self.upgrade_growth > 1.0),
        ];
        match checks.into_iter().find(|&(_, value, ok)| !(ok && value.is_finite())) {
            Some((field, value, _)) => Err(CatalogError::BadTuning { field, value }),
            None => Ok(()),
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            level_step: 0.5,
            level_kink: 10,
            post_kink_step: 0.1,
            time_damping: 0.5,
            upgrade_base_floor: 100.0,
            upgrade_base_divisor: 50.0,
            upgrade_growth: 1.3,
        }
    }
}

/// Unchecked wire form of [`Tuning`].
#[derive(Deserialize)]
#[serde(default)]
struct TuningFields {
    level_step: f64,
    level_kink: u32,
    post_kink_step: f64,
    time_damping: f64,
    upgrade_base_floor: f64,
    upgrade_base_divisor: f64,
    upgrade_growth: f64,
}

impl Default for TuningFields {
    fn default() -> Self {
        let t = Tuning::default();
        Self {
            level_step: t.level_step,
            level_kink: t.level_kink,
            post_kink_step: t.post_kink_step,
            time_damping: t.time_damping,
            upgrade_base_floor: t.upgrade_base_floor,
            upgrade_base_divisor: t.upgrade_base_divisor,
            upgrade_growth: t.upgrade_growth,
        }
    }
}

impl TryFrom<TuningFields> for Tuning {
    type Error = CatalogError;
    fn try_from(f: TuningFields) -> Result<Self, Self::Error> {
        let tuning = Self {
            level_step: f.level_step,
            level_kink: f.level_kink,
            post_kink_step: f.post_kink_step,
            time_damping: f.time_damping,
            upgrade_base_floor: f.upgrade_base_floor,
            upgrade_base_divisor: f.upgrade_base_divisor,
            upgrade_growth: f.upgrade_growth,
        };
        tuning.validate()?;
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_park_is_valid() {
        let c = RideCatalog::default();
        assert_eq!(RideCatalog::new(c.clone().into()), Ok(c.clone()));
        assert_eq!(c.len(), 5);
        assert_eq!(c.get(0).map(|r| r.name.as_str()), Some("Shooting Range"));
        assert!(c.get(5).is_none());
    }

    #[test]
    fn rejects_decreasing_prices() {
        let err = RideCatalog::new(vec![
            RideDefinition::new("A", 1.0, 100.0),
            RideDefinition::new("B", 1.0, 50.0),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::PriceDecreases { index: 1, .. }));
    }

    #[test]
    fn rejects_empty_and_negative() {
        assert_eq!(RideCatalog::new(vec![]), Err(CatalogError::Empty));
        let err = RideCatalog::new(vec![RideDefinition::new("A", -1.0, 0.0)]).unwrap_err();
        assert!(matches!(err, CatalogError::BadNumber { index: 0, field: "base earnings", .. }));
    }

    #[test]
    fn deserializing_validates() {
        let json = r#"[{"name":"A","base_earnings_per_minute":1,"unlock_price":10},
                       {"name":"B","base_earnings_per_minute":2,"unlock_price":5}]"#;
        assert!(serde_json::from_str::<RideCatalog>(json).is_err());
    }

    #[test]
    fn default_tuning_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn tuning_rejects_flat_or_free_upgrades() {
        let flat = Tuning { upgrade_growth: 1.0, ..Tuning::default() };
        assert_eq!(
            flat.validate(),
            Err(CatalogError::BadTuning { field: "upgrade_growth", value: 1.0 })
        );
        let free = Tuning { upgrade_base_floor: 0.0, ..Tuning::default() };
        assert!(matches!(
            free.validate(),
            Err(CatalogError::BadTuning { field: "upgrade_base_floor", .. })
        ));
        let nan = Tuning { time_damping: f64::NAN, ..Tuning::default() };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn tuning_deserializes_with_defaults_and_checks() {
        let t: Tuning = serde_json::from_str(r#"{"upgrade_growth": 1.6}"#).unwrap();
        assert_eq!(t, Tuning { upgrade_growth: 1.6, ..Tuning::default() });
        assert!(serde_json::from_str::<Tuning>(r#"{"upgrade_base_divisor": -5}"#).is_err());
    }
}
