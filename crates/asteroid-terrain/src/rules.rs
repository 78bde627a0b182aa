//! Declarative material rules.
//!
//! Each rule owns a radial band (as a fraction of the local body radius)
//! and optional targets for the two noise channels. A sample matches when
//! it falls inside the band and the *summed* deviation of every configured
//! channel from its target stays strictly below the rule's single allowance.
//! Rules are evaluated in priority order; the first match wins.

use serde::{Deserialize, Serialize};

use crate::cell::{FloorMaterial, WallMaterial};
use crate::error::TerrainError;

/// Reshapes a rule's allowance by how deep into its band a sample falls.
///
/// `position` is `0.0` at the band start and `1.0` at the band end.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AllowanceModifier {
    /// `above_value` when `position > above`, otherwise `below_value`.
    Threshold {
        above: f64,
        below_value: f64,
        above_value: f64,
    },
    /// Linear interpolation from `from` at the band start to `to` at its end.
    Linear { from: f64, to: f64 },
    /// The base allowance scaled by a factor interpolated from `start` to `end`.
    Scale { start: f64, end: f64 },
}

impl AllowanceModifier {
    pub fn apply(&self, base: f64, position: f64) -> f64 {
        match *self {
            Self::Threshold {
                above,
                below_value,
                above_value,
            } => {
                if position > above {
                    above_value
                } else {
                    below_value
                }
            }
            Self::Linear { from, to } => from + (to - from) * position,
            Self::Scale { start, end } => base * (start + (end - start) * position),
        }
    }
}

/// Configuration bundle for one [`MaterialRule`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleParams {
    pub wall: Option<WallMaterial>,
    pub floor: Option<FloorMaterial>,
    /// Inclusive start of the radial band.
    pub start_distance: f64,
    /// Inclusive end of the radial band.
    pub end_distance: f64,
    pub noise1_target: Option<f64>,
    pub noise2_target: Option<f64>,
    /// Tolerance shared by all configured noise targets.
    pub base_allowance: f64,
    pub allowance_modifier: Option<AllowanceModifier>,
}

impl Default for RuleParams {
    fn default() -> Self {
        Self {
            wall: None,
            floor: None,
            start_distance: 0.0,
            end_distance: 1.0,
            noise1_target: None,
            noise2_target: None,
            base_allowance: 0.0,
            allowance_modifier: None,
        }
    }
}

/// A named, validated predicate over `(distance%, noise1, noise2)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRule")]
pub struct MaterialRule {
    name: String,
    params: RuleParams,
}

/// Unvalidated rule as read from a config file.
#[derive(Deserialize)]
struct RawRule {
    name: String,
    #[serde(default)]
    params: RuleParams,
}

impl TryFrom<RawRule> for MaterialRule {
    type Error = TerrainError;

    fn try_from(rule: RawRule) -> Result<Self, Self::Error> {
        MaterialRule::new(rule.name, rule.params)
    }
}

impl MaterialRule {
    /// Create a rule, rejecting malformed bands and allowances.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidRuleBand`] if the band bounds are not
    /// finite, negative, or `end_distance < start_distance`, and
    /// [`TerrainError::InvalidParams`] for a negative or non-finite allowance.
    pub fn new(name: impl Into<String>, params: RuleParams) -> Result<Self, TerrainError> {
        let name = name.into();
        let (start, end) = (params.start_distance, params.end_distance);
        if !start.is_finite() || !end.is_finite() || start < 0.0 || end < start {
            return Err(TerrainError::InvalidRuleBand { name, start, end });
        }
        if !params.base_allowance.is_finite() || params.base_allowance < 0.0 {
            return Err(TerrainError::InvalidParams(format!(
                "rule '{name}' has invalid allowance {}",
                params.base_allowance
            )));
        }
        Ok(Self { name, params })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &RuleParams {
        &self.params
    }

    /// The materials this rule assigns when it matches.
    pub fn payload(&self) -> (Option<WallMaterial>, Option<FloorMaterial>) {
        (self.params.wall, self.params.floor)
    }

    /// Returns `true` if the sample falls in this rule's band and the summed
    /// noise deviation is strictly below the (possibly modified) allowance.
    pub fn matches(&self, distance: f64, noise1: f64, noise2: f64) -> bool {
        let p = &self.params;
        // Also rejects NaN distances.
        if !(p.start_distance..=p.end_distance).contains(&distance) {
            return false;
        }

        let mut allowance = p.base_allowance;
        if let Some(modifier) = &p.allowance_modifier {
            let width = p.end_distance - p.start_distance;
            let position = if width > 0.0 {
                (distance - p.start_distance) / width
            } else {
                0.0
            };
            allowance = modifier.apply(p.base_allowance, position);
        }

        let mut total_deviation = 0.0;
        if let Some(target) = p.noise1_target {
            total_deviation += (noise1 - target).abs();
        }
        if let Some(target) = p.noise2_target {
            total_deviation += (noise2 - target).abs();
        }

        total_deviation < allowance
    }
}

/// Immutable, priority-ordered collection of rules.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialRuleSet {
    rules: Vec<MaterialRule>,
}

impl MaterialRuleSet {
    /// Wrap rules in priority order (index 0 is tried first).
    pub fn new(rules: Vec<MaterialRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[MaterialRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the first rule matching the sample.
    pub fn classify_rule(&self, distance: f64, noise1: f64, noise2: f64) -> Option<&MaterialRule> {
        self.rules.iter().find(|r| r.matches(distance, noise1, noise2))
    }

    /// Classify a sample into `(wall, floor)`; no match means empty space.
    pub fn classify(
        &self,
        distance: f64,
        noise1: f64,
        noise2: f64,
    ) -> (Option<WallMaterial>, Option<FloorMaterial>) {
        self.classify_rule(distance, noise1, noise2)
            .map(MaterialRule::payload)
            .unwrap_or((None, None))
    }
}

/// The stock asteroid rule table, highest priority first.
///
/// Noise values are in `[0, 1]`; distances are fractions of the local
/// `radius + perimeter`. Anything past `1.0` is space.
pub fn default_rules() -> MaterialRuleSet {
    use FloorMaterial as F;
    use WallMaterial as W;

    let table: Vec<(&str, RuleParams)> = vec![
        (
            // Outer shell, thickening from nothing at 0.9 to solid at the rim.
            "shell",
            RuleParams {
                wall: Some(W::SolidRock),
                floor: Some(F::Floor),
                start_distance: 0.9,
                end_distance: 1.0,
                noise1_target: Some(0.5),
                base_allowance: 0.0,
                allowance_modifier: Some(AllowanceModifier::Linear { from: 0.1, to: 1.2 }),
                ..Default::default()
            },
        ),
        (
            "lava_pool",
            RuleParams {
                floor: Some(F::Lava),
                start_distance: 0.0,
                end_distance: 0.3,
                noise2_target: Some(0.3),
                base_allowance: 0.08,
                allowance_modifier: Some(AllowanceModifier::Scale { start: 1.0, end: 0.0 }),
                ..Default::default()
            },
        ),
        (
            "lava_cracks",
            RuleParams {
                wall: Some(W::Rock),
                floor: Some(F::LavaCracks),
                start_distance: 0.0,
                end_distance: 0.45,
                noise2_target: Some(0.3),
                base_allowance: 0.14,
                allowance_modifier: Some(AllowanceModifier::Scale { start: 1.0, end: 0.2 }),
                ..Default::default()
            },
        ),
        (
            "diamond",
            RuleParams {
                wall: Some(W::Diamond),
                floor: Some(F::Floor),
                start_distance: 0.0,
                end_distance: 0.4,
                noise1_target: Some(0.85),
                noise2_target: Some(0.6),
                base_allowance: 0.07,
                ..Default::default()
            },
        ),
        (
            "ruby",
            RuleParams {
                wall: Some(W::Ruby),
                floor: Some(F::Floor),
                start_distance: 0.2,
                end_distance: 0.6,
                noise1_target: Some(0.15),
                noise2_target: Some(0.7),
                base_allowance: 0.08,
                ..Default::default()
            },
        ),
        (
            "gold",
            RuleParams {
                wall: Some(W::Gold),
                floor: Some(F::Floor),
                start_distance: 0.3,
                end_distance: 0.8,
                noise1_target: Some(0.78),
                base_allowance: 0.035,
                ..Default::default()
            },
        ),
        (
            "explosive",
            RuleParams {
                wall: Some(W::ExplosiveRock),
                floor: Some(F::Floor),
                start_distance: 0.15,
                end_distance: 0.85,
                noise1_target: Some(0.4),
                noise2_target: Some(0.85),
                base_allowance: 0.05,
                ..Default::default()
            },
        ),
        (
            "nickel",
            RuleParams {
                wall: Some(W::Nickel),
                floor: Some(F::Floor),
                start_distance: 0.4,
                end_distance: 0.95,
                noise1_target: Some(0.25),
                base_allowance: 0.04,
                ..Default::default()
            },
        ),
        (
            // Open caves; only past the middle third of their band.
            "cave",
            RuleParams {
                floor: Some(F::Floor),
                start_distance: 0.2,
                end_distance: 0.85,
                noise1_target: Some(0.55),
                base_allowance: 0.0,
                allowance_modifier: Some(AllowanceModifier::Threshold {
                    above: 0.33,
                    below_value: 0.0,
                    above_value: 0.04,
                }),
                ..Default::default()
            },
        ),
        (
            "loose_rock",
            RuleParams {
                wall: Some(W::LooseRock),
                floor: Some(F::Floor),
                start_distance: 0.65,
                end_distance: 1.0,
                noise2_target: Some(0.5),
                base_allowance: 0.12,
                ..Default::default()
            },
        ),
        (
            "rock",
            RuleParams {
                wall: Some(W::Rock),
                floor: Some(F::Floor),
                start_distance: 0.0,
                end_distance: 1.0,
                base_allowance: 1.0,
                ..Default::default()
            },
        ),
    ];

    // Stock bands and allowances are checked by `test_stock_rules_pass_validation`.
    let rules = table
        .into_iter()
        .map(|(name, params)| MaterialRule {
            name: name.to_string(),
            params,
        })
        .collect();
    MaterialRuleSet::new(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(params: RuleParams) -> MaterialRule {
        MaterialRule::new("test", params).unwrap()
    }

    #[test]
    fn test_single_channel_within_allowance() {
        let r = rule(RuleParams {
            start_distance: 0.3,
            end_distance: 0.6,
            noise1_target: Some(0.5),
            base_allowance: 0.05,
            ..Default::default()
        });
        assert!(r.matches(0.47, 0.5, 0.1));
    }

    #[test]
    fn test_allowance_is_shared_across_channels() {
        let r = rule(RuleParams {
            start_distance: 0.3,
            end_distance: 0.6,
            noise1_target: Some(0.5),
            noise2_target: Some(0.8),
            base_allowance: 0.05,
            ..Default::default()
        });
        assert!(
            !r.matches(0.46, 0.46, 0.84),
            "0.04 + 0.04 exceeds the single 0.05 allowance even though each channel is within it"
        );
        assert!(r.matches(0.46, 0.48, 0.82), "0.02 + 0.02 fits under 0.05");
    }

    #[test]
    fn test_allowance_modifier_uses_position_in_band() {
        let r = rule(RuleParams {
            start_distance: 0.1,
            end_distance: 0.2,
            noise1_target: Some(0.5),
            base_allowance: 0.0,
            allowance_modifier: Some(AllowanceModifier::Threshold {
                above: 0.8,
                below_value: 0.0,
                above_value: 1.0,
            }),
            ..Default::default()
        });
        assert!(!r.matches(0.17, 0.48, 0.0), "position 0.7 keeps allowance at 0");
        assert!(r.matches(0.19, 0.48, 0.0), "position 0.9 opens allowance to 1");
    }

    #[test]
    fn test_never_matches_outside_band() {
        let r = rule(RuleParams {
            start_distance: 0.3,
            end_distance: 0.6,
            base_allowance: 10.0,
            ..Default::default()
        });
        for &d in &[0.0, 0.29, 0.6001, 1.0, 5.0] {
            for &n in &[0.0, 0.5, 1.0] {
                assert!(!r.matches(d, n, n), "matched at distance {d} outside [0.3, 0.6]");
            }
        }
        assert!(r.matches(0.3, 0.0, 0.0), "band start is inclusive");
        assert!(r.matches(0.6, 0.0, 0.0), "band end is inclusive");
    }

    #[test]
    fn test_nan_distance_never_matches() {
        let r = rule(RuleParams {
            start_distance: 0.3,
            end_distance: 0.6,
            base_allowance: 1.0,
            ..Default::default()
        });
        assert!(!r.matches(f64::NAN, 0.5, 0.5));
        let catch_all = rule(RuleParams {
            base_allowance: 1.0,
            ..Default::default()
        });
        assert!(!catch_all.matches(f64::NAN, 0.5, 0.5), "a NaN sample belongs to no band");
    }

    #[test]
    fn test_match_is_strictly_below_allowance() {
        let r = rule(RuleParams {
            noise1_target: Some(0.5),
            base_allowance: 0.25,
            ..Default::default()
        });
        assert!(!r.matches(0.5, 0.75, 0.0), "deviation equal to allowance must not match");
        assert!(r.matches(0.5, 0.74, 0.0));

        let closed = rule(RuleParams::default());
        assert!(!closed.matches(0.5, 0.5, 0.5), "zero allowance never matches");
    }

    #[test]
    fn test_unconfigured_channel_does_not_constrain() {
        let r = rule(RuleParams {
            noise2_target: Some(0.2),
            base_allowance: 0.05,
            ..Default::default()
        });
        for &n1 in &[0.0, 0.5, 1.0] {
            assert!(r.matches(0.5, n1, 0.21), "noise1 {n1} should be ignored");
        }
    }

    #[test]
    fn test_modifier_variants() {
        let linear = AllowanceModifier::Linear { from: 0.0, to: 1.0 };
        assert!((linear.apply(5.0, 0.25) - 0.25).abs() < 1e-12);

        let scale = AllowanceModifier::Scale { start: 1.0, end: 0.0 };
        assert!((scale.apply(0.4, 0.5) - 0.2).abs() < 1e-12);
        assert_eq!(scale.apply(0.4, 1.0), 0.0);

        let threshold = AllowanceModifier::Threshold {
            above: 0.5,
            below_value: 0.1,
            above_value: 0.9,
        };
        assert_eq!(threshold.apply(0.0, 0.5), 0.1);
        assert_eq!(threshold.apply(0.0, 0.51), 0.9);
    }

    #[test]
    fn test_zero_width_band_with_modifier() {
        let r = rule(RuleParams {
            start_distance: 0.5,
            end_distance: 0.5,
            base_allowance: 0.0,
            allowance_modifier: Some(AllowanceModifier::Linear { from: 1.0, to: 0.0 }),
            ..Default::default()
        });
        assert!(r.matches(0.5, 0.3, 0.3), "zero-width band uses position 0");
        assert!(!r.matches(0.50001, 0.3, 0.3));
    }

    #[test]
    fn test_invalid_band_rejected_at_construction() {
        let inverted = MaterialRule::new(
            "inverted",
            RuleParams {
                start_distance: 0.6,
                end_distance: 0.3,
                ..Default::default()
            },
        );
        assert!(matches!(inverted, Err(TerrainError::InvalidRuleBand { .. })));

        let nan = MaterialRule::new(
            "nan",
            RuleParams {
                end_distance: f64::NAN,
                ..Default::default()
            },
        );
        assert!(nan.is_err());

        let negative = MaterialRule::new(
            "negative",
            RuleParams {
                base_allowance: -0.1,
                ..Default::default()
            },
        );
        assert!(matches!(negative, Err(TerrainError::InvalidParams(_))));
    }

    #[test]
    fn test_first_match_wins() {
        let gold = rule(RuleParams {
            wall: Some(WallMaterial::Gold),
            base_allowance: 1.0,
            ..Default::default()
        });
        let rock = rule(RuleParams {
            wall: Some(WallMaterial::Rock),
            base_allowance: 1.0,
            ..Default::default()
        });
        let set = MaterialRuleSet::new(vec![gold, rock]);
        assert_eq!(set.classify(0.5, 0.5, 0.5), (Some(WallMaterial::Gold), None));
    }

    #[test]
    fn test_no_match_yields_empty_space() {
        let set = default_rules();
        assert_eq!(set.classify(1.5, 0.5, 0.5), (None, None));
        assert_eq!(MaterialRuleSet::default().classify(0.5, 0.5, 0.5), (None, None));
    }

    #[test]
    fn test_stock_rules_pass_validation() {
        let set = default_rules();
        assert_eq!(set.len(), 11);
        for stock in set.rules() {
            match MaterialRule::new(stock.name(), stock.params().clone()) {
                Ok(rebuilt) => assert_eq!(&rebuilt, stock),
                Err(e) => panic!("stock rule '{}' is invalid: {e}", stock.name()),
            }
        }
    }

    #[test]
    fn test_default_rules_cover_the_whole_body() {
        let set = default_rules();
        for di in 0..=100 {
            let d = di as f64 / 100.0;
            for ni in 0..=10 {
                let n = ni as f64 / 10.0;
                let (wall, floor) = set.classify(d, n, 1.0 - n);
                assert!(
                    wall.is_some() || floor.is_some(),
                    "distance {d} noise {n} fell through every rule"
                );
            }
        }
    }

    #[test]
    fn test_default_rules_produce_deep_materials_only_deep() {
        let set = default_rules();
        // The diamond target exactly, but outside its band.
        let (wall, _) = set.classify(0.7, 0.85, 0.6);
        assert_ne!(wall, Some(WallMaterial::Diamond));
        let (wall, _) = set.classify(0.1, 0.85, 0.6);
        assert_eq!(wall, Some(WallMaterial::Diamond));
    }

    #[test]
    fn test_rule_set_serializes_and_validates_on_load() {
        let set = default_rules();
        let text = ron::to_string(&set).unwrap();
        let back: MaterialRuleSet = ron::from_str(&text).unwrap();
        assert_eq!(set, back);

        let bad = "[(name: \"bad\", params: (start_distance: 0.9, end_distance: 0.1))]";
        assert!(ron::from_str::<MaterialRuleSet>(bad).is_err());
    }
}
