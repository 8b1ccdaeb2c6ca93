//! Ruleset Configuration
//!
//! A `RulesetConfig` is a plain value tree. Mutually exclusive rule groups are
//! enums, independent toggles are booleans. Its identity is the keccak hash of
//! its canonical encoding (`proof::encode::ruleset_id`).

use serde::{Deserialize, Serialize};

/// The only ruleset scheme this engine understands.
pub const RULESET_SCHEME_V1: u8 = 1;

/// How the card played each turn is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum CardSelectionMode {
    /// The transcript chooses freely.
    #[default]
    None = 0,
    /// Cards are played in deck order.
    Order = 1,
    /// The card is a deterministic pseudo-random pick.
    Chaos = 2,
}

/// Which hand cards are revealed to the opponent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum OpenRuleMode {
    /// Hands are hidden.
    #[default]
    None = 0,
    /// Both hands are fully revealed.
    AllOpen = 1,
    /// Three cards of each hand are revealed.
    ThreeOpen = 2,
}

/// Trait placement-count edge modifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum TypeRuleMode {
    /// No modifier.
    #[default]
    None = 0,
    /// Same-trait placements strengthen edges.
    TypeAscend = 1,
    /// Same-trait placements weaken edges.
    TypeDescend = 2,
}

/// Tactics section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TacticsConfig {
    /// Flip-count combos queue a bonus for the next placement.
    pub combo_bonus: bool,
    /// Flips needed for a momentum combo (+1).
    pub momentum_threshold: u8,
    /// Flips needed for a domination combo (+2).
    pub domination_threshold: u8,
    /// Flips needed for a fever combo (+3).
    pub fever_threshold: u8,
    /// Players may place warning marks.
    pub warning_mark: bool,
    /// Warning marks each player may place per match.
    pub warning_mark_limit: u8,
    /// The second player starts with a +1 bonus on their first placement.
    pub second_player_balance: bool,
    /// Earth cards may boost one edge on placement.
    pub earth_boost: bool,
}

impl TacticsConfig {
    /// Are the enabled (non-zero) combo thresholds strictly increasing?
    pub fn combo_thresholds_ordered(&self) -> bool {
        let enabled: Vec<u8> = [self.momentum_threshold, self.domination_threshold, self.fever_threshold]
            .into_iter()
            .filter(|t| *t > 0)
            .collect();
        enabled.windows(2).all(|w| w[0] < w[1])
    }
}

impl Default for TacticsConfig {
    fn default() -> Self {
        Self {
            combo_bonus: false,
            momentum_threshold: 3,
            domination_threshold: 4,
            fever_threshold: 5,
            warning_mark: false,
            warning_mark_limit: 3,
            second_player_balance: false,
            earth_boost: false,
        }
    }
}

/// Complete ruleset for one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulesetConfig {
    /// Encoding scheme of this config.
    pub scheme: u8,
    /// Card selection group.
    pub card_selection: CardSelectionMode,
    /// Open-hand group.
    pub open_rule: OpenRuleMode,
    /// Type modifier group.
    pub type_rule: TypeRuleMode,
    /// Exchange one deck slot between players before turn 0.
    pub swap: bool,
    /// Lower edges win.
    pub reverse: bool,
    /// An edge of 1 beats an edge of 10.
    pub ace_killer: bool,
    /// Plus special capture.
    pub plus: bool,
    /// Same special capture.
    pub same: bool,
    /// Detect trait formations.
    pub formations: bool,
    /// Tactics section.
    pub tactics: TacticsConfig,
}

impl Default for RulesetConfig {
    fn default() -> Self {
        Self {
            scheme: RULESET_SCHEME_V1,
            card_selection: CardSelectionMode::None,
            open_rule: OpenRuleMode::None,
            type_rule: TypeRuleMode::None,
            swap: false,
            reverse: false,
            ace_killer: false,
            plus: false,
            same: false,
            formations: false,
            tactics: TacticsConfig::default(),
        }
    }
}

impl RulesetConfig {
    /// Preset with formations and every tactic switched on.
    pub fn tactical() -> Self {
        Self {
            formations: true,
            tactics: TacticsConfig {
                combo_bonus: true,
                warning_mark: true,
                second_player_balance: true,
                earth_boost: true,
                ..TacticsConfig::default()
            },
            ..Self::default()
        }
    }

    /// Set the card selection mode.
    #[must_use]
    pub fn with_card_selection(mut self, mode: CardSelectionMode) -> Self {
        self.card_selection = mode;
        self
    }

    /// Set the open-hand mode.
    #[must_use]
    pub fn with_open_rule(mut self, mode: OpenRuleMode) -> Self {
        self.open_rule = mode;
        self
    }

    /// Set the type rule mode.
    #[must_use]
    pub fn with_type_rule(mut self, mode: TypeRuleMode) -> Self {
        self.type_rule = mode;
        self
    }

    /// Toggle swap.
    #[must_use]
    pub fn with_swap(mut self, on: bool) -> Self {
        self.swap = on;
        self
    }

    /// Toggle reverse.
    #[must_use]
    pub fn with_reverse(mut self, on: bool) -> Self {
        self.reverse = on;
        self
    }

    /// Toggle ace killer.
    #[must_use]
    pub fn with_ace_killer(mut self, on: bool) -> Self {
        self.ace_killer = on;
        self
    }

    /// Toggle plus.
    #[must_use]
    pub fn with_plus(mut self, on: bool) -> Self {
        self.plus = on;
        self
    }

    /// Toggle same.
    #[must_use]
    pub fn with_same(mut self, on: bool) -> Self {
        self.same = on;
        self
    }

    /// Load from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The subset of rules the combat resolver reads.
    pub fn combat_rules(&self) -> CombatRules {
        CombatRules {
            reverse: self.reverse,
            ace_killer: self.ace_killer,
            type_rule: self.type_rule,
            same: self.same,
            plus: self.plus,
        }
    }
}

/// Rules consulted on every edge comparison, resolved once per match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatRules {
    /// Lower edges win.
    pub reverse: bool,
    /// An edge of 1 beats an edge of 10.
    pub ace_killer: bool,
    /// Type modifier mode.
    pub type_rule: TypeRuleMode,
    /// Same special capture.
    pub same: bool,
    /// Plus special capture.
    pub plus: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_plain_rules() {
        let rules = RulesetConfig::default();
        assert_eq!(rules.scheme, RULESET_SCHEME_V1);
        assert_eq!(rules.card_selection, CardSelectionMode::None);
        assert!(!rules.reverse && !rules.same && !rules.plus);
        assert!(!rules.tactics.combo_bonus);
        assert_eq!(rules.combat_rules(), CombatRules::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let rules = RulesetConfig::from_json(
            r#"{ "cardSelection": "chaos", "reverse": true, "tactics": { "comboBonus": true } }"#,
        )
        .unwrap();

        assert_eq!(rules.card_selection, CardSelectionMode::Chaos);
        assert!(rules.reverse);
        assert!(rules.tactics.combo_bonus);
        assert_eq!(rules.tactics.fever_threshold, 5);
        assert_eq!(rules.scheme, RULESET_SCHEME_V1);
    }

    #[test]
    fn test_combo_threshold_order() {
        assert!(TacticsConfig::default().combo_thresholds_ordered());

        let zeroed = TacticsConfig { momentum_threshold: 0, ..TacticsConfig::default() };
        assert!(zeroed.combo_thresholds_ordered());

        let inverted = TacticsConfig { momentum_threshold: 5, fever_threshold: 3, ..TacticsConfig::default() };
        assert!(!inverted.combo_thresholds_ordered());

        let equal = TacticsConfig { domination_threshold: 3, ..TacticsConfig::default() };
        assert!(!equal.combo_thresholds_ordered());
    }

    #[test]
    fn test_json_roundtrip() {
        let rules = RulesetConfig::tactical()
            .with_type_rule(TypeRuleMode::TypeDescend)
            .with_open_rule(OpenRuleMode::ThreeOpen);
        let json = serde_json::to_string(&rules).unwrap();
        assert!(json.contains("\"typeDescend\""));
        assert_eq!(RulesetConfig::from_json(&json).unwrap(), rules);
    }
}
