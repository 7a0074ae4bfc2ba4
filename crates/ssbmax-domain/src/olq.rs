//! Officer-Like Qualities and the SSB factors that group them

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the 15 Officer-Like Qualities assessed at SSB
///
/// Declaration order is significant: it is the tie-break order used wherever
/// qualities with equal scores are ranked.
///
/// Factor grouping:
/// - Factor I (Planning & Organizing): EI, RA, OA, PoE
/// - Factor II (Social Adjustment): SA, CO-OP, SoR
/// - Factor III (Social Effectiveness): INI, SC, SoD, AIG, LIV
/// - Factor IV (Dynamic): DET, COU, STA
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Olq {
    /// Effective Intelligence
    EffectiveIntelligence,
    /// Reasoning Ability (critical)
    ReasoningAbility,
    /// Organizing Ability
    OrganizingAbility,
    /// Power of Expression
    PowerOfExpression,
    /// Social Adjustment (critical)
    SocialAdjustment,
    /// Cooperation (critical)
    Cooperation,
    /// Sense of Responsibility (critical)
    SenseOfResponsibility,
    /// Initiative
    Initiative,
    /// Self Confidence
    SelfConfidence,
    /// Speed of Decision
    SpeedOfDecision,
    /// Ability to Influence Group
    InfluenceGroup,
    /// Liveliness (critical)
    Liveliness,
    /// Determination
    Determination,
    /// Courage (critical)
    Courage,
    /// Stamina
    Stamina,
}

impl Olq {
    /// All qualities in declaration order
    pub const ALL: [Olq; 15] = [
        Olq::EffectiveIntelligence,
        Olq::ReasoningAbility,
        Olq::OrganizingAbility,
        Olq::PowerOfExpression,
        Olq::SocialAdjustment,
        Olq::Cooperation,
        Olq::SenseOfResponsibility,
        Olq::Initiative,
        Olq::SelfConfidence,
        Olq::SpeedOfDecision,
        Olq::InfluenceGroup,
        Olq::Liveliness,
        Olq::Determination,
        Olq::Courage,
        Olq::Stamina,
    ];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Olq::EffectiveIntelligence => "Effective Intelligence",
            Olq::ReasoningAbility => "Reasoning Ability",
            Olq::OrganizingAbility => "Organizing Ability",
            Olq::PowerOfExpression => "Power of Expression",
            Olq::SocialAdjustment => "Social Adjustment",
            Olq::Cooperation => "Cooperation",
            Olq::SenseOfResponsibility => "Sense of Responsibility",
            Olq::Initiative => "Initiative",
            Olq::SelfConfidence => "Self Confidence",
            Olq::SpeedOfDecision => "Speed of Decision",
            Olq::InfluenceGroup => "Ability to Influence Group",
            Olq::Liveliness => "Liveliness",
            Olq::Determination => "Determination",
            Olq::Courage => "Courage",
            Olq::Stamina => "Stamina",
        }
    }

    /// Conventional SSB abbreviation (EI, RA, CO-OP, ...)
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Olq::EffectiveIntelligence => "EI",
            Olq::ReasoningAbility => "RA",
            Olq::OrganizingAbility => "OA",
            Olq::PowerOfExpression => "PoE",
            Olq::SocialAdjustment => "SA",
            Olq::Cooperation => "CO-OP",
            Olq::SenseOfResponsibility => "SoR",
            Olq::Initiative => "INI",
            Olq::SelfConfidence => "SC",
            Olq::SpeedOfDecision => "SoD",
            Olq::InfluenceGroup => "AIG",
            Olq::Liveliness => "LIV",
            Olq::Determination => "DET",
            Olq::Courage => "COU",
            Olq::Stamina => "STA",
        }
    }

    /// Factor this quality belongs to
    pub fn category(&self) -> OlqCategory {
        match self {
            Olq::EffectiveIntelligence
            | Olq::ReasoningAbility
            | Olq::OrganizingAbility
            | Olq::PowerOfExpression => OlqCategory::Intellectual,
            Olq::SocialAdjustment | Olq::Cooperation | Olq::SenseOfResponsibility => {
                OlqCategory::Social
            }
            Olq::Initiative
            | Olq::SelfConfidence
            | Olq::SpeedOfDecision
            | Olq::InfluenceGroup
            | Olq::Liveliness => OlqCategory::Dynamic,
            Olq::Determination | Olq::Courage | Olq::Stamina => OlqCategory::Character,
        }
    }

    /// Whether a limitation in this quality warrants special attention
    ///
    /// RA, all of Factor II, LIV and COU.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Olq::ReasoningAbility
                | Olq::SocialAdjustment
                | Olq::Cooperation
                | Olq::SenseOfResponsibility
                | Olq::Liveliness
                | Olq::Courage
        )
    }

    /// Whether this quality belongs to Factor II (Social Adjustment)
    pub fn is_factor_ii(&self) -> bool {
        self.category() == OlqCategory::Social
    }

    /// Qualities in a category, in declaration order
    pub fn by_category(category: OlqCategory) -> Vec<Olq> {
        Self::ALL
            .iter()
            .copied()
            .filter(|olq| olq.category() == category)
            .collect()
    }

    /// All critical qualities
    pub fn critical_qualities() -> Vec<Olq> {
        Self::ALL.iter().copied().filter(Olq::is_critical).collect()
    }

    /// All Factor II qualities
    pub fn factor_ii_qualities() -> Vec<Olq> {
        Self::by_category(OlqCategory::Social)
    }

    /// Parse from the serialized name, the display name or the abbreviation
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim();
        Self::ALL.iter().copied().find(|olq| {
            olq.abbreviation().eq_ignore_ascii_case(needle)
                || olq.display_name().eq_ignore_ascii_case(needle)
                || olq.key().eq_ignore_ascii_case(needle)
        })
    }

    /// Serialized (SCREAMING_SNAKE_CASE) name
    pub fn key(&self) -> &'static str {
        match self {
            Olq::EffectiveIntelligence => "EFFECTIVE_INTELLIGENCE",
            Olq::ReasoningAbility => "REASONING_ABILITY",
            Olq::OrganizingAbility => "ORGANIZING_ABILITY",
            Olq::PowerOfExpression => "POWER_OF_EXPRESSION",
            Olq::SocialAdjustment => "SOCIAL_ADJUSTMENT",
            Olq::Cooperation => "COOPERATION",
            Olq::SenseOfResponsibility => "SENSE_OF_RESPONSIBILITY",
            Olq::Initiative => "INITIATIVE",
            Olq::SelfConfidence => "SELF_CONFIDENCE",
            Olq::SpeedOfDecision => "SPEED_OF_DECISION",
            Olq::InfluenceGroup => "INFLUENCE_GROUP",
            Olq::Liveliness => "LIVELINESS",
            Olq::Determination => "DETERMINATION",
            Olq::Courage => "COURAGE",
            Olq::Stamina => "STAMINA",
        }
    }
}

impl fmt::Display for Olq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Olq {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid OLQ: {}", s))
    }
}

/// SSB factor grouping related qualities
///
/// Consistency is judged per factor: Factors I and II tolerate a spread of
/// one tick, Factors III and IV two ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OlqCategory {
    /// Factor I: Planning & Organizing
    Intellectual,
    /// Factor II: Social Adjustment (critical factor)
    Social,
    /// Factor III: Social Effectiveness
    Dynamic,
    /// Factor IV: Dynamic
    Character,
}

impl OlqCategory {
    /// All categories in factor order
    pub const ALL: [OlqCategory; 4] = [
        OlqCategory::Intellectual,
        OlqCategory::Social,
        OlqCategory::Dynamic,
        OlqCategory::Character,
    ];

    /// Human-readable category name
    pub fn display_name(&self) -> &'static str {
        match self {
            OlqCategory::Intellectual => "Intellectual Qualities",
            OlqCategory::Social => "Social Qualities",
            OlqCategory::Dynamic => "Dynamic Qualities",
            OlqCategory::Character => "Character & Physical Qualities",
        }
    }

    /// SSB factor number (I=1 .. IV=4)
    pub fn factor_number(&self) -> u8 {
        match self {
            OlqCategory::Intellectual => 1,
            OlqCategory::Social => 2,
            OlqCategory::Dynamic => 3,
            OlqCategory::Character => 4,
        }
    }

    /// Official SSB factor name
    pub fn factor_name(&self) -> &'static str {
        match self {
            OlqCategory::Intellectual => "Planning & Organizing",
            OlqCategory::Social => "Social Adjustment",
            OlqCategory::Dynamic => "Social Effectiveness",
            OlqCategory::Character => "Dynamic",
        }
    }

    /// Maximum allowed score spread within this factor
    pub fn max_tick_variation(&self) -> u8 {
        match self {
            OlqCategory::Intellectual | OlqCategory::Social => 1,
            OlqCategory::Dynamic | OlqCategory::Character => 2,
        }
    }

    /// Whether a factor average at limitation level is an automatic rejection
    pub fn is_critical_factor(&self) -> bool {
        matches!(self, OlqCategory::Social)
    }
}

impl fmt::Display for OlqCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.factor_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifteen_qualities_in_four_factors() {
        assert_eq!(Olq::ALL.len(), 15);
        assert_eq!(Olq::by_category(OlqCategory::Intellectual).len(), 4);
        assert_eq!(Olq::by_category(OlqCategory::Social).len(), 3);
        assert_eq!(Olq::by_category(OlqCategory::Dynamic).len(), 5);
        assert_eq!(Olq::by_category(OlqCategory::Character).len(), 3);
    }

    #[test]
    fn test_critical_qualities() {
        let critical = Olq::critical_qualities();
        assert_eq!(
            critical,
            vec![
                Olq::ReasoningAbility,
                Olq::SocialAdjustment,
                Olq::Cooperation,
                Olq::SenseOfResponsibility,
                Olq::Liveliness,
                Olq::Courage,
            ]
        );
        assert!(!Olq::Stamina.is_critical());
    }

    #[test]
    fn test_factor_ii_membership() {
        assert!(Olq::Cooperation.is_factor_ii());
        assert!(!Olq::Initiative.is_factor_ii());
        assert_eq!(Olq::factor_ii_qualities().len(), 3);
    }

    #[test]
    fn test_declaration_order_is_ordering() {
        assert!(Olq::EffectiveIntelligence < Olq::ReasoningAbility);
        assert!(Olq::Courage < Olq::Stamina);
        let mut sorted = Olq::ALL;
        sorted.sort();
        assert_eq!(sorted, Olq::ALL);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Olq::parse("EI"), Some(Olq::EffectiveIntelligence));
        assert_eq!(Olq::parse("co-op"), Some(Olq::Cooperation));
        assert_eq!(Olq::parse("Speed of Decision"), Some(Olq::SpeedOfDecision));
        assert_eq!(Olq::parse("SELF_CONFIDENCE"), Some(Olq::SelfConfidence));
        assert!(Olq::parse("bravery").is_none());
        assert!("bravery".parse::<Olq>().is_err());
    }

    #[test]
    fn test_category_lookup() {
        assert!(OlqCategory::Social.is_critical_factor());
        assert!(!OlqCategory::Character.is_critical_factor());
        assert_eq!(OlqCategory::Dynamic.max_tick_variation(), 2);
        assert_eq!(OlqCategory::Intellectual.max_tick_variation(), 1);
    }

    #[test]
    fn test_serde_key_matches_key() {
        for olq in Olq::ALL {
            let json = serde_json::to_string(&olq).unwrap();
            assert_eq!(json, format!("\"{}\"", olq.key()));
        }
    }
}
