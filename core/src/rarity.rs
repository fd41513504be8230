//! Rarity tiers
//!
//! Canonical identifiers are snake_case (`mil_spec`). Parsing also accepts the
//! display names found in catalog seed files ("Mil-Spec", "Consumer Grade",
//! "Rare Special").

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rarity {
    Consumer,
    Industrial,
    MilSpec,
    Restricted,
    Classified,
    Covert,
    ExceedinglyRare,
}

/// Global tier probabilities, walked in this order by the rarity-bucket draw.
///
/// The values do not sum to exactly 1.0; the rarest tier is reached through
/// the fallback path when no earlier tier is hit.
pub const RARITY_TABLE: [(Rarity, f64); 7] = [
    (Rarity::Consumer, 0.7980),
    (Rarity::Industrial, 0.1598),
    (Rarity::MilSpec, 0.0320),
    (Rarity::Restricted, 0.0064),
    (Rarity::Classified, 0.0032),
    (Rarity::Covert, 0.0064),
    (Rarity::ExceedinglyRare, 0.0026),
];

impl Rarity {
    pub const ALL: [Rarity; 7] = [
        Rarity::Consumer,
        Rarity::Industrial,
        Rarity::MilSpec,
        Rarity::Restricted,
        Rarity::Classified,
        Rarity::Covert,
        Rarity::ExceedinglyRare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Consumer => "consumer",
            Rarity::Industrial => "industrial",
            Rarity::MilSpec => "mil_spec",
            Rarity::Restricted => "restricted",
            Rarity::Classified => "classified",
            Rarity::Covert => "covert",
            Rarity::ExceedinglyRare => "exceedingly_rare",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Rarity::Consumer => "Consumer Grade",
            Rarity::Industrial => "Industrial Grade",
            Rarity::MilSpec => "Mil-Spec",
            Rarity::Restricted => "Restricted",
            Rarity::Classified => "Classified",
            Rarity::Covert => "Covert",
            Rarity::ExceedinglyRare => "Exceedingly Rare",
        }
    }

    /// Position in the tier order (0 = most common)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The next rarer tier, `None` for the top tier
    pub fn next(&self) -> Option<Rarity> {
        Rarity::ALL.get(self.index() + 1).copied()
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        let normalized = normalized.strip_suffix("_grade").unwrap_or(&normalized);

        match normalized {
            "consumer" => Ok(Rarity::Consumer),
            "industrial" => Ok(Rarity::Industrial),
            "mil_spec" | "milspec" => Ok(Rarity::MilSpec),
            "restricted" => Ok(Rarity::Restricted),
            "classified" => Ok(Rarity::Classified),
            "covert" => Ok(Rarity::Covert),
            "exceedingly_rare" | "rare_special" => Ok(Rarity::ExceedinglyRare),
            _ => Err(CoreError::UnknownRarity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Rarity {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rarity> for String {
    fn from(rarity: Rarity) -> Self {
        rarity.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Mil-Spec".parse::<Rarity>().unwrap(), Rarity::MilSpec);
        assert_eq!("mil_spec".parse::<Rarity>().unwrap(), Rarity::MilSpec);
        assert_eq!("Consumer Grade".parse::<Rarity>().unwrap(), Rarity::Consumer);
        assert_eq!("Rare Special".parse::<Rarity>().unwrap(), Rarity::ExceedinglyRare);
        assert_eq!(
            "Exceedingly Rare".parse::<Rarity>().unwrap(),
            Rarity::ExceedinglyRare
        );
        assert!("legendary".parse::<Rarity>().is_err());
    }

    #[test]
    fn test_order_and_next() {
        assert!(Rarity::Consumer < Rarity::Covert);
        assert_eq!(Rarity::Restricted.next(), Some(Rarity::Classified));
        assert_eq!(Rarity::ExceedinglyRare.next(), None);
    }

    #[test]
    fn test_table_follows_tier_order() {
        for (i, (rarity, _)) in RARITY_TABLE.iter().enumerate() {
            assert_eq!(rarity.index(), i);
        }
        assert_eq!(RARITY_TABLE[Rarity::Covert.index()].1, 0.0064);
    }

    #[test]
    fn test_serde_uses_canonical_name() {
        let json = serde_json::to_string(&Rarity::MilSpec).unwrap();
        assert_eq!(json, "\"mil_spec\"");

        let parsed: Rarity = serde_json::from_str("\"Industrial Grade\"").unwrap();
        assert_eq!(parsed, Rarity::Industrial);
    }
}
