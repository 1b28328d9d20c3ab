//! Crop recommendations by season.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Whatever is in season now; shows every crop.
    #[default]
    Current,
    Spring,
    Summer,
    Fall,
    Winter,
}

impl FromStr for Season {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "current" => Ok(Season::Current),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            "winter" => Ok(Season::Winter),
            _ => Err(CatalogError::UnknownSeason(s.to_string())),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Current => "current",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Crop {
    pub name: &'static str,
    pub difficulty: Difficulty,
    pub growth_time: &'static str,
    pub seasons: &'static [Season],
    pub space_needed: &'static str,
    pub sunlight: &'static str,
    pub water: &'static str,
    pub expected_yield: &'static str,
    pub profit_potential: &'static str,
    pub price: &'static str,
    pub tips: &'static [&'static str],
}

impl Crop {
    pub fn grows_in(&self, season: Season) -> bool {
        season == Season::Current || self.seasons.contains(&season)
    }
}

static CROPS: [Crop; 6] = [
    Crop {
        name: "Cherry Tomatoes",
        difficulty: Difficulty::Easy,
        growth_time: "60-80 days",
        seasons: &[Season::Spring, Season::Summer],
        space_needed: "Medium",
        sunlight: "Full Sun (6-8 hours)",
        water: "Regular",
        expected_yield: "5-10 lbs/plant",
        profit_potential: "High",
        price: "$3-5/lb",
        tips: &[
            "Requires support/stakes",
            "Water consistently",
            "Harvest when fully colored",
        ],
    },
    Crop {
        name: "Lettuce",
        difficulty: Difficulty::Easy,
        growth_time: "30-45 days",
        seasons: &[Season::Spring, Season::Fall],
        space_needed: "Small",
        sunlight: "Partial Shade (4-6 hours)",
        water: "Frequent",
        expected_yield: "8-12 heads",
        profit_potential: "Medium",
        price: "$2-3/head",
        tips: &[
            "Harvest outer leaves first",
            "Grows well in containers",
            "Succession plant every 2 weeks",
        ],
    },
    Crop {
        name: "Basil",
        difficulty: Difficulty::Easy,
        growth_time: "20-30 days",
        seasons: &[Season::Spring, Season::Summer],
        space_needed: "Small",
        sunlight: "Full Sun (6-8 hours)",
        water: "Regular",
        expected_yield: "Continuous harvest",
        profit_potential: "High",
        price: "$3-4/bunch",
        tips: &[
            "Pinch flowers to extend harvest",
            "Harvest regularly for bushier plants",
            "Easy to propagate",
        ],
    },
    Crop {
        name: "Bell Peppers",
        difficulty: Difficulty::Medium,
        growth_time: "70-90 days",
        seasons: &[Season::Summer],
        space_needed: "Medium",
        sunlight: "Full Sun (6-8 hours)",
        water: "Regular",
        expected_yield: "6-10 peppers/plant",
        profit_potential: "High",
        price: "$4-6/lb",
        tips: &[
            "Requires warm temperatures",
            "Stake for support",
            "Harvest when fully sized",
        ],
    },
    Crop {
        name: "Carrots",
        difficulty: Difficulty::Medium,
        growth_time: "60-75 days",
        seasons: &[Season::Spring, Season::Fall],
        space_needed: "Small",
        sunlight: "Full Sun (6 hours)",
        water: "Regular",
        expected_yield: "10-15 carrots",
        profit_potential: "Medium",
        price: "$2-3/lb",
        tips: &[
            "Needs deep, loose soil",
            "Thin seedlings for spacing",
            "Harvest based on size preference",
        ],
    },
    Crop {
        name: "Cucumber",
        difficulty: Difficulty::Easy,
        growth_time: "50-70 days",
        seasons: &[Season::Summer],
        space_needed: "Large",
        sunlight: "Full Sun (6-8 hours)",
        water: "Frequent",
        expected_yield: "10-15 cucumbers",
        profit_potential: "Medium",
        price: "$1-2 each",
        tips: &[
            "Provide trellis for vertical growth",
            "Harvest frequently",
            "Keep soil moist",
        ],
    },
];

pub fn crops() -> &'static [Crop] {
    &CROPS
}

pub fn crops_for_season(season: Season) -> impl Iterator<Item = &'static Crop> {
    CROPS.iter().filter(move |crop| crop.grows_in(season))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(season: Season) -> Vec<&'static str> {
        crops_for_season(season).map(|crop| crop.name).collect()
    }

    #[test]
    fn current_season_lists_everything() {
        assert_eq!(names(Season::Current).len(), crops().len());
    }

    #[test]
    fn summer_filters_to_warm_crops() {
        assert_eq!(
            names(Season::Summer),
            vec!["Cherry Tomatoes", "Basil", "Bell Peppers", "Cucumber"]
        );
    }

    #[test]
    fn winter_has_nothing() {
        assert!(names(Season::Winter).is_empty());
    }

    #[test]
    fn season_parsing() {
        assert_eq!("Autumn".parse::<Season>(), Ok(Season::Fall));
        assert!("monsoon".parse::<Season>().is_err());
    }
}
