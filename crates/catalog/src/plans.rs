//! Home farming plans and the garden spaces they are sold for.

use serde::Serialize;

use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BillingPeriod {
    OneTime,
    Month,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Plan {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u32,
    pub period: BillingPeriod,
    pub features: &'static [&'static str],
    pub popular: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GardenSpace {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub suitability: &'static [&'static str],
}

static PLANS: [Plan; 3] = [
    Plan {
        id: "starter",
        name: "Starter",
        price: 99,
        period: BillingPeriod::OneTime,
        features: &[
            "Initial consultation (1 hour)",
            "Basic garden setup guide",
            "Seed starter kit (3 varieties)",
            "Soil preparation guide",
            "Email support for 1 month",
        ],
        popular: false,
    },
    Plan {
        id: "essentials",
        name: "Essentials",
        price: 49,
        period: BillingPeriod::Month,
        features: &[
            "Complete garden setup",
            "Seed kit (5-8 varieties)",
            "Organic soil & fertilizers",
            "Monthly expert check-in",
            "Weather alerts",
            "Priority email support",
        ],
        popular: true,
    },
    Plan {
        id: "premium",
        name: "Premium",
        price: 89,
        period: BillingPeriod::Month,
        features: &[
            "Everything in Essentials",
            "On-site installation",
            "Seed kit (10-15 varieties)",
            "Bi-weekly expert visits",
            "Pest management kit",
            "24/7 chat support",
            "Harvest optimization tips",
        ],
        popular: false,
    },
];

static SPACES: [GardenSpace; 3] = [
    GardenSpace {
        id: "balcony",
        title: "Balcony",
        description: "Perfect for apartments with 50-100 sq ft",
        suitability: &["Container gardening", "5-8 crop varieties", "Vertical growing"],
    },
    GardenSpace {
        id: "terrace",
        title: "Terrace",
        description: "Ideal for 100-300 sq ft rooftop spaces",
        suitability: &["Raised beds", "10-15 crop varieties", "Advanced setup"],
    },
    GardenSpace {
        id: "backyard",
        title: "Backyard",
        description: "Best for 300+ sq ft outdoor areas",
        suitability: &["Ground beds", "15-20+ varieties", "Full garden setup"],
    },
];

pub fn plans() -> &'static [Plan] {
    &PLANS
}

pub fn plan(id: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|plan| plan.id.eq_ignore_ascii_case(id))
}

pub fn spaces() -> &'static [GardenSpace] {
    &SPACES
}

pub fn space(id: &str) -> Option<&'static GardenSpace> {
    SPACES.iter().find(|space| space.id.eq_ignore_ascii_case(id))
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Subscription {
    pub plan: &'static Plan,
    pub space: &'static GardenSpace,
}

/// A plan can only be picked once the garden space is known.
pub fn subscribe(plan_id: &str, space_id: Option<&str>) -> CatalogResult<Subscription> {
    let space_id = space_id.ok_or(CatalogError::MissingSpace)?;
    let space = space(space_id).ok_or_else(|| CatalogError::UnknownSpace(space_id.to_string()))?;
    let plan = plan(plan_id).ok_or_else(|| CatalogError::UnknownPlan(plan_id.to_string()))?;
    Ok(Subscription { plan, space })
}
