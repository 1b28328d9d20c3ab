//! Resale price table and suggested listing prices.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{CatalogError, CatalogResult};

/// Shown once a listing has been created.
pub const LISTING_CREATED: &str = "Harvest listing created successfully!";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MarketPrice {
    pub crop: &'static str,
    /// Whole dollars per unit.
    pub min: u32,
    pub max: u32,
    pub unit: &'static str,
}

static MARKET_PRICES: [MarketPrice; 6] = [
    MarketPrice { crop: "Tomatoes", min: 3, max: 5, unit: "lb" },
    MarketPrice { crop: "Lettuce", min: 2, max: 3, unit: "head" },
    MarketPrice { crop: "Basil", min: 3, max: 4, unit: "bunch" },
    MarketPrice { crop: "Bell Peppers", min: 4, max: 6, unit: "lb" },
    MarketPrice { crop: "Cucumbers", min: 1, max: 2, unit: "each" },
    MarketPrice { crop: "Carrots", min: 2, max: 3, unit: "lb" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Premium,
    Standard,
    Economy,
}

impl FromStr for Quality {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "premium" => Ok(Quality::Premium),
            "standard" => Ok(Quality::Standard),
            "economy" => Ok(Quality::Economy),
            _ => Err(CatalogError::UnknownQuality(s.to_string())),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Premium => f.write_str("premium"),
            Quality::Standard => f.write_str("standard"),
            Quality::Economy => f.write_str("economy"),
        }
    }
}

pub fn market_prices() -> &'static [MarketPrice] {
    &MARKET_PRICES
}

pub fn market_price(crop: &str) -> Option<&'static MarketPrice> {
    MARKET_PRICES
        .iter()
        .find(|price| price.crop.eq_ignore_ascii_case(crop.trim()))
}

/// Listing price for `quantity` units of `crop`.
///
/// Premium produce is priced at the top of the range; standard and economy
/// at the bottom. Quantities that are negative or not finite count as zero.
pub fn suggested_price(crop: &str, quantity: f64, quality: Quality) -> Option<f64> {
    let price = market_price(crop)?;
    let unit_price = match quality {
        Quality::Premium => price.max,
        Quality::Standard | Quality::Economy => price.min,
    };
    let quantity = if quantity.is_finite() && quantity > 0.0 {
        quantity
    } else {
        0.0
    };
    Some(f64::from(unit_price) * quantity)
}

/// A harvest put up for resale.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Listing {
    pub crop: &'static str,
    pub quantity: f64,
    pub unit: &'static str,
    pub quality: Quality,
    pub suggested_price: f64,
}

/// Create a listing from the resale form.
///
/// Crop and quantity are required. Blank input counts as missing.
pub fn list_harvest(
    crop: Option<&str>,
    quantity: Option<&str>,
    quality: Quality,
) -> CatalogResult<Listing> {
    let crop = crop.map(str::trim).filter(|crop| !crop.is_empty());
    let quantity = quantity.map(str::trim).filter(|quantity| !quantity.is_empty());
    let (Some(crop), Some(quantity)) = (crop, quantity) else {
        return Err(CatalogError::MissingListingFields);
    };

    let price = market_price(crop).ok_or_else(|| CatalogError::UnknownCrop(crop.to_string()))?;
    let amount = quantity
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
        .ok_or_else(|| CatalogError::InvalidQuantity(quantity.to_string()))?;
    let suggested_price = suggested_price(price.crop, amount, quality).unwrap_or_default();

    Ok(Listing {
        crop: price.crop,
        quantity: amount,
        unit: price.unit,
        quality,
        suggested_price,
    })
}
