//! Consultation experts and bookable time slots.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Expert {
    pub id: u32,
    pub name: &'static str,
    pub specialization: &'static str,
    pub rating: f32,
    pub reviews: u32,
    pub experience: &'static str,
    /// Price per session in whole dollars.
    pub price: u32,
    pub certifications: &'static [&'static str],
    pub available: bool,
}

static EXPERTS: [Expert; 4] = [
    Expert {
        id: 1,
        name: "Dr. Emily Carter",
        specialization: "Urban Organic Farming",
        rating: 4.9,
        reviews: 127,
        experience: "15+ years",
        price: 49,
        certifications: &["Certified Organic Specialist", "Master Gardener"],
        available: true,
    },
    Expert {
        id: 2,
        name: "Michael Rodriguez",
        specialization: "Hydroponic Systems",
        rating: 4.8,
        reviews: 94,
        experience: "12+ years",
        price: 45,
        certifications: &["Hydroponic Expert", "Urban Agriculture"],
        available: true,
    },
    Expert {
        id: 3,
        name: "Sarah Thompson",
        specialization: "Balcony & Container Gardening",
        rating: 5.0,
        reviews: 156,
        experience: "10+ years",
        price: 39,
        certifications: &["Container Garden Specialist", "Organic Certified"],
        available: true,
    },
    Expert {
        id: 4,
        name: "Dr. James Wilson",
        specialization: "Pest Management & Soil Health",
        rating: 4.7,
        reviews: 83,
        experience: "18+ years",
        price: 55,
        certifications: &["PhD Agriculture", "Soil Science Expert"],
        available: false,
    },
];

pub const TIME_SLOTS: &[&str] = &[
    "09:00 AM", "10:00 AM", "11:00 AM", "02:00 PM", "03:00 PM", "04:00 PM", "05:00 PM",
];

pub fn experts() -> &'static [Expert] {
    &EXPERTS
}

pub fn expert(id: u32) -> Option<&'static Expert> {
    EXPERTS.iter().find(|expert| expert.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationType {
    #[default]
    Video,
    Phone,
    Chat,
}

impl FromStr for ConsultationType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(ConsultationType::Video),
            "phone" => Ok(ConsultationType::Phone),
            "chat" => Ok(ConsultationType::Chat),
            _ => Err(CatalogError::UnknownConsultationType(s.to_string())),
        }
    }
}

impl fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsultationType::Video => f.write_str("video"),
            ConsultationType::Phone => f.write_str("phone"),
            ConsultationType::Chat => f.write_str("chat"),
        }
    }
}

/// A consultation the user picked but has not paid for.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Booking {
    pub expert: &'static Expert,
    pub time_slot: &'static str,
    pub kind: ConsultationType,
}

/// Check a booking selection against the expert table and slot list.
pub fn book(expert_id: u32, time_slot: Option<&str>, kind: ConsultationType) -> CatalogResult<Booking> {
    let expert = expert(expert_id).ok_or(CatalogError::UnknownExpert(expert_id))?;
    if !expert.available {
        return Err(CatalogError::ExpertUnavailable(expert.name));
    }

    let requested = time_slot.ok_or(CatalogError::MissingTimeSlot)?;
    let time_slot = TIME_SLOTS
        .iter()
        .copied()
        .find(|slot| slot.eq_ignore_ascii_case(requested.trim()))
        .ok_or_else(|| CatalogError::UnknownTimeSlot(requested.to_string()))?;

    Ok(Booking {
        expert,
        time_slot,
        kind,
    })
}
