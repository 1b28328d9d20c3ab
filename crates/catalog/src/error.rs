use thiserror::Error;

/// Lookup and selection errors. Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Unknown expert: {0}")]
    UnknownExpert(u32),

    #[error("{0} is not taking bookings right now")]
    ExpertUnavailable(&'static str),

    #[error("Please select a time slot")]
    MissingTimeSlot,

    #[error("Unknown time slot: {0}")]
    UnknownTimeSlot(String),

    #[error("Unknown plan: {0}")]
    UnknownPlan(String),

    #[error("Please select your garden space type first")]
    MissingSpace,

    #[error("Unknown garden space: {0}")]
    UnknownSpace(String),

    #[error("Unknown season: {0}")]
    UnknownSeason(String),

    #[error("Please fill in all required fields")]
    MissingListingFields,

    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Unknown quality grade: {0}")]
    UnknownQuality(String),

    #[error("Unknown consultation type: {0}")]
    UnknownConsultationType(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
