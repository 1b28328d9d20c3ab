use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use urbanroot_auth::{FieldErrors, Identity, Notification, Severity};
use urbanroot_catalog::{
    crops_for_season, experts, market_prices, plans, spaces, Booking, Listing, Quality, Season,
    Subscription, LISTING_CREATED, TIME_SLOTS,
};

/// Writes shell output either as plain text or as one JSON document per event.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn emit_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn notification(&self, notification: &Notification) -> Result<()> {
        if self.json {
            return self.emit_json(&json!({
                "notification": notification,
                "message": notification.message(),
            }));
        }

        let marker = match notification.severity() {
            Severity::Success => "[ok]",
            Severity::Error => "[!!]",
        };
        println!("{marker} {}", notification.message());
        if let Notification::ValidationFailed { errors } = notification {
            self.field_errors(errors);
        }
        Ok(())
    }

    fn field_errors(&self, errors: &FieldErrors) {
        for (field, message) in errors.iter() {
            println!("     {}: {message}", field.label());
        }
    }

    pub fn identity(&self, identity: &Identity, greeting: &str) -> Result<()> {
        if self.json {
            return self.emit_json(&json!({
                "identity": identity,
                "landing": identity.landing_page(),
            }));
        }

        println!("{greeting}! Signed in as {} ({}).", identity.email, identity.role);
        println!("Opening /{}", identity.landing_page());
        Ok(())
    }

    pub fn greeting(&self, greeting: &str, name: Option<&str>) -> Result<()> {
        if self.json {
            return self.emit_json(&json!({ "greeting": greeting, "name": name }));
        }

        match name {
            Some(name) => println!("{greeting}, {name}!"),
            None => println!("{greeting}!"),
        }
        Ok(())
    }

    pub fn experts(&self) -> Result<()> {
        if self.json {
            return self.emit_json(&json!({ "experts": experts(), "time_slots": TIME_SLOTS }));
        }

        for expert in experts() {
            let status = if expert.available { "available" } else { "unavailable" };
            println!(
                "{:>2}  {:<20} {:<26} {:.1} ({} reviews)  ${}/session  {status}",
                expert.id,
                expert.name,
                expert.specialization,
                expert.rating,
                expert.reviews,
                expert.price,
            );
        }
        println!("Time slots: {}", TIME_SLOTS.join(", "));
        Ok(())
    }

    pub fn booking(&self, booking: &Booking) -> Result<()> {
        if self.json {
            return self.emit_json(booking);
        }

        println!(
            "Booked a {} consultation with {} at {} (${}).",
            booking.kind, booking.expert.name, booking.time_slot, booking.expert.price
        );
        Ok(())
    }

    pub fn crops(&self, season: Season) -> Result<()> {
        let crops: Vec<_> = crops_for_season(season).collect();
        if self.json {
            return self.emit_json(&json!({ "season": season, "crops": crops }));
        }

        if crops.is_empty() {
            println!("Nothing to plant for {season}.");
            return Ok(());
        }
        for crop in crops {
            println!(
                "{:<16} {:<7} {:<11} {:<9} {}",
                crop.name,
                format!("{:?}", crop.difficulty),
                crop.growth_time,
                crop.price,
                crop.sunlight,
            );
            for tip in crop.tips {
                println!("    - {tip}");
            }
        }
        Ok(())
    }

    pub fn plans(&self) -> Result<()> {
        if self.json {
            return self.emit_json(&json!({ "plans": plans(), "spaces": spaces() }));
        }

        println!("Garden spaces:");
        for space in spaces() {
            println!("  {:<9} {}", space.id, space.description);
        }
        println!("Plans:");
        for plan in plans() {
            let popular = if plan.popular { "  (most popular)" } else { "" };
            println!("  {:<11} ${:<3} {:?}{popular}", plan.id, plan.price, plan.period);
            for feature in plan.features {
                println!("    - {feature}");
            }
        }
        Ok(())
    }

    pub fn subscription(&self, subscription: &Subscription) -> Result<()> {
        if self.json {
            return self.emit_json(subscription);
        }

        println!(
            "{} plan selected for your {}.",
            subscription.plan.name, subscription.space.title
        );
        Ok(())
    }

    pub fn prices(&self) -> Result<()> {
        if self.json {
            return self.emit_json(&json!({ "prices": market_prices() }));
        }

        for price in market_prices() {
            println!("{:<13} ${}-{}/{}", price.crop, price.min, price.max, price.unit);
        }
        Ok(())
    }

    pub fn quote(&self, crop: &str, quantity: f64, quality: Quality, price: f64) -> Result<()> {
        if self.json {
            return self.emit_json(&json!({
                "crop": crop,
                "quantity": quantity,
                "quality": quality,
                "suggested_price": price,
            }));
        }

        println!("Suggested price for {quantity} {crop} ({quality}): ${price:.2}");
        Ok(())
    }

    pub fn listing(&self, listing: &Listing) -> Result<()> {
        if self.json {
            return self.emit_json(&json!({ "listing": listing, "message": LISTING_CREATED }));
        }

        println!("[ok] {LISTING_CREATED}");
        println!(
            "     {} {} of {} ({}), suggested ${:.2}",
            listing.quantity, listing.unit, listing.crop, listing.quality, listing.suggested_price
        );
        Ok(())
    }
}
