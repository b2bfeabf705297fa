use tickethub_shared::{Event, EventCategory, Show};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Show not found: {0}")]
    ShowNotFound(String),

    #[error("Show {show_id} does not belong to event {event_id}")]
    ShowEventMismatch { show_id: String, event_id: String },
}

/// Fixed catalog of events and their scheduled shows
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: Vec<Event>,
    shows: Vec<Show>,
}

impl EventCatalog {
    pub fn new(events: Vec<Event>, shows: Vec<Show>) -> Self {
        Self { events, shows }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn by_category(&self, category: EventCategory) -> Vec<&Event> {
        self.events.iter().filter(|e| e.category == category).collect()
    }

    pub fn featured(&self) -> Vec<&Event> {
        self.events.iter().filter(|e| e.featured).collect()
    }

    pub fn event(&self, event_id: &str) -> Result<&Event, CatalogError> {
        self.events
            .iter()
            .find(|e| e.id == event_id)
            .ok_or_else(|| CatalogError::EventNotFound(event_id.to_string()))
    }

    pub fn shows_for(&self, event_id: &str) -> Vec<&Show> {
        self.shows.iter().filter(|s| s.event_id == event_id).collect()
    }

    pub fn show(&self, show_id: &str) -> Result<&Show, CatalogError> {
        self.shows
            .iter()
            .find(|s| s.id == show_id)
            .ok_or_else(|| CatalogError::ShowNotFound(show_id.to_string()))
    }

    /// Resolve an event/show pair, checking the show is scheduled for that event
    pub fn resolve(&self, event_id: &str, show_id: &str) -> Result<(&Event, &Show), CatalogError> {
        let event = self.event(event_id)?;
        let show = self.show(show_id)?;
        if show.event_id != event.id {
            return Err(CatalogError::ShowEventMismatch {
                show_id: show_id.to_string(),
                event_id: event_id.to_string(),
            });
        }
        Ok((event, show))
    }

    /// The launch line-up
    pub fn builtin() -> Self {
        let events = vec![
            event(
                "1",
                "The Quantum Paradox",
                EventCategory::Movies,
                "A mind-bending sci-fi thriller that explores the boundaries of reality and consciousness.",
                "2h 25m",
                Some("English"),
                Some("Sci-Fi, Thriller"),
                Some(4.5),
                true,
            ),
            event(
                "2",
                "Midnight Jazz Sessions",
                EventCategory::Concerts,
                "An enchanting evening of smooth jazz featuring world-renowned artists.",
                "3h",
                None,
                Some("Jazz, Live Performance"),
                Some(4.8),
                true,
            ),
            event(
                "3",
                "Champions League Finals",
                EventCategory::Sports,
                "The ultimate showdown between Europe's football elite. Witness history in the making.",
                "2h",
                None,
                Some("Football"),
                Some(4.9),
                true,
            ),
            event(
                "4",
                "Hamlet: A Modern Interpretation",
                EventCategory::Theatre,
                "Shakespeare's timeless tragedy reimagined for contemporary audiences.",
                "2h 45m",
                Some("English"),
                Some("Drama, Classic"),
                Some(4.6),
                false,
            ),
            event(
                "5",
                "Neon Dreams",
                EventCategory::Movies,
                "A cyberpunk masterpiece set in a dystopian future where technology and humanity collide.",
                "2h 10m",
                Some("English"),
                Some("Cyberpunk, Action"),
                Some(4.4),
                false,
            ),
            event(
                "6",
                "Rock Legends Live",
                EventCategory::Concerts,
                "The greatest rock anthems performed by legendary artists. An unforgettable night.",
                "3h 30m",
                None,
                Some("Rock, Live Performance"),
                Some(4.7),
                false,
            ),
        ];

        let shows = vec![
            show("s1", "1", "2025-12-01", "14:00", "Platinum Cinema Hall 1", 250, 45),
            show("s2", "1", "2025-12-01", "18:30", "Platinum Cinema Hall 1", 300, 32),
            show("s3", "1", "2025-12-02", "20:00", "Platinum Cinema Hall 2", 350, 28),
            show("s4", "2", "2025-12-05", "20:00", "Grand Concert Hall", 1500, 120),
            show("s5", "3", "2025-12-10", "19:00", "National Stadium", 5000, 850),
        ];

        Self::new(events, shows)
    }
}

#[allow(clippy::too_many_arguments)]
fn event(
    id: &str,
    title: &str,
    category: EventCategory,
    description: &str,
    duration: &str,
    language: Option<&str>,
    genre: Option<&str>,
    rating: Option<f32>,
    featured: bool,
) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        category,
        description: description.to_string(),
        duration: duration.to_string(),
        language: language.map(str::to_string),
        genre: genre.map(str::to_string),
        rating,
        featured,
    }
}

fn show(id: &str, event_id: &str, date: &str, time: &str, venue: &str, price: u64, available_seats: u32) -> Show {
    Show {
        id: id.to_string(),
        event_id: event_id.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        venue: venue.to_string(),
        price,
        available_seats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lineup() {
        let catalog = EventCatalog::builtin();
        assert_eq!(catalog.events().len(), 6);
        assert_eq!(catalog.featured().len(), 3);
        assert_eq!(catalog.by_category(EventCategory::Movies).len(), 2);
        assert_eq!(catalog.shows_for("1").len(), 3);
        assert!(catalog.shows_for("4").is_empty());
    }

    #[test]
    fn test_resolve() {
        let catalog = EventCatalog::builtin();
        let (event, show) = catalog.resolve("2", "s4").unwrap();
        assert_eq!(event.title, "Midnight Jazz Sessions");
        assert_eq!(show.venue, "Grand Concert Hall");

        assert_eq!(
            catalog.resolve("1", "s4").unwrap_err(),
            CatalogError::ShowEventMismatch { show_id: "s4".to_string(), event_id: "1".to_string() }
        );
        assert_eq!(
            catalog.resolve("9", "s1").unwrap_err(),
            CatalogError::EventNotFound("9".to_string())
        );
        assert_eq!(
            catalog.resolve("1", "s9").unwrap_err(),
            CatalogError::ShowNotFound("s9".to_string())
        );
    }
}
