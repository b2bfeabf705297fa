use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Movies,
    Concerts,
    Sports,
    Theatre,
}

impl std::str::FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movies" => Ok(Self::Movies),
            "concerts" => Ok(Self::Concerts),
            "sports" => Ok(Self::Sports),
            "theatre" => Ok(Self::Theatre),
            other => Err(format!("unknown event category: {}", other)),
        }
    }
}

/// Something that can be booked: a film, concert, match or play
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub category: EventCategory,
    pub description: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default)]
    pub featured: bool,
}

/// One scheduled performance of an event.
///
/// Shows are static catalog entries. `available_seats` is informational and is
/// not decremented by bookings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub id: String,
    pub event_id: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub price: u64,
    pub available_seats: u32,
}
