use serde::{Deserialize, Serialize};

/// A bookable facility. The set is closed; unknown identifiers are
/// rejected at the edge rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    MeetingRoom,
    SportsGround,
    CommunityHall,
}

impl Resource {
    pub const ALL: [Resource; 3] = [
        Resource::MeetingRoom,
        Resource::SportsGround,
        Resource::CommunityHall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::MeetingRoom => "meeting-room",
            Resource::SportsGround => "sports-ground",
            Resource::CommunityHall => "community-hall",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "meeting-room" => Some(Resource::MeetingRoom),
            "sports-ground" => Some(Resource::SportsGround),
            "community-hall" => Some(Resource::CommunityHall),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Resource::MeetingRoom => "Meeting Room",
            Resource::SportsGround => "Sports Ground",
            Resource::CommunityHall => "Community Hall",
        }
    }
}
