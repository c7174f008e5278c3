//! Journal line decoding into a closed set of typed events.
//!
//! Each line is parsed once; the `event` tag selects the variant and the
//! variant's fields are pulled out individually. A field that is missing or
//! has the wrong JSON type decodes to `None` instead of failing the event.

#![allow(missing_docs)]

use serde_json::{Map, Value};

/// Position fix carried by `Location`, `SupercruiseExit` and `FSDJump`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationFix {
    pub system_address: Option<i64>,
    pub star_system: Option<String>,
    pub body: Option<String>,
    pub body_id: Option<i64>,
    pub body_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub docked: Option<bool>,
}

/// The journal events that affect the display state.
#[derive(Debug, Clone, PartialEq)]
pub enum JournalEvent {
    Location(LocationFix),
    SupercruiseEntry,
    SupercruiseExit(LocationFix),
    FsdJump(LocationFix),
    Touchdown {
        latitude: Option<f64>,
        longitude: Option<f64>,
    },
    Liftoff,
    FsdTarget {
        system_address: Option<i64>,
        name: Option<String>,
        remaining_jumps: Option<i64>,
    },
    ApproachBody {
        body: Option<String>,
        body_id: Option<i64>,
    },
    ApproachSettlement {
        body: Option<String>,
        body_id: Option<i64>,
    },
    Loadout {
        cargo_capacity: Option<i64>,
    },
}

impl JournalEvent {
    /// The journal tag this variant was decoded from.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Location(_) => "Location",
            Self::SupercruiseEntry => "SupercruiseEntry",
            Self::SupercruiseExit(_) => "SupercruiseExit",
            Self::FsdJump(_) => "FSDJump",
            Self::Touchdown { .. } => "Touchdown",
            Self::Liftoff => "Liftoff",
            Self::FsdTarget { .. } => "FSDTarget",
            Self::ApproachBody { .. } => "ApproachBody",
            Self::ApproachSettlement { .. } => "ApproachSettlement",
            Self::Loadout { .. } => "Loadout",
        }
    }
}

/// Decode one journal line. Returns `None` for malformed JSON, a missing tag,
/// or a tag the display does not care about.
#[must_use]
pub fn decode(line: &str) -> Option<JournalEvent> {
    let value: Value = serde_json::from_str(line).ok()?;
    let fields = Fields(value.as_object()?);

    let event = match fields.str("event")?.as_str() {
        "Location" => JournalEvent::Location(fields.location_fix()),
        "SupercruiseEntry" => JournalEvent::SupercruiseEntry,
        "SupercruiseExit" => JournalEvent::SupercruiseExit(fields.location_fix()),
        "FSDJump" => JournalEvent::FsdJump(fields.location_fix()),
        "Touchdown" => JournalEvent::Touchdown {
            latitude: fields.float("Latitude"),
            longitude: fields.float("Longitude"),
        },
        "Liftoff" => JournalEvent::Liftoff,
        "FSDTarget" => JournalEvent::FsdTarget {
            system_address: fields.int("SystemAddress"),
            name: fields.str("Name"),
            // Absent on a direct (single-jump) target.
            remaining_jumps: fields.int_or("RemainingJumpsInRoute", 0),
        },
        "ApproachBody" => JournalEvent::ApproachBody {
            body: fields.str("Body"),
            body_id: fields.int("BodyID"),
        },
        "ApproachSettlement" => JournalEvent::ApproachSettlement {
            body: fields.str("BodyName").or_else(|| fields.str("Name")),
            body_id: fields.int("BodyID"),
        },
        "Loadout" => JournalEvent::Loadout {
            cargo_capacity: fields.int("CargoCapacity"),
        },
        _ => return None,
    };
    Some(event)
}

struct Fields<'a>(&'a Map<String, Value>);

impl Fields<'_> {
    fn str(&self, key: &str) -> Option<String> {
        self.0.get(key)?.as_str().map(str::to_string)
    }

    fn int(&self, key: &str) -> Option<i64> {
        self.0.get(key)?.as_i64()
    }

    /// `default` when the key is absent, `None` when present with the wrong type.
    fn int_or(&self, key: &str, default: i64) -> Option<i64> {
        self.0.get(key).map_or(Some(default), Value::as_i64)
    }

    fn float(&self, key: &str) -> Option<f64> {
        self.0.get(key)?.as_f64()
    }

    fn bool(&self, key: &str) -> Option<bool> {
        self.0.get(key)?.as_bool()
    }

    fn location_fix(&self) -> LocationFix {
        LocationFix {
            system_address: self.int("SystemAddress"),
            star_system: self.str("StarSystem"),
            body: self.str("Body"),
            body_id: self.int("BodyID"),
            body_type: self.str("BodyType"),
            latitude: self.float("Latitude"),
            longitude: self.float("Longitude"),
            docked: self.bool("Docked"),
        }
    }
}
