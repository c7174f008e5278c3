//! Carried-forward navigation state and the reducer that folds journal events into it.

#![allow(missing_docs)]

use serde::Serialize;

use crate::journal::events::{JournalEvent, LocationFix};

/// Where in a system the commander is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum LocationType {
    /// Somewhere in the system, not close to a body.
    #[default]
    InSystem,
    /// In orbital cruise or glide near a planetary body.
    NearPlanet,
    /// Touched down on a planet surface.
    Landed,
    /// Docked at a station, outpost or settlement pad.
    Docked,
}

impl LocationType {
    /// Whether the body-detail layout applies.
    #[must_use]
    pub const fn is_at_body(self) -> bool {
        matches!(self, Self::NearPlanet | Self::Landed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Location {
    pub kind: LocationType,
    pub system_address: i64,
    pub star_system: String,
    pub body: String,
    pub body_id: i64,
    pub body_type: String,
    /// Only meaningful while `kind` is `Landed`.
    pub latitude: f64,
    pub longitude: f64,
}

/// System selected for the next hyperspace jump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FsdTarget {
    pub system_address: i64,
    pub name: String,
    pub remaining_jumps: i64,
}

impl FsdTarget {
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.system_address != 0
    }
}

/// In-system destination selected in the galaxy/system map (from `Status.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub system_address: i64,
    pub body_id: i64,
    pub name: String,
}

impl Destination {
    /// A body destination inside the given system.
    #[must_use]
    pub const fn is_local_to(&self, system_address: i64) -> bool {
        self.system_address != 0 && self.body_id != 0 && self.system_address == system_address
    }
}

/// Everything the pages need from the journal, folded across cycles.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JournalState {
    pub location: Location,
    pub target: FsdTarget,
    pub destination: Destination,
    pub cargo_capacity: i64,
    pub show_splash: bool,
    pub arrived_at_fsd_target: bool,
}

impl JournalState {
    /// Fold one event into the state. Fields an event does not carry stay as they were.
    pub fn apply(&mut self, event: &JournalEvent) {
        match event {
            JournalEvent::Location(fix) | JournalEvent::SupercruiseExit(fix) => {
                self.arrived_at_fsd_target = false;
                self.recompute_location(fix);
            }
            JournalEvent::FsdJump(fix) => {
                self.recompute_location(fix);
                self.check_arrival();
            }
            JournalEvent::SupercruiseEntry => {
                self.location.kind = LocationType::InSystem;
            }
            JournalEvent::Touchdown {
                latitude,
                longitude,
            } => {
                self.arrived_at_fsd_target = false;
                set(&mut self.location.latitude, *latitude);
                set(&mut self.location.longitude, *longitude);
                self.location.kind = LocationType::Landed;
            }
            JournalEvent::Liftoff => {
                self.location.kind = LocationType::NearPlanet;
            }
            JournalEvent::FsdTarget {
                system_address,
                name,
                remaining_jumps,
            } => {
                self.arrived_at_fsd_target = false;
                set(&mut self.target.system_address, *system_address);
                set_str(&mut self.target.name, name.as_deref());
                set(&mut self.target.remaining_jumps, *remaining_jumps);
            }
            JournalEvent::ApproachBody { body, body_id }
            | JournalEvent::ApproachSettlement { body, body_id } => {
                self.arrived_at_fsd_target = false;
                set_str(&mut self.location.body, body.as_deref());
                set(&mut self.location.body_id, *body_id);
                self.location.kind = LocationType::NearPlanet;
            }
            JournalEvent::Loadout { cargo_capacity } => {
                set(&mut self.cargo_capacity, *cargo_capacity);
            }
        }
    }

    fn recompute_location(&mut self, fix: &LocationFix) {
        let loc = &mut self.location;
        loc.kind = LocationType::InSystem;
        set(&mut loc.system_address, fix.system_address);
        set_str(&mut loc.star_system, fix.star_system.as_deref());
        set_str(&mut loc.body_type, fix.body_type.as_deref());

        if fix.body_type.as_deref() == Some("Planet") {
            set(&mut loc.body_id, fix.body_id);
            set_str(&mut loc.body, fix.body.as_deref());
            loc.kind = LocationType::NearPlanet;

            if let Some(latitude) = fix.latitude {
                loc.latitude = latitude;
                set(&mut loc.longitude, fix.longitude);
                loc.kind = LocationType::Landed;
            }
        }

        if fix.docked == Some(true) {
            loc.kind = LocationType::Docked;
        }
    }

    fn check_arrival(&mut self) {
        if self.target.is_set()
            && self.target.system_address == self.location.system_address
            && self.target.remaining_jumps <= 0
        {
            self.arrived_at_fsd_target = true;
            self.target = FsdTarget::default();
        }
    }
}

/// Pure form of [`JournalState::apply`].
#[must_use]
pub fn reduce(mut state: JournalState, event: &JournalEvent) -> JournalState {
    state.apply(event);
    state
}

fn set<T: Copy>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn set_str(slot: &mut String, value: Option<&str>) {
    if let Some(value) = value {
        value.clone_into(slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::events::decode;

    fn fold(lines: &[&str]) -> JournalState {
        lines
            .iter()
            .filter_map(|line| decode(line))
            .fold(JournalState::default(), |state, event| reduce(state, &event))
    }

    const PLANET_LANDED: &str = r#"{"timestamp":"2024-01-01T00:00:00Z","event":"Location","Docked":false,"StarSystem":"Sol","SystemAddress":10477373803,"Body":"Mars","BodyID":4,"BodyType":"Planet","Latitude":12.5,"Longitude":-45.25}"#;
    const PLANET_ORBIT: &str = r#"{"timestamp":"2024-01-01T00:00:00Z","event":"Location","Docked":false,"StarSystem":"Sol","SystemAddress":10477373803,"Body":"Mars","BodyID":4,"BodyType":"Planet"}"#;

    #[test]
    fn location_with_latitude_is_landed() {
        let state = fold(&[PLANET_LANDED]);
        assert_eq!(state.location.kind, LocationType::Landed);
        assert_eq!(state.location.star_system, "Sol");
        assert_eq!(state.location.body, "Mars");
        assert_eq!(state.location.body_id, 4);
        assert!((state.location.latitude - 12.5).abs() < f64::EPSILON);
        assert!((state.location.longitude + 45.25).abs() < f64::EPSILON);
    }

    #[test]
    fn location_without_latitude_is_near_planet() {
        let state = fold(&[PLANET_ORBIT]);
        assert_eq!(state.location.kind, LocationType::NearPlanet);
    }

    #[test]
    fn docked_overrides_planet_outcomes() {
        let landed = PLANET_LANDED.replace(r#""Docked":false"#, r#""Docked":true"#);
        let orbit = PLANET_ORBIT.replace(r#""Docked":false"#, r#""Docked":true"#);
        assert_eq!(fold(&[&landed]).location.kind, LocationType::Docked);
        assert_eq!(fold(&[&orbit]).location.kind, LocationType::Docked);
    }

    #[test]
    fn star_body_is_in_system() {
        let state = fold(&[
            r#"{"event":"FSDJump","StarSystem":"Achenar","SystemAddress":164098653,"Body":"Achenar","BodyID":0,"BodyType":"Star"}"#,
        ]);
        assert_eq!(state.location.kind, LocationType::InSystem);
        assert_eq!(state.location.system_address, 164_098_653);
        assert_eq!(state.location.body_type, "Star");
    }

    #[test]
    fn supercruise_entry_keeps_system_identity() {
        let state = fold(&[PLANET_LANDED, r#"{"event":"SupercruiseEntry","StarSystem":"Elsewhere"}"#]);
        assert_eq!(state.location.kind, LocationType::InSystem);
        assert_eq!(state.location.star_system, "Sol");
        assert_eq!(state.location.system_address, 10_477_373_803);
    }

    #[test]
    fn touchdown_and_liftoff_cycle() {
        let state = fold(&[
            PLANET_ORBIT,
            r#"{"event":"Touchdown","Latitude":-3.5,"Longitude":100.0}"#,
        ]);
        assert_eq!(state.location.kind, LocationType::Landed);
        assert!((state.location.latitude + 3.5).abs() < f64::EPSILON);

        let state = reduce(state, &decode(r#"{"event":"Liftoff"}"#).unwrap());
        assert_eq!(state.location.kind, LocationType::NearPlanet);
        assert_eq!(state.location.body, "Mars");
    }

    #[test]
    fn fsd_target_does_not_touch_location() {
        let state = fold(&[
            PLANET_LANDED,
            r#"{"event":"FSDTarget","Name":"Barnard's Star","SystemAddress":10477373804,"RemainingJumpsInRoute":3}"#,
        ]);
        assert_eq!(state.location.kind, LocationType::Landed);
        assert_eq!(state.target.name, "Barnard's Star");
        assert_eq!(state.target.system_address, 10_477_373_804);
        assert_eq!(state.target.remaining_jumps, 3);
    }

    #[test]
    fn approach_body_sets_body_and_near_planet() {
        let state = fold(&[
            r#"{"event":"FSDJump","StarSystem":"Sol","SystemAddress":1,"BodyType":"Star","Body":"Sol","BodyID":0}"#,
            r#"{"event":"ApproachBody","StarSystem":"Sol","SystemAddress":1,"Body":"Earth","BodyID":3}"#,
        ]);
        assert_eq!(state.location.kind, LocationType::NearPlanet);
        assert_eq!(state.location.body, "Earth");
        assert_eq!(state.location.body_id, 3);
    }

    #[test]
    fn approach_settlement_uses_settlement_body_name() {
        let state = fold(&[
            r#"{"event":"ApproachSettlement","Name":"Hahn Prospect","BodyName":"Sol 3 a","BodyID":9}"#,
        ]);
        assert_eq!(state.location.kind, LocationType::NearPlanet);
        assert_eq!(state.location.body, "Sol 3 a");
        assert_eq!(state.location.body_id, 9);
    }

    #[test]
    fn loadout_only_sets_capacity() {
        let state = fold(&[PLANET_ORBIT, r#"{"event":"Loadout","Ship":"python","CargoCapacity":64}"#]);
        assert_eq!(state.cargo_capacity, 64);
        assert_eq!(state.location.kind, LocationType::NearPlanet);
    }

    #[test]
    fn wrongly_typed_fields_leave_state_unchanged() {
        let state = fold(&[
            PLANET_ORBIT,
            r#"{"event":"Location","StarSystem":42,"SystemAddress":"oops","BodyType":"Planet","Body":"Mars","BodyID":4}"#,
        ]);
        assert_eq!(state.location.star_system, "Sol");
        assert_eq!(state.location.system_address, 10_477_373_803);
        assert_eq!(state.location.kind, LocationType::NearPlanet);
    }

    #[test]
    fn jump_into_final_target_sets_arrival() {
        let state = fold(&[
            r#"{"event":"FSDTarget","Name":"Alpha Centauri","SystemAddress":77,"RemainingJumpsInRoute":0}"#,
            r#"{"event":"FSDJump","StarSystem":"Alpha Centauri","SystemAddress":77,"BodyType":"Star","Body":"Alpha Centauri","BodyID":0}"#,
        ]);
        assert!(state.arrived_at_fsd_target);
        assert!(!state.target.is_set());

        let state = reduce(
            state,
            &decode(r#"{"event":"SupercruiseExit","StarSystem":"Alpha Centauri","SystemAddress":77,"BodyType":"Station","Body":"Hutton Orbital","BodyID":12}"#)
                .unwrap(),
        );
        assert!(!state.arrived_at_fsd_target);
    }

    #[test]
    fn direct_target_after_route_resets_jump_count() {
        let state = fold(&[
            r#"{"event":"FSDTarget","Name":"Hop","SystemAddress":77,"RemainingJumpsInRoute":3}"#,
            r#"{"event":"FSDTarget","Name":"Direct","SystemAddress":88}"#,
        ]);
        assert_eq!(state.target.system_address, 88);
        assert_eq!(state.target.remaining_jumps, 0);

        let state = reduce(
            state,
            &decode(r#"{"event":"FSDJump","StarSystem":"Direct","SystemAddress":88,"BodyType":"Star"}"#)
                .unwrap(),
        );
        assert!(state.arrived_at_fsd_target);
        assert!(!state.target.is_set());
    }

    #[test]
    fn supercruise_exit_recomputes_location() {
        let state = fold(&[
            r#"{"event":"FSDJump","StarSystem":"Sol","SystemAddress":10477373803,"BodyType":"Star","Body":"Sol","BodyID":0}"#,
            r#"{"event":"SupercruiseExit","StarSystem":"Sol","SystemAddress":10477373803,"BodyType":"Planet","Body":"Mars","BodyID":4}"#,
        ]);
        assert_eq!(state.location.kind, LocationType::NearPlanet);
        assert_eq!(state.location.body, "Mars");
        assert_eq!(state.location.body_id, 4);
        assert_eq!(state.location.body_type, "Planet");

        let state = reduce(
            state,
            &decode(r#"{"event":"SupercruiseExit","StarSystem":"Sol","SystemAddress":10477373803,"BodyType":"Station","Body":"Abraham Lincoln","BodyID":12}"#)
                .unwrap(),
        );
        assert_eq!(state.location.kind, LocationType::InSystem);
        assert_eq!(state.location.body_type, "Station");
    }

    #[test]
    fn jump_mid_route_is_not_arrival() {
        let state = fold(&[
            r#"{"event":"FSDTarget","Name":"Hop","SystemAddress":77,"RemainingJumpsInRoute":2}"#,
            r#"{"event":"FSDJump","StarSystem":"Hop","SystemAddress":77,"BodyType":"Star"}"#,
        ]);
        assert!(!state.arrived_at_fsd_target);
        assert!(state.target.is_set());
    }

    #[test]
    fn destination_locality() {
        let dest = Destination {
            system_address: 5,
            body_id: 2,
            name: "Moon".to_string(),
        };
        assert!(dest.is_local_to(5));
        assert!(!dest.is_local_to(6));
        assert!(!Destination::default().is_local_to(0));
    }
}
