//! The three logical MFD pages.

use crate::display::page::Page;
use crate::journal::state::LocationType;
use crate::layout::{PAGE_WIDTH, center, right_justify};
use crate::render::RenderContext;
use crate::render::layouts::{body_detail, system_overview};

/// Frame line for splash and arrival screens.
pub const BANNER: &str = "################";
/// Destination page with nothing selected.
pub const NO_DESTINATION: &str = " No Destination ";
/// Cargo page before any cargo document has loaded.
pub const NO_CARGO_DATA: &str = "No cargo data";
/// Cargo page for a loaded but empty hold.
pub const CARGO_HOLD_EMPTY: &str = "Cargo Hold Empty";

/// Where the commander is: the current body when near one, else the system.
pub fn location_page(ctx: &RenderContext<'_>) -> Page {
    let mut page = Page::new();
    let loc = &ctx.state.location;
    match loc.kind {
        LocationType::NearPlanet => body_detail(
            &mut page,
            "NEAR BODY",
            &loc.body,
            loc.system_address,
            loc.body_id,
            None,
            ctx.sysinfo,
        ),
        LocationType::Landed => body_detail(
            &mut page,
            "LANDED",
            &loc.body,
            loc.system_address,
            loc.body_id,
            Some((loc.latitude, loc.longitude)),
            ctx.sysinfo,
        ),
        LocationType::InSystem | LocationType::Docked => system_overview(
            &mut page,
            "CUR SYSTEM",
            &loc.star_system,
            loc.system_address,
            None,
            ctx.sysinfo,
        ),
    }
    page
}

/// Where the commander is heading.
///
/// Precedence: splash, arrival notice, in-system body destination, FSD target.
pub fn destination_page(ctx: &RenderContext<'_>) -> Page {
    let mut page = Page::new();
    let state = ctx.state;

    if state.show_splash {
        page.add(BANNER);
        page.add(center("EDx52display", PAGE_WIDTH));
        page.add(center(concat!("v", env!("CARGO_PKG_VERSION")), PAGE_WIDTH));
        page.add(BANNER);
    } else if state.arrived_at_fsd_target {
        page.add(BANNER);
        page.add(center("You have arrived", PAGE_WIDTH));
        page.add(BANNER);
    } else if state.destination.is_local_to(state.location.system_address) {
        body_detail(
            &mut page,
            "LOCAL TGT",
            &state.destination.name,
            state.location.system_address,
            state.destination.body_id,
            None,
            ctx.sysinfo,
        );
    } else if state.target.is_set() {
        system_overview(
            &mut page,
            "NEXT JUMP",
            &state.target.name,
            state.target.system_address,
            Some(state.target.remaining_jumps),
            ctx.sysinfo,
        );
    } else {
        page.add(NO_DESTINATION);
    }
    page
}

/// Hold contents sorted by display name.
pub fn cargo_page(ctx: &RenderContext<'_>) -> Page {
    let mut page = Page::new();
    let Some(cargo) = ctx.cargo else {
        page.add(NO_CARGO_DATA);
        return page;
    };

    page.add(format!("#Cargo: {:03}/{:03}#", cargo.count, ctx.state.cargo_capacity));
    if cargo.inventory.is_empty() {
        page.add(CARGO_HOLD_EMPTY);
        return page;
    }

    let mut lines: Vec<(&str, i64)> = cargo
        .inventory
        .iter()
        .map(|line| (line.display_name(ctx.names), line.count))
        .collect();
    lines.sort_by(|a, b| a.0.cmp(b.0));
    for (name, count) in lines {
        page.add(right_justify(&format!("{name}:"), &count.to_string(), PAGE_WIDTH, 0));
    }
    page
}
