//! Shared page layouts: system overview and body detail.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::warn;

use crate::core::errors::EdxError;
use crate::display::page::Page;
use crate::layout::{PAGE_WIDTH, credits, group_thousands, parse_star_type, right_justify, space_between};
use crate::sysinfo::{Body, SystemInfo, SystemInfoService};

/// Shown when EDSM has no record of the system or body.
pub const NO_EDSM_DATA: &str = "No EDSM data";
/// Shown when the lookup itself failed.
pub const LOOKUP_ERROR: &str = "Sysinfo lookup error";

pub(crate) fn lookup_error_line(err: &EdxError) -> &'static str {
    match err {
        EdxError::NoSystemData { .. } => NO_EDSM_DATA,
        other => {
            warn!(error = %other, "system lookup failed");
            LOOKUP_ERROR
        }
    }
}

/// Overview of a whole system: star, body count, payouts, valuable bodies and
/// where to prospect.
pub(crate) fn system_overview(
    page: &mut Page,
    header: &str,
    system_name: &str,
    system_id: i64,
    remaining_jumps: Option<i64>,
    sysinfo: &dyn SystemInfoService,
) {
    let lookup = sysinfo
        .fetch_bodies(system_id)
        .and_then(|sys| sysinfo.fetch_value(system_id).map(|value| (sys, value)));
    let (sys, value) = match lookup {
        Ok(found) => found,
        Err(err) => {
            page.add(header);
            page.add(system_name);
            page.add(lookup_error_line(&err));
            return;
        }
    };

    let main_star = sys.main_star();
    if main_star.is_some_and(|star| star.is_scoopable) {
        page.add(space_between(&[header, "FUEL"], PAGE_WIDTH));
    } else {
        page.add(header);
    }
    page.add(system_name);

    let star = parse_star_type(main_star.map_or("", |star| star.sub_type.as_str()));
    let jumps = remaining_jumps.map(|n| format!("J:{n}")).unwrap_or_default();
    page.add(space_between(&[format!("CLS:{}", star.class), jumps], PAGE_WIDTH));
    page.add(star.desc);

    page.add(space_between(&["Bodies:".to_string(), group_thousands(sys.body_count)], PAGE_WIDTH));
    page.add(space_between(&["Scan:".to_string(), credits(value.estimated_value)], PAGE_WIDTH));
    page.add(space_between(&["Map:".to_string(), credits(value.estimated_value_mapped)], PAGE_WIDTH));

    if !value.valuable_bodies.is_empty() {
        page.add("Valuable Bodies:");
        for body in &value.valuable_bodies {
            page.add(right_justify(
                body.short_name(&sys.name),
                &credits(body.value_max),
                PAGE_WIDTH,
                1,
            ));
        }
    }

    prospecting(page, &sys);
}

/// A material and the landable bodies carrying it, richest first.
struct Deposit<'a> {
    material: &'a str,
    bodies: Vec<(&'a Body, f64)>,
}

impl Deposit<'_> {
    fn best_share(&self) -> f64 {
        self.bodies.first().map_or(0.0, |(_, pct)| *pct)
    }
}

fn rank_deposits(sys: &SystemInfo) -> Vec<Deposit<'_>> {
    let mut by_material: BTreeMap<&str, Vec<(&Body, f64)>> = BTreeMap::new();
    for body in sys.landable_bodies() {
        for (material, pct) in &body.materials {
            by_material.entry(material.as_str()).or_default().push((body, *pct));
        }
    }

    let mut deposits: Vec<Deposit<'_>> = by_material
        .into_iter()
        .map(|(material, mut bodies)| {
            bodies.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
            Deposit { material, bodies }
        })
        .collect();

    // More bodies first, then the richer best body, then by name.
    deposits.sort_by(|a, b| {
        b.bodies
            .len()
            .cmp(&a.bodies.len())
            .then_with(|| {
                b.best_share()
                    .partial_cmp(&a.best_share())
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.material.cmp(b.material))
    });
    deposits
}

fn prospecting(page: &mut Page, sys: &SystemInfo) {
    if sys.landable_bodies().next().is_none() {
        return;
    }
    page.add("Prospecting:");
    for deposit in rank_deposits(sys) {
        page.add(format!("{} {}", deposit.material, deposit.bodies.len()));
        if let Some((best, pct)) = deposit.bodies.first() {
            page.add(format!("{}: {pct:.2}%", best.short_name(&sys.name)));
        }
    }
}

/// Surface details for one body of a system.
pub(crate) fn body_detail(
    page: &mut Page,
    header: &str,
    body_name: &str,
    system_id: i64,
    body_id: i64,
    landed_at: Option<(f64, f64)>,
    sysinfo: &dyn SystemInfoService,
) {
    let sys = match sysinfo.fetch_bodies(system_id) {
        Ok(sys) => sys,
        Err(err) => {
            page.add(header);
            page.add(body_name);
            page.add(lookup_error_line(&err));
            return;
        }
    };
    let Some(body) = sys.body_by_id(body_id) else {
        page.add(header);
        page.add(body_name);
        page.add(NO_EDSM_DATA);
        return;
    };

    page.add(space_between(&[header.to_string(), format!("{:.2}G", body.gravity)], PAGE_WIDTH));
    page.add(body_name);
    if let Some((latitude, longitude)) = landed_at {
        page.add(space_between(&[format!("{latitude:.3}"), format!("{longitude:.3}")], PAGE_WIDTH));
    }
    if !body.sub_type.is_empty() {
        page.add(body.sub_type.as_str());
    }

    let materials = body.materials_sorted();
    if !materials.is_empty() {
        page.add("Materials:");
        for share in materials {
            page.add(format!("{:5.2}% {}", share.percentage, share.name));
        }
    }
}
