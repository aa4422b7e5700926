use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{RealtimeSnapshot, SummarySnapshot},
    display::{DisplayOptions, LoadMix},
    fmt::FormattedPercentage,
    quantity::{energy::KilowattHours, power::Kilowatts},
};

/// Current flows and today's totals, rows without a reported value are left out.
pub fn build_dashboard_table(
    realtime: &RealtimeSnapshot,
    summary: &SummarySnapshot,
    options: &DisplayOptions,
) -> Table {
    let kw = options.kw_decimal_places;
    let kwh = options.kwh_decimal_places;

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["", "Now", "Today", "Mix"]);

    if let Some(state_of_charge) = realtime.state_of_charge() {
        let level = options.soc_thresholds.level(state_of_charge);
        table.add_row(vec![
            Cell::new("Battery"),
            Cell::new(format!("{state_of_charge:.0}"))
                .set_alignment(CellAlignment::Right)
                .fg(level.color())
                .add_attribute(Attribute::Bold),
            Cell::new(""),
            Cell::new(""),
        ]);
    }

    let load_power = realtime.load_power().map(Kilowatts::from);
    let load_energy = summary.load_energy();
    if load_power.is_some() || load_energy.is_some() {
        let mix = LoadMix::from_summary(summary);
        table.add_row(vec![
            Cell::new("Load"),
            Cell::new(load_power.map(|power| format!("{power:.kw$}")).unwrap_or_default())
                .set_alignment(CellAlignment::Right),
            Cell::new(load_energy.map(|energy| format!("{energy:.kwh$}")).unwrap_or_default())
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(
                mix.map(|mix| {
                    format!(
                        "self {} · grid {}",
                        FormattedPercentage(mix.self_consumption),
                        FormattedPercentage(mix.grid),
                    )
                })
                .unwrap_or_default(),
            )
            .fg(match mix {
                Some(mix) if mix.grid > mix.self_consumption => Color::DarkYellow,
                Some(_) => Color::Green,
                None => Color::Reset,
            }),
        ]);
    }

    let pv_power = realtime.pv_power().map(Kilowatts::from);
    let pv_energy = summary.pv_energy();
    if pv_power.is_some() || pv_energy.is_some() {
        table.add_row(vec![
            Cell::new("Solar"),
            Cell::new(pv_power.map(|power| format!("{power:.kw$}")).unwrap_or_default())
                .set_alignment(CellAlignment::Right)
                .fg(match pv_power {
                    Some(power) if power > Kilowatts::ZERO => Color::Green,
                    _ => Color::Reset,
                }),
            Cell::new(pv_energy.map(|energy| format!("{energy:.kwh$}")).unwrap_or_default())
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(""),
        ]);
    }

    if let Some(grid_import) = summary.grid_import_energy()
        && grid_import > KilowattHours::ZERO
    {
        table.add_row(vec![
            Cell::new("Grid import"),
            Cell::new(""),
            Cell::new(format!("{grid_import:.kwh$}"))
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(""),
        ]);
    }

    table
}
