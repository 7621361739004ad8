use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use dess_dispatch::{
    environment::{
        Observation,
        space::{ACTION_SPACE, Bounds, OBSERVATION_SPACE},
    },
    episode::{EpisodeLog, EpisodeSummary},
    quantity::{Zero, cost::Cost, power::Kilowatts, price::MegawattHourPrice},
    scenario::Scenario,
};
use itertools::{Itertools, MinMaxResult};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn percentage(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

fn level_color(level: f64) -> Color {
    if level < 0.1 {
        Color::Red
    } else if level > 0.9 {
        Color::DarkYellow
    } else {
        Color::Green
    }
}

pub fn build_steps_table(log: &EpisodeLog) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "#", "Hour", "Demand", "Renewables", "Price", "Battery", "Electrolyzer", "Fuel cell",
        "Grid", "Cost", "SoC", "H₂", "Reward",
    ]);
    for record in log {
        let diagnostics = &record.diagnostics;
        let operation = &diagnostics.operation;
        table.add_row(vec![
            Cell::new(diagnostics.step).add_attribute(Attribute::Dim),
            Cell::new(format!("{:02}:00", record.row.hour)),
            Cell::new(record.row.demand).set_alignment(CellAlignment::Right),
            Cell::new(record.row.on_site_generation())
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(record.row.grid_price).set_alignment(CellAlignment::Right).fg(
                if record.row.grid_price > diagnostics.trailing_mean_price {
                    Color::Red
                } else {
                    Color::Green
                },
            ),
            Cell::new(operation.battery).set_alignment(CellAlignment::Right).fg(
                if operation.battery < Kilowatts::ZERO { Color::Green } else { Color::Reset },
            ),
            Cell::new(operation.hydrogen.electrolyzer).set_alignment(CellAlignment::Right),
            Cell::new(operation.hydrogen.fuel_cell).set_alignment(CellAlignment::Right).fg(
                if operation.hydrogen.fuel_cell > Kilowatts::ZERO {
                    Color::Green
                } else {
                    Color::Reset
                },
            ),
            Cell::new(diagnostics.grid_draw).set_alignment(CellAlignment::Right).fg(
                if diagnostics.grid_draw > Kilowatts::ZERO { Color::Red } else { Color::Green },
            ),
            Cell::new(diagnostics.total_cost)
                .set_alignment(CellAlignment::Right)
                .fg(if diagnostics.total_cost > Cost::ZERO { Color::Red } else { Color::Green }),
            Cell::new(percentage(diagnostics.battery_soc))
                .set_alignment(CellAlignment::Right)
                .fg(level_color(diagnostics.battery_soc)),
            Cell::new(percentage(diagnostics.hydrogen_level))
                .set_alignment(CellAlignment::Right)
                .fg(level_color(diagnostics.hydrogen_level)),
            Cell::new(format!("{:.1}", record.reward))
                .set_alignment(CellAlignment::Right)
                .fg(if record.reward >= 0.0 { Color::Green } else { Color::Red }),
        ]);
    }
    table
}

pub fn build_summary_table(summary: &EpisodeSummary, currency: &str) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    let status = if summary.terminated {
        "completed"
    } else if summary.truncated {
        "truncated"
    } else {
        "interrupted"
    };
    let rows: [(&str, String); 13] = [
        ("Steps", format!("{} ({status})", summary.n_steps)),
        ("Total cost", format!("{} {currency}", summary.total_cost)),
        ("Grid cost", format!("{} {currency}", summary.grid_cost)),
        ("Operating cost", format!("{} {currency}", summary.operating_cost)),
        ("Grid energy", summary.grid_energy.to_string()),
        ("Unmet energy", summary.unmet_energy.to_string()),
        ("Renewable share", percentage(summary.renewable_share)),
        ("Mean SoC", percentage(summary.mean_battery_soc)),
        ("Mean H₂ level", percentage(summary.mean_hydrogen_level)),
        ("Total reward", format!("{:.1}", summary.total_reward)),
        ("Cost score", format!("{:.1}", summary.scores.cost)),
        ("Resilience score", format!("{:.1}", summary.scores.resilience)),
        ("Sustainability score", format!("{:.1}", summary.scores.sustainability)),
    ];
    for (metric, value) in rows {
        table.add_row(vec![
            Cell::new(metric).add_attribute(Attribute::Dim),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_scenario_table(scenario: &Scenario, moving_average_window: usize) -> Table {
    let rows = scenario.rows();
    #[expect(clippy::cast_precision_loss)]
    let n_rows = rows.len() as f64;
    let mean_price =
        MegawattHourPrice(rows.iter().map(|row| row.grid_price.0).sum::<f64>() / n_rows);
    let mean_demand: Kilowatts = rows.iter().map(|row| row.demand).sum::<Kilowatts>() / n_rows;
    let mean_generation: Kilowatts =
        rows.iter().map(|row| row.on_site_generation()).sum::<Kilowatts>() / n_rows;
    let (min_price, max_price) = match rows.iter().map(|row| row.grid_price).minmax() {
        MinMaxResult::NoElements => (MegawattHourPrice::ZERO, MegawattHourPrice::ZERO),
        MinMaxResult::OneElement(price) => (price, price),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    #[expect(clippy::cast_precision_loss)]
    let peak_share = (0..rows.len())
        .filter(|&index| {
            scenario
                .trailing_mean_price(index, moving_average_window)
                .is_some_and(|mean| rows[index].grid_price > mean)
        })
        .count() as f64
        / n_rows;

    let mut table = new_table();
    table.set_header(vec!["Property", "Value"]);
    let properties: [(&str, String); 8] = [
        ("Rows", rows.len().to_string()),
        ("Currency", scenario.currency().to_uppercase()),
        ("Min price", min_price.to_string()),
        ("Mean price", mean_price.to_string()),
        ("Max price", max_price.to_string()),
        ("Price peaks", percentage(peak_share)),
        ("Mean demand", mean_demand.to_string()),
        ("Mean renewables", mean_generation.to_string()),
    ];
    for (property, value) in properties {
        table.add_row(vec![
            Cell::new(property).add_attribute(Attribute::Dim),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn add_bounds<const N: usize>(
    table: &mut Table,
    space: &str,
    names: [&str; N],
    bounds: &Bounds<N>,
) {
    for ((name, low), high) in names.into_iter().zip(bounds.low).zip(bounds.high) {
        table.add_row(vec![
            Cell::new(space).add_attribute(Attribute::Dim),
            Cell::new(name),
            Cell::new(low).set_alignment(CellAlignment::Right),
            Cell::new(high).set_alignment(CellAlignment::Right),
        ]);
    }
}

pub fn build_spaces_table() -> Table {
    let mut table = new_table();
    table.set_header(vec!["Space", "Component", "Low", "High"]);
    add_bounds(&mut table, "action", ["battery", "electrolyzer", "fuel_cell"], &ACTION_SPACE);
    let observation_names: [&str; Observation::N_DIMENSIONS] = [
        "hour",
        "day_of_week",
        "demand_kw",
        "solar_kw",
        "wind_kw",
        "grid_price",
        "battery_soc",
        "hydrogen_level",
    ];
    add_bounds(&mut table, "observation", observation_names, &OBSERVATION_SPACE);
    table
}
