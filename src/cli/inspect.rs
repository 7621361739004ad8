use dess_dispatch::prelude::*;

use crate::{
    cli::InspectArgs,
    tables::{build_scenario_table, build_spaces_table},
};

#[instrument(skip_all)]
pub fn inspect(args: &InspectArgs) -> Result {
    let scenario = args.input.read_scenario()?;
    let settings = args.input.read_settings()?;
    println!(
        "{}",
        build_scenario_table(&scenario, settings.environment.moving_average_window)
    );
    println!("{}", build_spaces_table());
    Ok(())
}
