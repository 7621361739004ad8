use std::{fs::File, io::BufWriter};

use dess_dispatch::{environment::Environment, episode::run_episode, prelude::*};

use crate::{
    cli::SimulateArgs,
    tables::{build_steps_table, build_summary_table},
};

#[instrument(skip_all)]
pub fn simulate(args: &SimulateArgs) -> Result {
    let scenario = args.input.read_scenario()?;
    let mut settings = args.input.read_settings()?;
    if let Some(max_steps) = args.max_steps {
        settings.environment.max_steps = Some(max_steps);
    }
    let currency = scenario.currency().to_uppercase();

    let mut environment = Environment::builder()
        .scenario(scenario)
        .dess(settings.dess)
        .config(settings.environment)
        .evaluator(settings.reward)
        .build()
        .context("invalid settings")?;
    let mut policy = args.policy.build()?;
    info!(policy = ?args.policy.kind, "simulating…");
    let log = run_episode(&mut environment, policy.as_mut())?;

    if args.steps {
        println!("{}", build_steps_table(&log));
    }
    println!("{}", build_summary_table(&log.summary(), &currency));

    if let Some(path) = &args.output_path {
        let file = File::create(path)
            .with_context(|| format!("failed to create `{}`", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &log)
            .context("failed to write the episode log")?;
        info!(path = %path.display(), "saved the episode log");
    }
    Ok(())
}
