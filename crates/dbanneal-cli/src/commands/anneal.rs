use crate::cli::Cli;
use crate::config::FileConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use dbanneal::{
    core::io::{
        design::DesignFile,
        sim_out::{SimOutFile, SimOutput},
        traits::SimFile,
    },
    engine::{
        config::{AnnealConfig, ScheduleConfig},
        progress::ProgressReporter,
        schedule::Schedule,
    },
    workflows,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

pub fn run(args: &Cli) -> Result<()> {
    info!("Loading design from {:?}", &args.input);
    let mut problem =
        DesignFile::read_from_path(&args.input).map_err(|source| CliError::Load {
            path: args.input.clone(),
            source,
        })?;

    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    file_config.merge_with_cli(args)?.apply_to(&mut problem)?;
    let config = AnnealConfig::from_problem(&problem)?;

    let mut rng = match config.seed {
        Some(seed) => {
            info!(seed, "Seeding random number generator.");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let reporter = if args.quiet {
        ProgressReporter::new()
    } else {
        let progress_handler = CliProgressHandler::new();
        ProgressReporter::with_callback(progress_handler.get_callback())
    };

    if !args.quiet {
        println!("{}", banner(problem.free_site_count(), &config.schedule));
    }
    info!("Invoking the core anneal workflow...");
    let result = workflows::anneal::run(&problem, &config, &reporter, &mut rng)?;

    if result.history.is_empty() {
        warn!("Anneal finished without recording any configuration.");
    }

    info!(
        "Writing {} configuration(s) to {:?}",
        result.history.len(),
        &args.output
    );
    SimOutFile::write_to_path(&SimOutput::from(&result), &args.output).map_err(|source| {
        CliError::Export {
            path: args.output.clone(),
            source,
        }
    })?;

    if !args.quiet {
        println!(
            "✓ {} configuration(s) (final energy {:.6} eV) written to: {}",
            result.history.len(),
            result.final_energy,
            args.output.display()
        );
    }
    Ok(())
}

fn banner(free_sites: usize, schedule: &ScheduleConfig) -> String {
    format!(
        "Annealing {} free site(s) for {} cycle(s)...",
        free_sites,
        Schedule::total_cycles(schedule)
    )
}
