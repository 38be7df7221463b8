use adfill_core::{run_simulation, RunnerConfig, SimulationConfig};
use clap::{value_parser, Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Command::new("adfill")
        .version(adfill_core::VERSION)
        .about("Checkpointed batch runner for ad-creative image quotas")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("simulate")
                .about("Run the batch loop against seeded in-memory collaborators")
                .arg(
                    Arg::new("groups")
                        .long("groups")
                        .default_value("12")
                        .value_parser(value_parser!(usize))
                        .help("Number of synthetic ad groups"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .default_value("4")
                        .value_parser(value_parser!(usize))
                        .help("Creative quota per ad group"),
                )
                .arg(
                    Arg::new("time-budget-ms")
                        .long("time-budget-ms")
                        .default_value("30000")
                        .value_parser(value_parser!(u64))
                        .help("Watchdog budget per invocation (simulated ms)"),
                )
                .arg(
                    Arg::new("empty-batches")
                        .long("empty-batches")
                        .default_value("0")
                        .value_parser(value_parser!(usize))
                        .help("Image calls that return empty before the generator recovers"),
                )
                .arg(
                    Arg::new("runs-only")
                        .long("runs-only")
                        .action(ArgAction::SetTrue)
                        .help("Print only the per-invocation lines"),
                ),
        )
        .subcommand(
            Command::new("check-config")
                .about("Load and validate a runner configuration file")
                .arg(
                    Arg::new("path")
                        .long("path")
                        .required(true)
                        .help("Path to a TOML configuration file"),
                ),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("simulate", args)) => {
            let config = SimulationConfig {
                seed: *args.get_one::<u64>("seed").unwrap(),
                groups: *args.get_one::<usize>("groups").unwrap(),
                target_per_group: *args.get_one::<usize>("target").unwrap(),
                time_budget_ms: *args.get_one::<u64>("time-budget-ms").unwrap(),
                empty_batches_first: *args.get_one::<usize>("empty-batches").unwrap(),
                ..Default::default()
            };

            let report = run_simulation(config).await?;
            if args.get_flag("runs-only") {
                for (i, run) in report.invocations.iter().enumerate() {
                    println!("run {}: {run}", i + 1);
                }
            } else {
                println!("{}", report.generate_text());
            }

            std::process::exit(if report.passed() { 0 } else { 1 });
        }
        Some(("check-config", args)) => {
            let path = args.get_one::<String>("path").unwrap();
            let config = RunnerConfig::load(path)?;

            println!("Configuration OK");
            println!("  target_per_group: {}", config.target_per_group);
            println!("  time_budget_ms: {}", config.time_budget_ms);
            println!("  max_empty_batches: {}", config.max_empty_batches);
            println!("  subfolders: {}", config.subfolders.join(", "));
            println!("  generated_subfolder: {}", config.generated_subfolder);
            match &config.prompt {
                adfill_core::PromptConfig::AdGroup { template, .. } => {
                    println!("  prompt mode: ad_group (template: {template})");
                }
                adfill_core::PromptConfig::Keywords { .. } => {
                    println!("  prompt mode: keywords");
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
