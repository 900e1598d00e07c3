use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;
use roa_core::{PlannerConfig, Requirement, SubPlanRecord, TestSet};
use roa_planner::logging::init_tracing;
use roa_planner::report::{render_plan, render_valuations};
use roa_planner::{load_config, load_records, load_sub_plans, Planner, ReleaseSimulator};
use roa_selection::Algorithm;

fn input_arg() -> Arg {
    Arg::new("input")
        .long("input")
        .short('i')
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON array of requirement records")
}

fn algorithm_arg() -> Arg {
    Arg::new("algorithm")
        .long("algorithm")
        .short('a')
        .default_value("knapsack")
        .help("random, best-random, greedy or knapsack")
}

fn seed_arg() -> Arg {
    Arg::new("seed")
        .long("seed")
        .value_parser(value_parser!(u64))
        .help("Random seed for reproducibility")
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .value_parser(value_parser!(PathBuf))
        .help("TOML planner configuration")
}

fn test_set_arg() -> Arg {
    Arg::new("test-set")
        .long("test-set")
        .value_parser(value_parser!(u8).range(1..=5))
        .help("Plan over one stored test set (1-5)")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn cli() -> Command {
    Command::new("roa-planner")
        .version(roa_planner::VERSION)
        .about("Real-options release planner")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .subcommand(
            Command::new("plan")
                .about("Select the next release")
                .arg(input_arg())
                .arg(algorithm_arg())
                .arg(seed_arg())
                .arg(config_arg())
                .arg(test_set_arg())
                .arg(
                    Arg::new("sub-plans")
                        .long("sub-plans")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON array of delivered sub-plans"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("evaluate")
                .about("Score the backlog without selecting")
                .arg(input_arg())
                .arg(seed_arg())
                .arg(config_arg())
                .arg(test_set_arg())
                .arg(
                    Arg::new("elapsed")
                        .long("elapsed")
                        .default_value("0")
                        .value_parser(value_parser!(i64))
                        .help("Releases already delivered"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("simulate")
                .about("Plan release after release until the backlog runs out")
                .arg(input_arg())
                .arg(algorithm_arg())
                .arg(seed_arg())
                .arg(config_arg())
                .arg(test_set_arg())
                .arg(
                    Arg::new("releases")
                        .long("releases")
                        .value_parser(value_parser!(usize))
                        .help("Number of releases (defaults to the configured horizon)"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("risk")
                .about("Sample a risk estimate for a business value")
                .arg(
                    Arg::new("base")
                        .long("base")
                        .required(true)
                        .value_parser(value_parser!(f64))
                        .help("Business value to perturb"),
                )
                .arg(seed_arg()),
        )
}

fn rng_from(args: &ArgMatches) -> StdRng {
    match args.get_one::<u64>("seed") {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    }
}

fn planner_from(args: &ArgMatches) -> anyhow::Result<Planner> {
    let config = match args.get_one::<PathBuf>("config") {
        Some(path) => load_config(path)?,
        None => PlannerConfig::default(),
    };
    Ok(Planner::new(config))
}

fn algorithm_from(args: &ArgMatches) -> anyhow::Result<Algorithm> {
    let name = args
        .get_one::<String>("algorithm")
        .map_or("knapsack", String::as_str);
    Ok(name.parse::<Algorithm>()?)
}

fn backlog_from(
    args: &ArgMatches,
    planner: &Planner,
    rng: &mut StdRng,
) -> anyhow::Result<Vec<Requirement>> {
    let path = args
        .get_one::<PathBuf>("input")
        .context("missing --input")?;
    let records = load_records(path)?;
    let backlog = planner
        .prepare_backlog(records, rng)
        .with_context(|| format!("invalid requirements in {}", path.display()))?;

    let Some(number) = args.get_one::<u8>("test-set") else {
        return Ok(backlog);
    };
    let Some(set) = TestSet::from_number(*number) else {
        bail!("test set must be between 1 and 5, got {number}");
    };
    let slice = set.slice(&backlog).to_vec();
    if slice.is_empty() {
        bail!("test set {number} is empty for {} records", backlog.len());
    }
    Ok(slice)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_plan(args: &ArgMatches) -> anyhow::Result<()> {
    let mut rng = rng_from(args);
    let planner = planner_from(args)?;
    let algorithm = algorithm_from(args)?;
    let backlog = backlog_from(args, &planner, &mut rng)?;
    let sub_plans: Vec<SubPlanRecord> = match args.get_one::<PathBuf>("sub-plans") {
        Some(path) => load_sub_plans(path)?,
        None => Vec::new(),
    };

    let outcome = planner
        .plan_next(algorithm, &backlog, &sub_plans, &mut rng)
        .context("planning failed")?;

    if args.get_flag("json") {
        print_json(&outcome)
    } else {
        print!("{}", render_plan(&outcome));
        Ok(())
    }
}

fn run_evaluate(args: &ArgMatches) -> anyhow::Result<()> {
    let mut rng = rng_from(args);
    let planner = planner_from(args)?;
    let backlog = backlog_from(args, &planner, &mut rng)?;
    let elapsed = args.get_one::<i64>("elapsed").copied().unwrap_or(0);

    let evaluated = planner.evaluate(&backlog, elapsed);
    if args.get_flag("json") {
        print_json(&evaluated)
    } else {
        print!("{}", render_valuations(&evaluated));
        Ok(())
    }
}

fn run_simulate(args: &ArgMatches) -> anyhow::Result<()> {
    let mut rng = rng_from(args);
    let planner = planner_from(args)?;
    let algorithm = algorithm_from(args)?;
    let backlog = backlog_from(args, &planner, &mut rng)?;

    let mut simulator = ReleaseSimulator::new(planner, algorithm);
    if let Some(releases) = args.get_one::<usize>("releases") {
        simulator = simulator.with_horizon(*releases);
    }
    let report = simulator
        .run(&backlog, &mut rng)
        .context("simulation failed")?;

    if args.get_flag("json") {
        print_json(&report)
    } else {
        print!("{}", report.generate_text());
        Ok(())
    }
}

fn run_risk(args: &ArgMatches) -> anyhow::Result<()> {
    let mut rng = rng_from(args);
    let base = *args.get_one::<f64>("base").context("missing --base")?;
    let risk = Planner::default().model().generate_risk(base, &mut rng)?;
    println!("{risk}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    init_tracing(matches.get_flag("log-json"), matches.get_count("verbose"))
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))?;

    match matches.subcommand() {
        Some(("plan", args)) => run_plan(args),
        Some(("evaluate", args)) => run_evaluate(args),
        Some(("simulate", args)) => run_simulate(args),
        Some(("risk", args)) => run_risk(args),
        _ => bail!("no subcommand given"),
    }
}
