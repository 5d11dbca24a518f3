mod parsers;
mod result;

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use log::error;
use log::info;
use log::warn;
use log::Level;
use log::LevelFilter;
use parsers::dimacs::parse_cnf;
use parsers::dimacs::CnfInstance;
use result::UnitPropError;
use result::UnitPropResult;
use unitprop_core::statistics::configure_statistic_logging;
use unitprop_core::statistics::log_statistic_postfix;
use unitprop_core::statistics::Statistic;
use unitprop_core::statistics::StatisticLogger;
use unitprop_core::Inconsistent;
use unitprop_core::Literal;
use unitprop_core::PropagationStatistics;
use unitprop_core::UnitPropagator;

#[derive(Debug, Parser)]
#[command(author, version, about, arg_required_else_help = true)]
struct Args {
    /// The instance to propagate, a '*.cnf' file in the DIMACS format.
    instance_path: PathBuf,

    /// Literals which are asserted as units after the unit clauses of the instance are
    /// propagated, given as comma-separated DIMACS codes (for example `-a=-1,4`).
    #[arg(
        short = 'a',
        long = "assume",
        value_delimiter = ',',
        allow_hyphen_values = true
    )]
    assumptions: Vec<i32>,

    /// Enables log message output from the propagator
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    verbose: bool,

    /// Enables logging of statistics from the propagator
    #[arg(short = 's', long = "log-statistics", default_value_t = false)]
    log_statistics: bool,

    /// If `--verbose` is enabled removes the timestamp information from the log messages
    #[arg(long = "omit-timestamp", default_value_t = false)]
    omit_timestamp: bool,

    /// If `--verbose` is enabled removes the call site information from the log messages.
    /// Call site is the file and line in it that originated the message.
    #[arg(long = "omit-call-site", default_value_t = false)]
    omit_call_site: bool,
}

fn configure_logging_unknown() -> std::io::Result<()> {
    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "{}", record.args()))
        .filter_level(LevelFilter::Trace)
        .target(env_logger::Target::Stdout)
        .init();
    Ok(())
}

fn configure_logging(
    verbose: bool,
    log_statistics: bool,
    omit_timestamp: bool,
    omit_call_site: bool,
) -> std::io::Result<()> {
    if log_statistics {
        configure_statistic_logging("c STAT", None, None);
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "c ")?;
            if record.level() != Level::Info && !omit_timestamp {
                write!(buf, "{} ", buf.timestamp())?;
            }
            write!(buf, "{} ", record.level())?;
            if record.level() != Level::Info && !omit_call_site {
                write!(
                    buf,
                    "[{}:{}] ",
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0)
                )?;
            }
            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> UnitPropResult<()> {
    let args = Args::parse();

    if args.instance_path.extension().and_then(|ext| ext.to_str()) != Some("cnf") {
        configure_logging_unknown()?;
        return Err(UnitPropError::invalid_instance(args.instance_path.display()));
    }

    configure_logging(
        args.verbose,
        args.log_statistics,
        args.omit_timestamp,
        args.omit_call_site,
    )?;

    if unitprop_core::asserts::UNITPROP_ASSERT_LEVEL_DEFINITION
        >= unitprop_core::asserts::UNITPROP_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.",
            unitprop_core::asserts::UNITPROP_ASSERT_LEVEL_DEFINITION
        );
    }

    let instance = parse_cnf::<CnfInstance>(File::open(&args.instance_path)?)?;
    let assumptions = args
        .assumptions
        .iter()
        .map(|&code| parse_assumption(code, instance.num_variables))
        .collect::<UnitPropResult<Vec<_>>>()?;

    info!(
        "Read {} clauses over {} variables",
        instance.clauses.len(),
        instance.num_variables
    );

    let mut propagator = match UnitPropagator::new(instance.clauses) {
        Ok(propagator) => propagator,
        Err(inconsistent) => {
            print_inconsistent(inconsistent);
            if args.log_statistics {
                // The propagator is not returned, so only the inconsistency itself is counted.
                log_statistics(&PropagationStatistics {
                    num_inconsistencies: 1,
                    ..Default::default()
                });
            }
            return Ok(());
        }
    };

    let result = propagator.add_units(assumptions);

    match result {
        Ok(_) => print_units(&propagator),
        Err(inconsistent) => print_inconsistent(inconsistent),
    }

    if args.log_statistics {
        log_statistics(propagator.statistics());
    }

    Ok(())
}

fn parse_assumption(code: i32, num_variables: usize) -> UnitPropResult<Literal> {
    if code == 0 || code == i32::MIN || code.unsigned_abs() as usize > num_variables {
        return Err(UnitPropError::InvalidAssumption(code));
    }

    Ok(Literal::from_dimacs(code))
}

fn log_statistics(statistics: &PropagationStatistics) {
    statistics.log(StatisticLogger::new(["propagation"]));
    log_statistic_postfix();
}

fn print_units(propagator: &UnitPropagator) {
    let units = propagator
        .units()
        .iter()
        .sorted_by_key(|literal| literal.variable())
        .map(|literal| literal.to_string())
        .chain(std::iter::once("0".to_owned()))
        .join(" ");

    println!("s CONSISTENT");
    println!("v {units}");
}

fn print_inconsistent(inconsistent: Inconsistent) {
    println!("s INCONSISTENT");
    println!("c {inconsistent}");
}
