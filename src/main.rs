/*!
 * schedsim - Main Entry Point
 *
 * Launches a workload of suspended OS processes and drives them with the
 * selected scheduling discipline, then prints the timing report.
 */

use std::error::Error;
use std::process::ExitCode;
use tracing::{error, info};

use sched_sim::{
    init_tracing, Launcher, ReadyQueue, Scheduler, SchedulingPolicy, TimeQuantum, WorkloadConfig,
};

const USAGE: &str = "Usage: schedsim <config file> [--policy rr|priority|sjf] \
                     [--quantum-ms N] [--json]";

struct CliArgs {
    config_path: String,
    policy: SchedulingPolicy,
    quantum: TimeQuantum,
    json: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs, Box<dyn Error>> {
    let mut config_path = None;
    let mut policy = SchedulingPolicy::RoundRobin;
    let mut quantum = TimeQuantum::default();
    let mut json = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--policy" => {
                let value = iter.next().ok_or("--policy needs a value")?;
                policy = SchedulingPolicy::parse(value)?;
            }
            "--quantum-ms" => {
                let value = iter.next().ok_or("--quantum-ms needs a value")?;
                quantum = TimeQuantum::from_millis(value.parse()?)?;
            }
            "--json" => json = true,
            other if config_path.is_none() && !other.starts_with('-') => {
                config_path = Some(other.to_string());
            }
            other => return Err(format!("unexpected argument '{}'", other).into()),
        }
    }

    Ok(CliArgs {
        config_path: config_path.ok_or("missing config file")?,
        policy,
        quantum,
        json,
    })
}

fn run(args: CliArgs) -> Result<(), Box<dyn Error>> {
    info!("schedsim starting");

    let config = WorkloadConfig::load(&args.config_path)?;
    info!(
        entries = config.len(),
        config = %args.config_path,
        "Workload configuration loaded"
    );

    let launcher = Launcher::new();
    let pcbs = launcher.launch_all(&config);
    if pcbs.is_empty() {
        return Err("no workload process could be launched".into());
    }

    let mut queue = ReadyQueue::from_pcbs(&pcbs);
    let entry_count = queue.len();

    let scheduler = Scheduler::with_quantum(args.policy, args.quantum);
    let summary = scheduler.run(&mut queue, &launcher);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
    }

    // Reap anything still alive (abandoned entries), then drop the queue
    // with the count recorded at construction.
    launcher.terminate_all();
    queue.release(entry_count);

    info!("schedsim finished");
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}
