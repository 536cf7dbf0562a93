use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fibclock::{
    AnimationPlanner, FibonacciTree, IndexPath, PhaseCalculator, SystemClock, TimePartitionTable,
    WallClock, WallTime,
};

#[derive(Parser, Debug)]
#[command(name = "fibclock", about = "Inspect the Fibonacci-word clock model")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the Fibonacci word spelled by the tree at a depth.
    Tree {
        /// Tree depth to expand to.
        #[arg(default_value_t = 5)]
        depth: usize,
    },
    /// Print the cycle phase at every configured depth.
    Phases {
        /// Wall time as HH:MM:SS (default: now).
        #[arg(long)]
        time: Option<String>,
    },
    /// Print the animation plan for one node.
    Plan {
        /// Index path of the node, e.g. 0101 (empty for the root).
        #[arg(default_value = "")]
        path: String,
        /// Wall time as HH:MM:SS (default: now).
        #[arg(long)]
        time: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tree { depth } => run_tree(depth)?,
        Commands::Phases { time } => run_phases(time)?,
        Commands::Plan { path, time } => run_plan(path, time)?,
    }

    Ok(())
}

fn run_tree(depth: usize) -> Result<()> {
    let mut tree = FibonacciTree::new();
    for d in 0..=depth {
        let word: String = tree
            .letters_at_depth(d)
            .into_iter()
            .map(|l| l.to_string())
            .collect();
        println!("depth {d}\t{word}");
    }
    Ok(())
}

fn run_phases(time: Option<String>) -> Result<()> {
    let now = resolve_time(time)?;
    let table = TimePartitionTable::default();
    let calc = PhaseCalculator::new(&table);

    println!("time {now}");
    for (depth, partition) in table.iter().enumerate() {
        let phase = calc
            .phase(depth, now)
            .with_context(|| format!("phase at depth {depth}"))?;
        println!(
            "depth {}\t{} x {}\tperiod={}s\telapsed={}s\tphase={:.4}",
            depth,
            partition.size,
            partition.unit,
            phase.period_seconds,
            phase.elapsed_seconds,
            phase.fraction
        );
    }
    Ok(())
}

fn run_plan(path: String, time: Option<String>) -> Result<()> {
    let now = resolve_time(time)?;
    let path: IndexPath = path.parse().context("invalid index path")?;

    let mut tree = FibonacciTree::new();
    let node = tree
        .node_at(&path)
        .with_context(|| format!("no node at {path}"))?;

    let planner = AnimationPlanner::new(TimePartitionTable::default());
    let plan = planner
        .plan(&tree, node, now)
        .with_context(|| format!("planning {path}"))?;

    println!(
        "node {}\tletter={}\tdepth={}\tperiod={}s\tlead_in={:.3}s",
        plan.path,
        tree.letter(node),
        plan.depth,
        plan.period_seconds,
        plan.lead_in
    );

    match &plan.rotation {
        Some(rotation) => {
            println!(
                "rotation\tcatch-up {:.1}° -> {:.1}° over {:.3}s, then 90° per {:.3}s",
                rotation.catch_up.from,
                rotation.catch_up.to,
                rotation.catch_up.duration,
                rotation.spin.duration
            );
        }
        None => println!("rotation\tsuppressed (sole child of an A-node)"),
    }

    match &plan.opacity {
        Some(opacity) => {
            if let Some(fade_in) = &opacity.fade_in {
                println!(
                    "opacity\tfade-in {:.3} -> 1 over {:.3}s",
                    fade_in.from, fade_in.duration
                );
            }
            println!(
                "opacity\tfade-out {:.3} -> 0 over {:.3}s, then breathe every {:.3}s",
                opacity.fade_out.from,
                opacity.fade_out.duration,
                2.0 * opacity.breathing.duration
            );
        }
        None => println!("opacity\tnone (deepest depth)"),
    }

    Ok(())
}

fn resolve_time(time: Option<String>) -> Result<WallTime> {
    match time {
        None => Ok(SystemClock.now()),
        Some(text) => {
            let mut fields = text.split(':');
            let mut component = |name: &str| -> Result<u8> {
                fields
                    .next()
                    .with_context(|| format!("missing {name} in '{text}'"))?
                    .parse()
                    .with_context(|| format!("invalid {name} in '{text}'"))
            };
            let hour = component("hour")?;
            let minute = component("minute")?;
            let second = component("second")?;
            WallTime::new(hour, minute, second).context("wall time out of range")
        }
    }
}
