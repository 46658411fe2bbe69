use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use txsched_cli::{App, ClassifyArgs, Command, InputArgs, S2plArgs};
use txsched_core::graph::dot::render_dot;
use txsched_core::locking::Step;
use txsched_core::schedule::display::format_schedule;
use txsched_core::schedule::{conflicts, validate};
use txsched_core::{
    check, classify, conflict_graph, conservative_two_phase_locking, reads_from,
    serialization_order, strict_two_phase_locking, Schedule, Strictness, Verdict,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let app = App::parse();
    let ok = match &app.command {
        Command::Classify(args) => classify_cmd(args),
        Command::ReadsFrom(args) => reads_from_cmd(args),
        Command::Conflicts(args) => conflicts_cmd(args),
        Command::Graph(args) => graph_cmd(args),
        Command::Serialize(args) => serialize_cmd(args),
        Command::C2pl(args) => c2pl_cmd(args),
        Command::S2pl(args) => s2pl_cmd(args),
        Command::Fmt(args) => fmt_cmd(args),
        Command::Schema => schema_cmd(),
    };

    if !ok {
        process::exit(1);
    }
}

fn load(args: &InputArgs) -> Schedule<String> {
    let schedule = args.read_schedule().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    if let Err(e) = validate(&schedule) {
        tracing::warn!(%e, "schedule is not well formed; results may be meaningless");
    }
    tracing::info!(operations = schedule.len(), "schedule loaded");
    schedule
}

fn print_verdict(verdict: &Verdict<String>, verbose: bool) {
    println!("{}: {}", verdict.level, verdict.holds);
    if verbose {
        for step in &verdict.trace {
            println!("  {step}");
        }
    } else if let Some(violation) = verdict.violation() {
        println!("  {violation}");
    }
}

fn classify_cmd(args: &ClassifyArgs) -> bool {
    let schedule = load(&args.input);

    if let Some(level) = args.level {
        let verdict = check(&schedule, level.into());
        if args.input.json {
            println!("{}", serde_json::json!(verdict));
        } else {
            print_verdict(&verdict, args.input.verbose);
        }
        return verdict.holds;
    }

    let classification = classify(&schedule);
    let recoverable = classification.is_recoverable();
    if args.input.json {
        let result = serde_json::json!({
            "recoverable": recoverable,
            "strongest": classification.strongest(),
            "verdicts": classification.verdicts,
        });
        println!("{result}");
    } else {
        for verdict in &classification.verdicts {
            print_verdict(verdict, args.input.verbose);
        }
        println!("recoverable: {recoverable}");
    }
    recoverable
}

fn reads_from_cmd(args: &InputArgs) -> bool {
    let schedule = load(args);
    let relation = reads_from(&schedule);

    if args.json {
        println!("{}", serde_json::json!(relation));
    } else {
        for entry in &relation {
            if args.verbose {
                println!("{entry} (position {})", entry.position);
            } else {
                println!("{entry}");
            }
        }
    }
    true
}

fn conflicts_cmd(args: &InputArgs) -> bool {
    let schedule = load(args);
    let pairs = conflicts(&schedule);

    if args.json {
        println!("{}", serde_json::json!(pairs));
    } else {
        for (first, second) in &pairs {
            println!("{first} {second}");
        }
    }
    true
}

fn graph_cmd(args: &InputArgs) -> bool {
    let schedule = load(args);
    let graph = conflict_graph(&schedule);

    if args.json {
        let result = serde_json::json!({
            "vertices": graph.vertices(),
            "edges": graph.to_edge_list(),
        });
        println!("{result}");
    } else {
        print!("{}", render_dot(&graph, "conflicts"));
    }
    true
}

fn serialize_cmd(args: &InputArgs) -> bool {
    let schedule = load(args);

    match serialization_order(&schedule) {
        Ok(order) => {
            if args.json {
                println!("{}", serde_json::json!({ "ok": true, "order": order }));
            } else {
                let order: Vec<String> = order.iter().map(|t| format!("t{t}")).collect();
                println!("{}", order.join(" "));
            }
            true
        }
        Err(e) => {
            if args.json {
                println!("{}", serde_json::json!({ "ok": false, "error": e }));
            } else {
                eprintln!("{e}");
            }
            false
        }
    }
}

fn print_steps(steps: &[Step<String>], verbose: bool) {
    if verbose {
        for step in steps {
            println!("{step}");
        }
    } else {
        let steps: Vec<String> = steps.iter().map(ToString::to_string).collect();
        println!("{}", steps.join(" "));
    }
}

fn c2pl_cmd(args: &InputArgs) -> bool {
    let schedule = load(args);
    let steps = conservative_two_phase_locking(&schedule);

    if args.json {
        println!("{}", serde_json::json!({ "ok": true, "steps": steps }));
    } else {
        print_steps(&steps, args.verbose);
    }
    true
}

fn s2pl_cmd(args: &S2plArgs) -> bool {
    let schedule = load(&args.input);
    let strictness = if args.strong {
        Strictness::StrongStrict
    } else {
        Strictness::Strict
    };

    match strict_two_phase_locking(&schedule, strictness) {
        Ok(steps) => {
            if args.input.json {
                println!("{}", serde_json::json!({ "ok": true, "steps": steps }));
            } else {
                print_steps(&steps, args.input.verbose);
            }
            true
        }
        Err(deadlock) => {
            if args.input.json {
                println!("{}", serde_json::json!({ "ok": false, "deadlock": deadlock }));
            } else {
                print_steps(&deadlock.steps, args.input.verbose);
                eprintln!("{deadlock}");
            }
            false
        }
    }
}

fn fmt_cmd(args: &InputArgs) -> bool {
    let schedule = load(args);
    println!("{}", format_schedule(&schedule));
    true
}

fn schema_cmd() -> bool {
    let schema = schemars::schema_for!(Schedule<String>);
    match serde_json::to_string_pretty(&schema) {
        Ok(text) => {
            println!("{text}");
            true
        }
        Err(e) => {
            eprintln!("Failed to render schema: {e}");
            false
        }
    }
}
