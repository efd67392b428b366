use anyhow::{bail, Context, Result};
use memwarden::config::{Config, ConfigLoader};
use memwarden::engine::{run_tick, Session, TickOutcome};
use memwarden::{roster, TypeTag};
use std::str::FromStr;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConfigLoader::new("memwarden.toml").load_or_default();

    let level = Level::from_str(&config.logging.level).unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => list_processes(),
        [pid, tag, value, rest @ ..] => {
            let watch = rest.iter().any(|a| a == "--watch");
            let pid: u32 = pid.parse().context("PID must be a number")?;
            let tag: TypeTag = tag.parse()?;
            run_scan(&config, pid, tag, value, watch).await
        }
        _ => bail!("usage: memwarden [<pid> <type> <value> [--watch]]"),
    }
}

fn list_processes() -> Result<()> {
    let processes = roster()?;
    println!("{:>8}  {:>8}  NAME", "PID", "PPID");
    for p in &processes {
        println!("{:>8}  {:>8}  {}", p.pid, p.parent_pid, p.name);
    }
    Ok(())
}

async fn run_scan(config: &Config, pid: u32, tag: TypeTag, value: &str, watch: bool) -> Result<()> {
    let mut session = Session::with_options(1, config.scan_options());

    let name = roster()?
        .into_iter()
        .find(|p| p.pid == pid)
        .map(|p| p.name)
        .unwrap_or_default();
    session.select_process(pid, name);

    let hits = session.scan_set(0, tag, value)?;
    info!(pid, %tag, hits, "scan complete");
    print_rows(&session, 20);

    if !watch {
        return Ok(());
    }

    info!(
        interval_ms = config.tick_interval().as_millis() as u64,
        "watching; Ctrl+C to stop"
    );

    let mut interval = tokio::time::interval(config.tick_interval());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let outcome = run_tick(&mut session);
                match outcome {
                    TickOutcome::Completed => print_rows(&session, 5),
                    TickOutcome::Skipped => {}
                    _ => {
                        if let Some(status) = outcome.status_line(pid) {
                            warn!("{status}");
                        }
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("stopping");
                break;
            }
        }
    }

    Ok(())
}

fn print_rows(session: &Session, limit: usize) {
    let rows = session.set(0).rows();
    for row in rows.iter().take(limit) {
        println!("{}  {}", row.address, row.current.format(row.tag));
    }
    if rows.len() > limit {
        println!("... and {} more", rows.len() - limit);
    }
}
