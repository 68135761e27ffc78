use clap::Parser;

use fleetops_cli::{Args, run};

fn main() -> anyhow::Result<()> {
    fleetops_observability::init();

    let rendered = run(Args::parse())?;
    println!("{rendered}");
    Ok(())
}
