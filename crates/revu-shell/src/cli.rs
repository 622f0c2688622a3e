use clap::Parser;

/// revu — shell for the RevuLink web app.
#[derive(Parser, Debug)]
#[command(name = "revu", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log directive override (e.g. revu=debug).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
