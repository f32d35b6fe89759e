#![forbid(unsafe_code)]
use anyhow::Result;
use clap::Parser;
use shiftswap::{
    parse_week, Config, PagerDutyClient, Planner, RunOptions, ScheduleService, TextReport,
};
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Échange deux semaines d'astreinte entre l'utilisateur courant (porteur du
/// token) et un autre utilisateur, via des overrides temporaires.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Nom du planning
    #[arg(long)]
    schedule: String,

    /// Début de la semaine de l'utilisateur courant (YYYY-MM-DD)
    #[arg(long = "current_user_week")]
    current_user_week: String,

    /// Nom de l'autre utilisateur
    #[arg(long = "other_username")]
    other_username: String,

    /// Début de la semaine de l'autre utilisateur (YYYY-MM-DD)
    #[arg(long = "other_user_week")]
    other_user_week: String,

    /// Simulation : imprime les overrides prévus, n'écrit rien
    #[arg(long)]
    dry_run: bool,

    /// Saute la vérification d'occupation des fenêtres
    #[arg(long)]
    no_verify: bool,

    /// URL de base de l'API (sinon PAGERDUTY_API_URL, sinon l'URL publique)
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _ = Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    // Validation locale avant tout appel réseau.
    let current_window = parse_week("current_user_week", &cli.current_user_week)?;
    let other_window = parse_week("other_user_week", &cli.other_user_week)?;

    let config = Config::from_env()?;
    let api_url = cli.api_url.unwrap_or(config.api_url);
    let client = PagerDutyClient::new(config.token, api_url);

    let current_user = client.current_user()?;
    let planner = Planner::new(&client);
    let plan = planner.plan(
        &cli.schedule,
        current_user,
        &cli.other_username,
        current_window,
        other_window,
    )?;

    let opts = RunOptions {
        dry_run: cli.dry_run,
        verify: !cli.no_verify,
    };
    let outcome = planner.run(&plan, &TextReport, opts)?;

    for warning in &outcome.warnings {
        eprintln!(
            "warning: {} does not appear on call between {} and {}",
            warning.user_name,
            warning.window.start().to_rfc3339(),
            warning.window.end().to_rfc3339()
        );
    }

    if let Some(report) = outcome.report {
        print!("{report}");
        return Ok(());
    }

    println!(
        "swap applied on \"{}\": {} takes {}..{}, {} takes {}..{}",
        plan.schedule.name,
        plan.other_user.name,
        plan.first.window.start().to_rfc3339(),
        plan.first.window.end().to_rfc3339(),
        plan.current_user.name,
        plan.second.window.start().to_rfc3339(),
        plan.second.window.end().to_rfc3339(),
    );
    Ok(())
}
