use clap::{Parser, Subcommand};
use portal_forms::config::AppConfig;
use portal_forms::definition::FormDefinition;
use portal_forms::driver::{Driver, DriverOutcome};
use portal_forms::forms;
use portal_forms::{Role, SimulatedGateway, StepwiseForm, SubmitPurpose};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "portal-forms")]
#[command(about = "Fill in patient and provider portal forms from the terminal", long_about = None)]
struct Cli {
    /// YAML configuration for the simulated endpoint
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a provider account
    Register {
        /// Use a form described in YAML instead of the built-in wizard
        #[arg(long)]
        definition: Option<PathBuf>,
    },
    /// Sign in to a portal
    Login {
        #[arg(long, value_enum, default_value = "patient")]
        role: Role,
    },
    /// Show what each role sees on its dashboard
    Roles,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_or_default(cli.config.as_deref())?;

    let (mut form, role): (StepwiseForm, Role) = match cli.command {
        Commands::Roles => {
            print_roles();
            return Ok(());
        }
        Commands::Register {
            definition: Some(path),
        } => (FormDefinition::load(&path)?.build()?, Role::Provider),
        Commands::Register { definition: None } => {
            (forms::provider_registration(), Role::Provider)
        }
        Commands::Login { role } => (role.login_form(), role),
    };

    let gateway = SimulatedGateway::from_config(&config.gateway, role);
    println!("{} (:back to go back, :quit to leave)", form.name());

    let stdin = io::stdin();
    let mut driver = Driver::new(stdin.lock(), io::stdout());
    match driver.run(&mut form, &gateway).await? {
        DriverOutcome::Completed(completion) => match form.purpose() {
            SubmitPurpose::Register => println!("Registered account {}", completion.identity.id),
            SubmitPurpose::Login => println!("Signed in as {}", completion.identity.id),
        },
        DriverOutcome::Quit => println!("Nothing submitted."),
    }
    Ok(())
}

fn print_roles() {
    for role in Role::all() {
        println!("{role} ({})", role.dashboard_route());
        let nav: Vec<&str> = role.navigation().iter().map(|item| item.label()).collect();
        println!("  navigation: {}", nav.join(", "));
        for metric in role.metrics() {
            println!("  - {}", metric.label());
        }
    }
}
