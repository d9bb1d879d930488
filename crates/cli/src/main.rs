use clap::Parser;
use gsmenv::commands;
use gsmenv_config::{ConfigLoader, CredentialSource};
use gsmenv_core::{constants::GCLOUD_PROGRAM, Environment};
use gsmenv_env::LaunchContext;

#[derive(Parser, Debug)]
#[command(name = "gsmenv")]
#[command(
    about = "Run a program with gcp: secret references in its environment resolved",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Id of the project to query
    #[arg(long, value_name = "ID")]
    project: Option<String>,

    /// Get debug output
    #[arg(long)]
    verbose: bool,

    /// Use default application credentials and ignore the gcloud configuration
    #[arg(long)]
    use_default_credentials: bool,

    /// Print the value of a single secret instead of running a command
    #[arg(long, value_name = "SECRET")]
    name: Option<String>,

    /// Program to run and its arguments, or `noop` to only resolve
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    gsmenv_utils::tracing::init(cli.verbose).map_err(|e| eyre::eyre!(e))?;

    let environment = Environment::capture();
    let source = CredentialSource::select(
        cli.use_default_credentials,
        which::which(GCLOUD_PROGRAM).is_ok(),
    );
    tracing::debug!(source = %source, "selected credentials");

    let credentials = gsmenv_secrets::provider_for(source, &environment);
    let credential_project =
        commands::credential_project(&*credentials, cli.project.as_deref(), &environment).await;

    let config = ConfigLoader::new()
        .project(cli.project)
        .credential_source(source)
        .credential_project(credential_project)
        .environment(environment)
        .load()?;

    let client = gsmenv_secrets::connect(&config, credentials);
    let ctx = LaunchContext::new(&config, client.as_ref());

    if let Some(name) = cli.name.filter(|name| !name.is_empty()) {
        commands::get::execute(ctx, &name).await?;
        return Ok(());
    }

    if cli.command.is_empty() {
        eyre::bail!("expected --name or a command to run");
    }
    commands::run::execute(ctx, &cli.command).await?;
    Ok(())
}
