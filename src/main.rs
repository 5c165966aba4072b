use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use schemadesk::{
    AppConfig, Column, ConsoleNotifier, Controller, HttpSchemaService, logging, render, shell,
};

#[derive(Parser, Debug)]
#[command(name = "schemadesk", about = "Manage tables on a remote schema migration service")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, default_value = schemadesk::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the service base URL
    #[arg(long, global = true, env = "SCHEMADESK_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tables
    List,
    /// Show the columns of a table
    Show { table: String },
    /// Create a table from column specs `name:type[:attr,attr]`
    Create {
        table: String,
        #[arg(required = true)]
        columns: Vec<String>,
    },
    /// Delete a table
    Drop { table: String },
    /// Rename a table
    Rename { old_name: String, new_name: String },
    /// Add a column `name:type[:attr,attr]` to a table
    AddColumn { table: String, column: String },
    /// Delete a column from a table
    DropColumn { table: String, column: String },
    /// Interactive editing session
    Shell,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(base_url) = cli.base_url {
        config.service.base_url = base_url;
    }
    logging::init(&config.log.filter);

    let service = HttpSchemaService::new(config.service.clone());
    let mut controller = Controller::new(service, Box::new(ConsoleNotifier));
    // The shell still starts with an empty list when the fetch fails.
    if let Err(err) = controller.fetch_tables().await {
        if !matches!(cli.command, Command::Shell) {
            return Err(err.into());
        }
    }

    match cli.command {
        Command::List => print!("{}", render::table_list(controller.registry())),
        Command::Show { table } => {
            let table = controller.select_table(&table)?;
            print!("{}", render::table_detail(table));
        }
        Command::Create { table, columns } => {
            let columns = columns
                .iter()
                .map(|spec| spec.parse::<Column>())
                .collect::<Result<Vec<_>, _>>()?;
            controller.begin_new_table();
            let draft = controller.draft_mut();
            draft.table_name = table;
            draft.columns = columns;
            controller.create_table().await?;
        }
        Command::Drop { table } => {
            if !controller.registry().contains(&table) {
                bail!("Table not found: {}", table);
            }
            controller.delete_table(&table).await?;
        }
        Command::Rename { old_name, new_name } => {
            controller.select_table(&old_name)?;
            controller.show_rename_form()?;
            controller.set_rename_input(&new_name);
            controller.rename_table().await?;
        }
        Command::AddColumn { table, column } => {
            let column: Column = column.parse()?;
            controller.add_column(&table, column).await?;
        }
        Command::DropColumn { table, column } => {
            controller.delete_column(&table, &column).await?;
        }
        Command::Shell => {
            let stdin = std::io::stdin();
            shell::run(&mut controller, stdin.lock(), std::io::stdout()).await?;
        }
    }

    Ok(())
}
