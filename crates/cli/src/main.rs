use crate::{
    commands::{Commands, FilterArgs},
    env::EnvManager,
    error::CliError,
};
use clap::Parser;
use model::{
    core::value::Value,
    search::filter::{FilterNode, FilterType, FilterValue},
};
use planner::{
    filter::{
        FilterCompiler, alias::FieldAliasResolver, catalog::Catalog, context::CompilerContext,
    },
    query::dialect::SqlDialect,
};
use std::{str::FromStr, sync::Arc};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod env;
mod error;

#[derive(Parser)]
#[command(
    name = "filterc",
    version = "0.1.0",
    about = "Compiles catalog search filters into SQL fragments"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            target,
            values,
            set,
            negate,
            query,
        } => {
            let compiler = load_compiler(&target).await?;
            let filter = filter_node(&target, &values, set)?;
            let fragment = compiler.compile(&filter, negate, &query)?;
            println!("{fragment}");
        }
        Commands::Explain { target } => {
            let compiler = load_compiler(&target).await?;
            let filter = filter_node(&target, &[], false)?;
            let strategy = compiler.strategy_for(&filter)?;
            let json = serde_json::to_string_pretty(&strategy).map_err(CliError::JsonSerialize)?;
            println!("{json}");
        }
    }

    Ok(())
}

async fn load_compiler(args: &FilterArgs) -> Result<FilterCompiler, CliError> {
    let source = tokio::fs::read_to_string(&args.catalog).await?;
    let mut catalog = Catalog::from_json(&source)?;

    let mut env = EnvManager::new();
    if let Some(path) = &args.env_file {
        env.load_from_file(path)?;
    }
    env.apply_overrides(&mut catalog)?;

    let dialect = SqlDialect::from_str(&args.dialect).map_err(CliError::InvalidArgument)?;
    info!(
        "Loaded catalog {} with {} attributes (store {}, {dialect})",
        args.catalog,
        catalog.attributes.len(),
        catalog.store_id
    );

    let catalog = Arc::new(catalog);
    let ctx = CompilerContext {
        attributes: catalog.clone(),
        entities: catalog.clone(),
        scope: catalog.clone(),
        aliases: Arc::new(FieldAliasResolver),
        config: catalog.clone(),
        tables: catalog,
    };

    Ok(FilterCompiler::new(ctx, dialect.shared()))
}

fn filter_node(
    args: &FilterArgs,
    values: &[String],
    force_set: bool,
) -> Result<FilterNode, CliError> {
    let filter_type = FilterType::from_str(&args.filter_type).map_err(CliError::InvalidArgument)?;

    let mut parsed: Vec<Value> = values.iter().map(|v| Value::parse_literal(v)).collect();
    let value = if parsed.len() > 1 || force_set {
        FilterValue::Set(parsed)
    } else {
        FilterValue::Scalar(parsed.pop().unwrap_or(Value::Null))
    };

    Ok(FilterNode::new(args.field.clone(), filter_type, value))
}
