use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use command::{
    CommandAction, CommandHandler, CommandRequest, CommandResponse, CreateTagPayload,
    PathPayload, TagIdPayload, TagPathPayload,
};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tagdex_index::{TagIndex, TagStore, TargetType};

mod command;
mod serve;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "tagdex")]
#[command(about = "Label files and folders with tags and look them up by path", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Tags file to use (default: $TAGDEX_TAGS_FILE, then the per-user config dir)
    #[arg(long, global = true)]
    tags_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// Pretty-print JSON responses
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a single JSON request
    Command(CommandArgs),

    /// Serve newline-delimited JSON requests over stdin/stdout
    Serve,

    /// List every tag
    List,

    /// Show the tags covering a path
    #[command(name = "tags-for")]
    TagsFor(TagsForArgs),

    /// Create a tag with a generated id
    Create(CreateArgs),

    /// Attach a path to a tag
    Attach(TagPathArgs),

    /// Detach a path (and every equivalent one) from a tag
    Detach(TagPathArgs),

    /// Delete a tag
    Remove(RemoveArgs),
}

#[derive(Args)]
struct CommandArgs {
    /// Inline JSON payload (mutually exclusive with --file)
    #[arg(long, conflicts_with = "file")]
    json: Option<String>,

    /// Path to file containing JSON payload
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct TagsForArgs {
    path: String,
}

#[derive(Args)]
struct CreateArgs {
    name: String,

    /// Display color (default: #FF6B6B)
    #[arg(long)]
    color: Option<String>,

    /// file | folder | both
    #[arg(long, default_value = "both", value_parser = parse_target_type)]
    target_type: TargetType,
}

#[derive(Args)]
struct TagPathArgs {
    tag_id: String,
    path: String,
}

#[derive(Args)]
struct RemoveArgs {
    tag_id: String,
}

fn parse_target_type(raw: &str) -> std::result::Result<TargetType, String> {
    raw.parse::<TargetType>().map_err(|err| err.to_string())
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    }
    builder.target(env_logger::Target::Stderr).init();

    let store = match &cli.tags_file {
        Some(path) => TagStore::open(path),
        None => TagStore::at_default_location().context("Cannot resolve the tags file location")?,
    };
    log::debug!("Using tags file {}", store.path().display());
    let handler = CommandHandler::new(TagIndex::new(store));

    let request = match cli.command {
        Commands::Serve => return serve::run(&handler).await,
        Commands::Command(args) => {
            let raw = read_payload(&args)?;
            let response = handler.execute_raw(&raw).await;
            return emit(&response, cli.pretty);
        }
        Commands::List => build_request(CommandAction::LoadTags, &serde_json::json!({}))?,
        Commands::TagsFor(args) => build_request(
            CommandAction::GetFileTags,
            &PathPayload { path: args.path },
        )?,
        Commands::Create(args) => build_request(
            CommandAction::CreateTag,
            &CreateTagPayload {
                name: args.name,
                color: args.color,
                target_type: Some(args.target_type),
            },
        )?,
        Commands::Attach(args) => build_request(
            CommandAction::AddPathToTag,
            &TagPathPayload {
                tag_id: args.tag_id.into(),
                path: args.path,
            },
        )?,
        Commands::Detach(args) => build_request(
            CommandAction::RemovePathFromTag,
            &TagPathPayload {
                tag_id: args.tag_id.into(),
                path: args.path,
            },
        )?,
        Commands::Remove(args) => build_request(
            CommandAction::RemoveTag,
            &TagIdPayload {
                tag_id: args.tag_id.into(),
            },
        )?,
    };

    let response = handler.execute(request).await;
    emit(&response, cli.pretty)
}

fn build_request<P: Serialize>(action: CommandAction, payload: &P) -> Result<CommandRequest> {
    Ok(CommandRequest {
        action,
        payload: serde_json::to_value(payload)?,
    })
}

fn emit(response: &CommandResponse, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        serde_json::to_string(response)?
    };
    print_stdout(&output)?;

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn read_payload(args: &CommandArgs) -> Result<String> {
    if let Some(raw) = &args.json {
        return Ok(raw.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON from {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read JSON from stdin")?;

    if buffer.trim().is_empty() {
        anyhow::bail!("Command request is empty. Provide --json, --file, or pipe JSON via stdin.");
    }

    Ok(buffer)
}
