use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "layout-reflect", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the bindable properties of a type as JSON.
    Properties(PropertiesArgs),
    /// Cast a JSON value to the type of a property.
    Cast(CastArgs),
}

#[derive(Parser, Debug)]
struct PropertiesArgs {
    /// Schema JSON file.
    #[arg(long)]
    schema: PathBuf,

    /// Type to inspect.
    #[arg(long = "type")]
    type_name: String,

    /// Ancestor whose properties (and its own ancestors') are excluded.
    #[arg(long, default_value = "AnyObject")]
    boundary: String,
}

#[derive(Parser, Debug)]
struct CastArgs {
    /// Schema JSON file.
    #[arg(long)]
    schema: PathBuf,

    /// Type that owns the property.
    #[arg(long = "type")]
    type_name: String,

    /// Property name as listed by `properties`.
    #[arg(long)]
    property: String,

    /// JSON scalar to cast.
    #[arg(long)]
    value: String,

    /// Ancestor whose properties are excluded.
    #[arg(long, default_value = "AnyObject")]
    boundary: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Properties(args) => cmd_properties(args),
        Command::Cast(args) => cmd_cast(args),
    }
}

fn load_schema(path: &Path) -> anyhow::Result<layout_reflect::Schema> {
    let file = layout_reflect::SchemaFile::from_path(path)?;
    let schema = file
        .build()
        .with_context(|| format!("build schema '{}'", path.display()))?;
    Ok(schema)
}

fn lookup_properties(
    schema: &layout_reflect::Schema,
    type_name: &str,
    boundary: &str,
) -> anyhow::Result<layout_reflect::PropertyMap> {
    let ty = schema.get(type_name)?;
    let boundary = schema.get(boundary)?;
    if !ty.is_subtype_of(boundary) {
        anyhow::bail!("type `{ty}` does not descend from `{boundary}`");
    }
    Ok(schema.catalog().all_properties(ty, boundary))
}

fn cmd_properties(args: PropertiesArgs) -> anyhow::Result<()> {
    let schema = load_schema(&args.schema)?;
    let properties = lookup_properties(&schema, &args.type_name, &args.boundary)?;
    println!("{}", serde_json::to_string_pretty(&properties)?);
    Ok(())
}

fn cmd_cast(args: CastArgs) -> anyhow::Result<()> {
    let schema = load_schema(&args.schema)?;
    let properties = lookup_properties(&schema, &args.type_name, &args.boundary)?;
    let descriptor = properties.get(&args.property).with_context(|| {
        format!(
            "`{}` has no bindable property `{}`",
            args.type_name, args.property
        )
    })?;

    let json: serde_json::Value =
        serde_json::from_str(&args.value).with_context(|| "parse --value JSON")?;
    let value = layout_reflect::Value::from_json(json)
        .with_context(|| "--value must be a JSON scalar")?;
    let Some(cast) = descriptor.cast(&value) else {
        anyhow::bail!(
            "cannot cast `{value}` ({}) to {descriptor}",
            value.type_key()
        );
    };

    tracing::debug!(property = %args.property, %descriptor, "cast succeeded");
    println!("{}", serde_json::to_string_pretty(&cast.to_json())?);
    Ok(())
}
