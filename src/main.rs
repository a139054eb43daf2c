use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use std::io::{self, Write};

use yamlnav::config::{Config, OutputFormat};
use yamlnav::document::node::{YamlNode, YamlValue};
use yamlnav::document::tree::YamlFile;
use yamlnav::file::loader::{load_yaml_file, load_yaml_from_stdin};
use yamlnav::yamlpath::{KeyAliases, Segment, Traversal, YamlPath, YamlTraversal};

/// yamlnav - find nodes in YAML files by path
#[derive(Parser)]
#[command(name = "yamlnav")]
#[command(version)]
#[command(about = "Find nodes in YAML files by path", long_about = None)]
#[command(group(ArgGroup::new("query").required(true).args(["property", "segment", "at"])))]
struct Cli {
    /// YAML file to read (`-` for stdin, `.gz` files are decompressed)
    file: String,

    /// Dotted property path looked up in every document, e.g. `spec.replicas`
    #[arg(short, long)]
    property: Option<String>,

    /// Whole-file path as segment codes, e.g. `-s '[0' -s .jobs -s '*'`
    #[arg(short, long = "segment", value_name = "CODE", allow_hyphen_values = true)]
    segment: Vec<String>,

    /// Print the path of the node at this character offset instead
    #[arg(long, value_name = "OFFSET")]
    at: Option<usize>,

    /// Print only the first endpoint
    #[arg(long)]
    first: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Don't prefix endpoints with their line and column
    #[arg(long)]
    no_positions: bool,
}

/// Settings after merging the config file with command-line flags.
struct Settings {
    format: OutputFormat,
    show_positions: bool,
    first_only: bool,
    aliases: KeyAliases,
}

impl Settings {
    fn new(cli: &Cli, config: Config) -> Self {
        Self {
            format: cli.format.unwrap_or(config.output_format),
            show_positions: config.show_positions && !cli.no_positions,
            first_only: config.first_only || cli.first,
            aliases: config.aliases,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = Settings::new(&cli, Config::load());

    let file = if cli.file == "-" {
        load_yaml_from_stdin()?
    } else {
        load_yaml_file(&cli.file)?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let found = match cli.at {
        Some(offset) => print_path_at(&mut out, &file, offset)?,
        None => {
            let traversal = build_traversal(&cli, &settings.aliases)?;
            log::debug!("traversal: {}", traversal);
            print_endpoints(&mut out, &file, &traversal, &settings)?
        }
    };
    out.flush()?;

    if !found {
        std::process::exit(1);
    }
    Ok(())
}

/// `--segment` codes form a whole-file path; `--property` is looked up in
/// every document, each key expanded through the configured aliases.
fn build_traversal(cli: &Cli, aliases: &KeyAliases) -> Result<YamlTraversal> {
    if !cli.segment.is_empty() {
        let path = YamlPath::decode(&cli.segment).context("Invalid --segment code")?;
        return Ok(path.into());
    }

    let property = cli.property.as_deref().unwrap_or_default();
    let mut traversal: YamlTraversal = Segment::any_child().into();
    for key in property.split('.').filter(|key| !key.is_empty()) {
        traversal = traversal.then(aliases.value_at(key)?);
    }
    Ok(traversal)
}

fn print_endpoints<W: Write>(
    out: &mut W,
    file: &YamlFile,
    traversal: &YamlTraversal,
    settings: &Settings,
) -> Result<bool> {
    let limit = if settings.first_only { 1 } else { usize::MAX };
    let mut found = false;

    for cursor in traversal.traverse_ambiguously(file.root_cursor()).take(limit) {
        found = true;
        let Some(node) = cursor.node() else {
            writeln!(out, "<file>")?;
            continue;
        };
        match settings.format {
            OutputFormat::Text => {
                if settings.show_positions {
                    write!(out, "{}:{}\t", node.line(), node.col())?;
                }
                writeln!(out, "{}", summarize(node))?;
            }
            OutputFormat::Yaml => {
                if settings.show_positions {
                    writeln!(out, "# {}:{}", node.line(), node.col())?;
                }
                let value: serde_yaml::Value = node.into();
                let rendered =
                    serde_yaml::to_string(&value).context("Failed to render node as YAML")?;
                write!(out, "---\n{}", rendered)?;
            }
        }
    }
    Ok(found)
}

fn print_path_at<W: Write>(out: &mut W, file: &YamlFile, offset: usize) -> Result<bool> {
    let refs = file.ast_path_at(offset);
    if refs.is_empty() {
        log::debug!("no node covers offset {}", offset);
        return Ok(false);
    }
    match YamlPath::from_ast_path(&refs) {
        Some(path) => {
            writeln!(out, "{}", path.tail().to_prop_string())?;
            writeln!(out, "{}", path.encode().join(" "))?;
            Ok(true)
        }
        None => {
            writeln!(out, "<node under a complex key>")?;
            Ok(false)
        }
    }
}

fn summarize(node: &YamlNode) -> String {
    match node.value() {
        YamlValue::Scalar(scalar) => scalar.to_string(),
        YamlValue::Mapping(entries) => format!("<mapping, {} entries>", entries.len()),
        YamlValue::Sequence(items) => format!("<sequence, {} items>", items.len()),
    }
}
