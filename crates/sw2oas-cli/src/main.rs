use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::debug;

use sw2oas_core::config::{self, CONFIG_FILE_NAME, Sw2OasConfig};
use sw2oas_core::parse::{self, descriptor::DescriptorDocument};
use sw2oas_core::transform;
use sw2oas_core::{DocumentGraph, GeneratedFile};

#[derive(Parser)]
#[command(
    name = "sw2oas",
    about = "Convert Swagger 1.2 descriptors into modular OpenAPI 3.0 documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert descriptors and write the OpenAPI document graph
    Convert {
        /// Descriptor JSON/YAML file, or a directory of descriptor files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Remove previously generated path and schema documents first
        #[arg(long)]
        clean: bool,
    },

    /// Summarize what a conversion would produce
    Inspect {
        /// Descriptor file or directory
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new sw2oas configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            clean,
        } => cmd_convert(input, output, clean),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "sw2oas", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<Sw2OasConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Descriptor files under `input`: the file itself, or every `.json`/`.yaml`
/// file in the directory sorted by name so merges are reproducible.
fn descriptor_files(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in
        fs::read_dir(input).with_context(|| format!("failed to read {}", input.display()))?
    {
        let path = entry?.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if path.is_file() && matches!(ext, "json" | "yaml" | "yml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load_descriptors(input: &Path) -> Result<Vec<DescriptorDocument>> {
    let mut docs = Vec::new();
    for path in descriptor_files(input)? {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parsed = match ext {
            "yaml" | "yml" => parse::from_yaml(&content),
            _ => parse::from_json(&content),
        }
        .with_context(|| format!("failed to parse {}", path.display()))?;

        debug!("{}: {} descriptors", path.display(), parsed.len());
        docs.extend(parsed);
    }
    Ok(docs)
}

fn load_graph(input: &Path, cfg: &Sw2OasConfig) -> Result<DocumentGraph> {
    let docs = load_descriptors(input)?;
    let graph = transform::transform(&docs, &cfg.document)?;
    Ok(graph)
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

/// Remove the path and schema directories left by a previous run.
fn clean_output(base: &Path, cfg: &Sw2OasConfig) -> Result<()> {
    let layout = &cfg.document.layout;
    for dir in [&layout.paths_dir, &layout.schemas_dir] {
        let path = base.join(dir);
        if path.is_dir() {
            fs::remove_dir_all(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
            eprintln!("  removed {}", path.display());
        }
    }
    Ok(())
}

fn cmd_convert(input: Option<PathBuf>, output: Option<PathBuf>, clean: bool) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(cfg.input()));
    let output_dir = output.unwrap_or_else(|| PathBuf::from(cfg.output()));

    eprintln!("Converting {} → {}", input.display(), output_dir.display());
    let graph = load_graph(&input, &cfg)?;
    let files = graph.to_files()?;

    if clean {
        clean_output(&output_dir, &cfg)?;
    }
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    write_files(&output_dir, &files)?;

    eprintln!(
        "Generated {} files in {} ({} paths, {} schemas)",
        files.len(),
        output_dir.display(),
        graph.root.paths.len(),
        graph.schema_names().count()
    );
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let graph = load_graph(&input, &cfg)?;

    let summary = build_inspect_summary(&graph);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(graph: &DocumentGraph) -> serde_json::Value {
    let categories: indexmap::IndexMap<&str, usize> = graph
        .path_documents
        .iter()
        .map(|doc| (doc.category.tag_name(), doc.paths.len()))
        .collect();

    let schemas: indexmap::IndexMap<&str, usize> = graph
        .schema_documents
        .iter()
        .map(|doc| (doc.kind.slug(), doc.schemas.len()))
        .collect();

    let operations: usize = graph
        .path_documents
        .iter()
        .flat_map(|doc| doc.paths.values())
        .map(|item| item.operations().count())
        .sum();

    serde_json::json!({
        "info": {
            "title": graph.root.info.title,
            "version": graph.root.info.version,
        },
        "operations": operations,
        "categories": categories,
        "schemas": schemas,
        "tag_groups": graph
            .root
            .tag_groups
            .iter()
            .map(|g| serde_json::json!({ "name": g.name, "tags": g.tags }))
            .collect::<Vec<_>>(),
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STREAMS: &str = r#"{
        "resourcePath": "/streams",
        "apis": [{"path": "/streams", "operations": [{"method": "GET", "type": "Stream"}]}],
        "models": {"Stream": {"properties": {"id": {"type": "string"}}}}
    }"#;

    const INPUTS: &str = r#"[{
        "resourcePath": "/system/inputs",
        "apis": [{"path": "/system/inputs", "operations": [{"method": "GET", "type": "Stream"}]}],
        "models": {"Stream": {"description": "later wins"}}
    }]"#;

    #[test]
    fn test_descriptor_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.json"), INPUTS).unwrap();
        fs::write(dir.path().join("a.json"), STREAMS).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let files = descriptor_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);

        let docs = load_descriptors(dir.path()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].resource_path, "/system/inputs");
    }

    #[test]
    fn test_single_file_input() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("streams.json");
        fs::write(&file, STREAMS).unwrap();
        assert_eq!(descriptor_files(&file).unwrap(), vec![file]);
    }

    #[test]
    fn test_write_graph_and_clean() {
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("a.json"), STREAMS).unwrap();
        fs::write(src.path().join("b.json"), INPUTS).unwrap();

        let cfg = Sw2OasConfig::default();
        let graph = load_graph(src.path(), &cfg).unwrap();
        assert_eq!(
            graph.schema_documents[0].schemas["Stream"].description.as_deref(),
            Some("later wins")
        );

        let out = tempfile::tempdir().unwrap();
        write_files(out.path(), &graph.to_files().unwrap()).unwrap();
        assert!(out.path().join("openapi.yaml").is_file());
        assert!(out.path().join("paths/streams.yaml").is_file());
        assert!(out.path().join("paths/system.yaml").is_file());
        assert!(out.path().join("schemas/core.yaml").is_file());
        assert!(out.path().join("schemas/common.yaml").is_file());

        clean_output(out.path(), &cfg).unwrap();
        assert!(!out.path().join("paths").exists());
        assert!(!out.path().join("schemas").exists());
        assert!(out.path().join("openapi.yaml").is_file());
    }

    #[test]
    fn test_inspect_summary() {
        let src = tempfile::tempdir().unwrap();
        let file = src.path().join("streams.json");
        fs::write(&file, STREAMS).unwrap();

        let graph = load_graph(&file, &Sw2OasConfig::default()).unwrap();
        let summary = build_inspect_summary(&graph);
        assert_eq!(summary["operations"], 1);
        assert_eq!(summary["categories"]["Streams"], 1);
        assert_eq!(summary["schemas"]["core"], 1);
        assert_eq!(summary["info"]["title"], "Graylog REST API");
    }

    #[test]
    fn test_inspect_summary_uses_config() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("streams.json");
        fs::write(&file, STREAMS).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "info:\n  title: Graylog Enterprise\n  version: 6.1.0\n").unwrap();
        let cfg = config::load_config(&config_path).unwrap().unwrap();

        let summary = build_inspect_summary(&load_graph(&file, &cfg).unwrap());
        assert_eq!(summary["info"]["title"], "Graylog Enterprise");
        assert_eq!(summary["info"]["version"], "6.1.0");
    }
}
