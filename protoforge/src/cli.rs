//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use indexmap::IndexMap;
use protoforge_codegen::{ExpandReport, Generator};
use std::path::PathBuf;

/// Protoforge: project generation from a declarative configuration.
#[derive(Parser, Debug)]
#[command(name = "protoforge", version, about)]
pub struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Expand a template tree into a project.
    Generate(GenerateArgs),
}

/// Arguments for the generate subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Project root holding protoforge.yml.
    pub root: PathBuf,

    /// Template tree to expand.
    #[arg(short, long)]
    pub templates: PathBuf,

    /// Output directory. Defaults to the project root.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path substitution, also visible to templates (repeatable).
    #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE", value_parser = parse_substitution)]
    pub args: Vec<(String, String)>,
}

impl GenerateArgs {
    /// Collects substitutions; later values win for repeated keys.
    #[must_use]
    pub fn substitutions(&self) -> IndexMap<String, String> {
        self.args.iter().cloned().collect()
    }

    /// Runs the generation pipeline.
    ///
    /// # Errors
    /// Returns an error if any stage of generation fails.
    pub fn run(&self) -> anyhow::Result<ExpandReport> {
        let mut generator = Generator::new(&self.root)
            .templates(&self.templates)
            .substitutions(self.substitutions());
        if let Some(output) = &self.output {
            generator = generator.output(output);
        }
        Ok(generator.generate()?)
    }
}

/// Parses a `KEY=VALUE` pair. The value may contain further `=`.
///
/// # Errors
/// Returns a message if there is no `=` or the key is empty.
pub fn parse_substitution(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        Some(_) => Err(format!("empty key in '{s}'")),
        None => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_substitution() {
        assert_eq!(
            parse_substitution("module=game"),
            Ok(("module".to_string(), "game".to_string()))
        );
        assert_eq!(
            parse_substitution("query=a=b"),
            Ok(("query".to_string(), "a=b".to_string()))
        );
        assert_eq!(
            parse_substitution("empty="),
            Ok(("empty".to_string(), String::new()))
        );
        assert!(parse_substitution("=game").is_err());
        assert!(parse_substitution("module").is_err());
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "protoforge",
            "generate",
            "my-game",
            "--templates",
            "tpl",
            "--arg",
            "module=game",
            "-a",
            "module=shared",
            "--verbose",
        ])
        .expect("Failed to parse");

        assert!(cli.verbose);
        let Commands::Generate(args) = cli.command;
        assert_eq!(args.root, PathBuf::from("my-game"));
        assert_eq!(args.templates, PathBuf::from("tpl"));
        assert!(args.output.is_none());
        assert_eq!(args.substitutions().get("module").map(String::as_str), Some("shared"));
    }

    #[test]
    fn test_cli_requires_templates() {
        assert!(Cli::try_parse_from(["protoforge", "generate", "my-game"]).is_err());
    }

    #[test]
    fn test_generate_args_run() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path().join("demo");
        let templates = tmp.path().join("tpl");
        std::fs::create_dir_all(&root).expect("mkdir");
        std::fs::create_dir_all(templates.join("{{name}}")).expect("mkdir");
        std::fs::write(
            root.join(protoforge_codegen::CONFIG_FILE_NAME),
            "types:\n  State:\n    count: int\nmethods: {}\nauth: {}\nuserState: State\nerror: string\n",
        )
        .expect("write");
        std::fs::write(templates.join("{{name}}/out.txt.hbs"), "{{appName}}:{{name}}").expect("write");

        let args = GenerateArgs {
            root: root.clone(),
            templates,
            output: None,
            args: vec![("name".to_string(), "hello".to_string())],
        };
        let report = args.run().expect("Failed to generate");

        assert_eq!(report.rendered, 1);
        assert_eq!(
            std::fs::read_to_string(root.join("hello/out.txt")).expect("read"),
            "demo:hello"
        );
    }
}
