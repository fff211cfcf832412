//! Minimal CLI: JSON documents in, pydantic model modules out.
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde_json::Value;

use crate::codegen::{generate, GenerateOptions};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate pydantic models from JSON documents
#[derive(Parser, Debug)]
#[command(name = "json2pydantic", version)]
pub struct CommandLineInterface {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// JSON Pointer to select a subnode in each document (e.g. /data/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// top-level model name
    #[arg(long, default_value = "MyModel")]
    root_name: String,

    /// render every field as optional with a null default
    #[arg(long, default_value_t = false)]
    make_optional: bool,

    /// convert camelCase keys to snake_case with a Field alias
    #[arg(long, default_value_t = false)]
    snake_case: bool,

    /// output .py file (a directory when more than one input; stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        let options = GenerateOptions {
            root_name: self.root_name.clone(),
            make_optional: self.make_optional,
            convert_case: self.snake_case,
        };

        let source_paths = resolve_file_path_patterns(&self.input)?;
        if source_paths.is_empty() {
            bail!("no input files");
        }

        // Documents are independent and generation is pure, so fan out;
        // collect keeps input order for deterministic output.
        let rendered: Vec<(PathBuf, String)> = source_paths
            .par_iter()
            .map(|path| -> Result<(PathBuf, String)> {
                let source = self
                    .render_document(path, &options)
                    .with_context(|| path.display().to_string())?;
                Ok((path.clone(), source))
            })
            .collect::<Result<_>>()?;

        self.write_outputs(&rendered)
    }

    fn render_document(&self, path: &Path, options: &GenerateOptions) -> Result<String> {
        let source = std::fs::read_to_string(path).context("failed to read source file")?;
        let document = read_document(&source)?;
        let selected = match self.json_pointer.as_deref() {
            None => &document,
            Some(pointer) => document
                .pointer(pointer)
                .with_context(|| format!("JSON pointer {pointer} matched nothing"))?,
        };
        Ok(generate(selected, options)?)
    }

    fn write_outputs(&self, rendered: &[(PathBuf, String)]) -> Result<()> {
        match (&self.out, rendered) {
            (None, [(_, only)]) => println!("{only}"),
            (None, many) => {
                for (path, source) in many {
                    println!("# {}", path.display());
                    println!("{source}");
                    println!();
                }
            }
            (Some(out), [(_, only)]) => {
                if let Some(parent) = out.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                std::fs::write(out, only)
                    .with_context(|| format!("failed to write {}", out.display()))?;
            }
            (Some(out_dir), many) => {
                std::fs::create_dir_all(out_dir)
                    .with_context(|| format!("failed to create {}", out_dir.display()))?;
                for (path, source) in many {
                    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("model");
                    let target = out_dir.join(format!("{stem}.py"));
                    std::fs::write(&target, source)
                        .with_context(|| format!("failed to write {}", target.display()))?;
                }
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Deserialize with JSON-path context in error messages.
fn read_document(source: &str) -> Result<Value> {
    let de = &mut serde_json::Deserializer::from_str(source);
    match serde_path_to_error::deserialize::<_, Value>(de) {
        Ok(value) => Ok(value),
        Err(err) => {
            let path = err.path().to_string();
            bail!("invalid JSON at path {path}: {}", err.into_inner())
        }
    }
}

// Literal paths pass through untouched; a glob pattern that matches nothing
// is an error rather than a silent no-op.
fn resolve_file_path_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for pattern in patterns {
        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in
                glob::glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?
            {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
