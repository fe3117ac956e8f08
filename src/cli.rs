//! CLI: schema (flags | JSON files) → class source or emission-tree JSON
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;

use crate::assemble::assemble;
use crate::ir::ClassEmission;
use crate::schema::{ClassSchema, DEFAULT_HASH_PRIME, DEFAULT_SEPARATOR, GenerationOptions, SchemaFile};
use crate::types::TypeRef;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// synthesize plain data classes (fields, constructors, accessors, equals/hashCode/toString)
#[derive(Parser, Debug)]
#[command(name = "pojo-synth", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// synthesize one class described on the command line
    Pojo(PojoOut),
    /// synthesize every class described by one or more JSON schema files
    Schema(SchemaOut),
}

#[derive(Args, Debug, Clone)]
struct EmissionSettings {
    /// emit a constructor taking every field, with null checks on references
    #[arg(short = 'a', long)]
    all_args_constructor: bool,

    /// emit a no-args constructor
    #[arg(short = 'n', long)]
    no_args_constructor: bool,

    /// emit equals and hashCode
    #[arg(short = 'e', long)]
    equals_and_hash_code: bool,

    /// emit toString
    #[arg(short = 's', long)]
    to_string: bool,

    /// chain equals/hashCode/toString through the superclass
    #[arg(long)]
    call_super: bool,

    /// render `toString` values without `name=` prefixes
    #[arg(long)]
    no_field_names: bool,

    /// separator between toString segments
    #[arg(long, default_value = DEFAULT_SEPARATOR)]
    separator: String,

    /// multiplier used by hashCode
    #[arg(long, default_value_t = DEFAULT_HASH_PRIME, allow_negative_numbers = true)]
    prime: i32,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// replace existing output files instead of refusing to touch them
    #[arg(long)]
    overwrite: bool,

    /// print the emission tree as JSON instead of class source
    #[arg(long)]
    json: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct PojoOut {
    /// class name (normalized to capitalized camel case)
    name: String,

    /// comma-separated field names
    #[arg(short = 'v', long, value_delimiter = ',', num_args = 1.., required = true)]
    variables: Vec<String>,

    /// comma-separated field types, one per name (`int`, `String[]`, `[J`, ...)
    #[arg(short = 't', long, value_delimiter = ',', num_args = 1.., required = true)]
    types: Vec<String>,

    /// package of the class; `/` and `\` become `.`
    #[arg(short = 'p', long)]
    package: Option<String>,

    #[command(flatten)]
    emission: EmissionSettings,

    /// output source file (stdout if omitted)
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    #[command(flatten)]
    output: OutputSettings,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    /// One or more schema files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// root directory for generated files, laid out by package (stdout if omitted)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    #[command(flatten)]
    output: OutputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl EmissionSettings {
    fn options(&self) -> GenerationOptions {
        GenerationOptions {
            emit_no_args_constructor: self.no_args_constructor,
            emit_full_args_constructor: self.all_args_constructor,
            emit_equals_and_hash_code: self.equals_and_hash_code,
            emit_to_string: self.to_string,
            call_super: self.call_super,
            include_field_names_in_to_string: !self.no_field_names,
            field_separator: self.separator.clone(),
            hash_prime: self.prime,
        }
    }
}

impl OutputSettings {
    fn render(&self, class: &ClassEmission) -> anyhow::Result<String> {
        if self.json {
            return serde_json::to_string_pretty(class).context("failed to serialize emission tree");
        }
        Ok(crate::codegen::print(class))
    }

    fn extension(&self) -> &'static str {
        if self.json { "json" } else { "java" }
    }
}

impl PojoOut {
    fn schema(&self) -> anyhow::Result<ClassSchema> {
        let types = self
            .types
            .iter()
            .map(|t| TypeRef::parse(t.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        let names = self.variables.iter().map(|v| v.trim()).collect::<Vec<_>>();
        let schema = ClassSchema::from_parts(
            &self.name,
            self.package.as_deref(),
            &names,
            types,
            self.emission.options(),
        )?;
        Ok(schema)
    }
}

impl SchemaOut {
    /// Output path for a class: `<out-dir>/<package dirs>/<Name>.<ext>`.
    fn target_path(&self, out_dir: &Path, class: &ClassEmission) -> PathBuf {
        let mut path = out_dir.to_path_buf();
        if let Some(namespace) = class.namespace.as_deref() {
            path.extend(namespace.split('.'));
        }
        path.push(format!("{}.{}", class.name, self.output.extension()));
        path
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Pojo(target) => {
                // debug path
                if target.output.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                // 1) validate
                let schema = target.schema()?;

                // 2) assemble & render
                let class = assemble(&schema);
                let src = target.output.render(&class)?;

                match target.file.as_ref() {
                    Some(out) => write_output(out, &src, target.output.overwrite)?,
                    None => println!("{src}"),
                }
                Ok(())
            }
            Command::Schema(target) => {
                // debug path
                if target.output.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                // 1) load & validate everything before writing anything
                let source_paths = resolve_file_path_patterns(&target.input)?;
                let classes = source_paths
                    .par_iter()
                    .map(|path| load_schema(path).map(|schema| assemble(&schema)))
                    .collect::<anyhow::Result<Vec<_>>>()?;
                tracing::debug!(files = source_paths.len(), "assembled schema files");

                // 2) render
                let rendered = classes
                    .iter()
                    .map(|class| Ok((class, target.output.render(class)?)))
                    .collect::<anyhow::Result<Vec<_>>>()?;

                // 3) write
                let Some(out_dir) = target.out_dir.as_ref() else {
                    for (_, src) in &rendered {
                        println!("{src}");
                    }
                    return Ok(());
                };
                let mut targets = Vec::with_capacity(rendered.len());
                for (class, src) in &rendered {
                    let path = target.target_path(out_dir, class);
                    if targets.iter().any(|(p, _)| p == &path) {
                        bail!("two schema files produce {}", path.display());
                    }
                    targets.push((path, src));
                }
                for (path, src) in targets {
                    write_output(&path, src, target.output.overwrite)?;
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
fn load_schema(path: &Path) -> anyhow::Result<ClassSchema> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read schema file {}", path.display()))?;
    let file = crate::path_de::from_slice_with_path::<SchemaFile>(&bytes)
        .with_context(|| format!("invalid schema file {}", path.display()))?;
    let schema = file
        .into_schema()
        .with_context(|| format!("invalid schema file {}", path.display()))?;
    Ok(schema)
}

/// UTF-8 write. Refuses to replace an existing file unless `overwrite`.
fn write_output(path: &Path, contents: &str, overwrite: bool) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = match options.open(path) {
        Ok(file) => file,
        Err(error) if error.kind() == std::io::ErrorKind::AlreadyExists => {
            bail!("{} already exists (pass --overwrite to replace it)", path.display());
        }
        Err(error) => return Err(error).with_context(|| format!("failed to open {}", path.display())),
    };
    file.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern {pattern}"))? {
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
