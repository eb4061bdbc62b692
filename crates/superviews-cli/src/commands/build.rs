// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Build command compiling template files to JavaScript modules.

use crate::config::{Config, Emit};
use anyhow::{bail, Context};
use console::style;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Inputs of one build invocation, after command line parsing.
#[derive(Debug, Default, Clone)]
pub struct BuildRequest {
    /// Template paths or glob patterns.
    pub inputs: Vec<String>,
    /// Output directory, overriding the configuration.
    pub output_dir: Option<PathBuf>,
    /// Output kind, overriding the configuration.
    pub emit: Option<Emit>,
    /// Render function name, overriding the configuration.
    pub function_name: Option<String>,
}

/// A resolved template and its output path relative to the output directory.
#[derive(Debug, Clone, PartialEq)]
struct Input {
    path: PathBuf,
    relative: PathBuf,
}

/// Compiles every input and writes the results.
///
/// With an output directory each template `name.html` becomes `name.js`
/// (or `name.json` for `--emit ast`) and progress is reported on `stdout`.
/// Templates matched by a glob keep their path below the pattern's literal
/// base directory, so `views/**/*.html` writes `views/a/list.html` to
/// `a/list.js`. Two templates mapping to the same output file are an error.
/// Without an output directory, a single result is written to `stdout`.
///
/// Returns the number of templates compiled.
pub fn run<W: Write>(
    request: &BuildRequest,
    config: &Config,
    stdout: &mut W,
) -> anyhow::Result<usize> {
    let inputs = resolve_inputs(&request.inputs)?;
    let emit = request.emit.unwrap_or(config.build.emit);
    let output_dir = request
        .output_dir
        .clone()
        .or_else(|| config.build.output_dir.as_ref().map(PathBuf::from));

    let Some(dir) = output_dir else {
        let [input] = inputs.as_slice() else {
            bail!(
                "{} templates matched; use --output to write them to a directory",
                inputs.len()
            );
        };
        let output = build_one(&input.path, request, config, emit)?;
        stdout.write_all(output.as_bytes())?;
        return Ok(1);
    };

    let targets = output_targets(&inputs, &dir, emit)?;
    let start = Instant::now();
    for (input, target) in inputs.iter().zip(&targets) {
        let output = build_one(&input.path, request, config, emit)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        fs::write(target, output)
            .with_context(|| format!("cannot write {}", target.display()))?;
        tracing::info!("{} -> {}", input.path.display(), target.display());
        writeln!(stdout, "{} {}", style("Wrote").green(), target.display())?;
    }

    writeln!(
        stdout,
        "{} {} {}",
        style("Build complete!").green().bold(),
        style(format!("{} template(s) compiled in", inputs.len())).dim(),
        style(format!("{}ms", start.elapsed().as_millis())).cyan()
    )?;

    Ok(inputs.len())
}

fn build_one(
    path: &Path,
    request: &BuildRequest,
    config: &Config,
    emit: Emit,
) -> anyhow::Result<String> {
    let source =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;

    let mut options = config.compile.clone().with_template_name(template_name(path));
    if let Some(name) = &request.function_name {
        options = options.with_function_name(name.clone());
    }

    let output = match emit {
        Emit::Js => superviews::compile(&source, &options)
            .with_context(|| format!("failed to compile {}", path.display()))?,
        Emit::Ast => {
            let ast = superviews::parse(&source, &options)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            let mut json = serde_json::to_string_pretty(&ast)?;
            json.push('\n');
            json
        }
    };
    tracing::debug!("built {} ({} bytes)", path.display(), output.len());
    Ok(output)
}

/// Output file of every input, rejecting two inputs that map to the same file.
fn output_targets(inputs: &[Input], dir: &Path, emit: Emit) -> anyhow::Result<Vec<PathBuf>> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    let mut targets = Vec::with_capacity(inputs.len());
    for input in inputs {
        let target = dir.join(input.relative.with_extension(emit.extension()));
        if let Some(previous) = claimed.insert(target.clone(), &input.path) {
            bail!(
                "{} and {} would both be written to {}",
                previous.display(),
                input.path.display(),
                target.display()
            );
        }
        targets.push(target);
    }
    Ok(targets)
}

/// File stem used as template name.
fn template_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "template".to_string())
}

fn is_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Leading components of `pattern` that contain no wildcard.
fn glob_base(pattern: &str) -> PathBuf {
    Path::new(pattern)
        .components()
        .take_while(|component| !is_pattern(&component.as_os_str().to_string_lossy()))
        .collect()
}

/// Collects glob matches, failing on the first unreadable entry.
fn collect_matches<E>(
    entries: impl IntoIterator<Item = Result<PathBuf, E>>,
) -> anyhow::Result<Vec<PathBuf>>
where
    E: std::error::Error + Send + Sync + 'static,
{
    let mut matched = Vec::new();
    for entry in entries {
        let path = entry?;
        if path.is_file() {
            matched.push(path);
        }
    }
    matched.sort();
    Ok(matched)
}

/// Expands glob patterns; plain paths are taken as they are.
fn resolve_inputs(inputs: &[String]) -> anyhow::Result<Vec<Input>> {
    let mut files = Vec::new();
    for input in inputs {
        if is_pattern(input) {
            let base = glob_base(input);
            let entries =
                glob::glob(input).with_context(|| format!("invalid pattern {:?}", input))?;
            let matched =
                collect_matches(entries).with_context(|| format!("cannot expand {:?}", input))?;
            files.extend(matched.into_iter().map(|path| {
                let relative = path
                    .strip_prefix(&base)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| file_name(&path));
                Input { path, relative }
            }));
        } else {
            let path = PathBuf::from(input);
            let relative = file_name(&path);
            files.push(Input { path, relative });
        }
    }

    if files.is_empty() {
        bail!("no templates matched {:?}", inputs);
    }
    Ok(files)
}

fn file_name(path: &Path) -> PathBuf {
    path.file_name().map(PathBuf::from).unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_template_name_is_file_stem() {
        assert_eq!(template_name(Path::new("views/list.html")), "list");
        assert_eq!(template_name(Path::new("card")), "card");
    }

    #[test]
    fn test_glob_base_stops_at_first_wildcard() {
        assert_eq!(glob_base("views/**/*.html"), PathBuf::from("views"));
        assert_eq!(glob_base("a/b/c?.html"), PathBuf::from("a/b"));
        assert_eq!(glob_base("*.html"), PathBuf::new());
    }

    #[test]
    fn test_glob_entry_error_is_propagated() {
        let entries = vec![
            Ok(PathBuf::from("Cargo.toml")),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "views/private")),
        ];
        let err = collect_matches(entries).unwrap_err();
        assert!(err.to_string().contains("views/private"));
    }

    #[test]
    fn test_colliding_targets_are_rejected() {
        let inputs = vec![
            Input {
                path: PathBuf::from("a/list.html"),
                relative: PathBuf::from("list.html"),
            },
            Input {
                path: PathBuf::from("b/list.html"),
                relative: PathBuf::from("list.html"),
            },
        ];
        let err = output_targets(&inputs, Path::new("dist"), Emit::Js).unwrap_err();
        assert!(err.to_string().contains("a/list.html and b/list.html"));
    }

    #[test]
    fn test_unmatched_glob_is_error() {
        let err = resolve_inputs(&["/nonexistent-dir-for-test/*.html".to_string()]).unwrap_err();
        assert!(err.to_string().contains("no templates matched"));
    }
}
