//! `minerr extract`: run the pass over one file and write both outputs.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use anyhow::{Context, Result};
use swc_common::{SourceMap, comments::Comments};

use super::super::{args::ExtractCommand, exit_status::ExitStatus, report};
use crate::config::load_config;
use crate::core::{
    ExtractionTable, MinErrPass, PassOptions, emit::print_program, parsers::js::parse_js_source,
};
use crate::issues::{Issue, ParseErrorIssue};

/// Config file values with command-line overrides applied.
struct ExtractSettings {
    options: PassOptions,
    messages_path: PathBuf,
}

fn resolve_settings(cmd: &ExtractCommand, cwd: &Path) -> Result<ExtractSettings> {
    let mut loaded = load_config(cwd)?;

    if let Some(factory_name) = &cmd.common.factory_name {
        loaded.config.factory_name = factory_name.clone();
    }
    if let Some(suffix) = &cmd.common.suffix {
        loaded.config.suffix = suffix.clone();
    }
    loaded.config.validate()?;

    let replacement_path = match (&cmd.replacement, &loaded.config.replacement) {
        (Some(path), _) => Some(cwd.join(path)),
        (None, Some(path)) => Some(loaded.resolve_path(path)),
        (None, None) => None,
    };
    let replacement = replacement_path
        .map(|path| {
            fs::read_to_string(&path).with_context(|| {
                format!("Failed to read replacement definition: {}", path.display())
            })
        })
        .transpose()?;

    let messages_path = match &cmd.messages {
        Some(path) => cwd.join(path),
        None => loaded.resolve_path(&loaded.config.messages_output),
    };

    let config = loaded.config;
    Ok(ExtractSettings {
        options: PassOptions {
            factory_name: config.factory_name,
            suffix: config.suffix,
            replacement,
        },
        messages_path,
    })
}

pub fn extract(cmd: ExtractCommand, verbose: bool) -> Result<ExitStatus> {
    let started = Instant::now();
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let settings = resolve_settings(&cmd, &cwd)?;

    let input_path = cwd.join(&cmd.input);
    let code = fs::read_to_string(&input_path)
        .with_context(|| format!("Failed to read input file: {}", input_path.display()))?;
    let file_path = cmd.input.to_string_lossy().into_owned();

    let source_map = Arc::new(SourceMap::default());
    let pass = MinErrPass::new(settings.options, source_map.clone())?;

    // Keep stdout clean when the rewritten program goes there.
    let mut diagnostics: Box<dyn Write> = if cmd.output.is_some() {
        Box::new(io::stdout().lock())
    } else {
        Box::new(io::stderr().lock())
    };

    let mut parsed = match parse_js_source(code, &file_path, source_map.clone()) {
        Ok(parsed) => parsed,
        Err(err) => {
            let issue = Issue::ParseError(ParseErrorIssue {
                context: err.context,
                error: err.message,
            });
            report::report_to(&[issue], &mut diagnostics);
            return Ok(ExitStatus::Failure);
        }
    };
    if verbose {
        report::print_timing_to("parsed", started.elapsed(), &mut io::stderr());
    }

    let outcome = match pass.run(&mut parsed.program, &file_path) {
        Ok(outcome) => outcome,
        Err(abort) => {
            let mut issues = abort.issues;
            issues.push(Issue::UnsupportedStringExpression(abort.error));
            report::report_to(&issues, &mut diagnostics);
            return Ok(ExitStatus::Failure);
        }
    };
    report::report_to(&outcome.issues, &mut diagnostics);

    let output = print_program(
        &parsed.program,
        source_map,
        Some(&parsed.comments as &dyn Comments),
    );
    match &cmd.output {
        Some(path) => write_output(&cwd.join(path), output.as_bytes())?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write program to stdout")?;
        }
    }

    let templates = outcome.table.len();
    let namespaces = outcome.table.namespaces().count();
    write_messages(&settings.messages_path, outcome.table)?;

    if verbose {
        let mut stderr = io::stderr();
        report::print_stats_to(&outcome.stats, &mut stderr);
        report::print_timing_to("finished", started.elapsed(), &mut stderr);
    }
    report::print_success_to(&file_path, templates, namespaces, &mut diagnostics);

    Ok(ExitStatus::Success)
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    create_parent_dir(path)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

fn write_messages(path: &Path, table: ExtractionTable) -> Result<()> {
    create_parent_dir(path)?;
    let file = File::create(path)
        .with_context(|| format!("Failed to create messages file: {}", path.display()))?;
    table.write_json(&mut BufWriter::new(file))
}
