//! Run orchestration.
//! Collects output units for every selected application, renders them and
//! hands the results to the configured output.

use crate::config::Config;
use crate::decrypt::Decryptor;
use crate::error::{Error, Result};
use crate::ignore::Rules;
use crate::output::Output;
use crate::processor::{process_applications, OutputUnit};
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use log::debug;

/// Builds the rule set every template root starts from.
pub fn initial_rules(config: &Config) -> Result<Rules> {
    let mut rules = Rules::init();
    if let Some(path) = &config.ignore_file {
        rules.parse_file(path)?;
    }
    Ok(rules)
}

/// Collects the output units of every application selected by `config`.
pub fn collect_units(config: &Config, decryptor: &dyn Decryptor) -> Result<Vec<OutputUnit>> {
    let applications = config.selected_applications()?;
    let rules = initial_rules(config)?;
    process_applications(
        &applications,
        config.env_file.as_deref(),
        &config.out_path,
        &rules,
        decryptor,
    )
}

/// Renders `units` in order and delivers each result to `output`.
///
/// The first failing unit aborts delivery; output already written stays.
pub fn render_units(
    units: &[OutputUnit],
    renderer: &dyn TemplateRenderer,
    output: &mut Output,
) -> Result<()> {
    for unit in units {
        let result = renderer.render(&unit.template, &unit.context).map_err(|e| match e {
            Error::TemplateError(source) => {
                Error::RenderError { path: unit.output_path.display().to_string(), source }
            }
            other => other,
        })?;
        output.deliver(unit, &result)?;
    }
    Ok(())
}

/// Runs a whole configuration.
///
/// # Flow
/// 1. Validates the configuration, including the output format
/// 2. Collects output units for the selected applications
/// 3. Opens the output and renders every unit into it
pub fn run(config: &Config, decryptor: &dyn Decryptor) -> Result<()> {
    config.validate()?;
    let renderer = MiniJinjaRenderer::with_delimiters(&config.ldelim, &config.rdelim)?;

    let units = collect_units(config, decryptor)?;
    debug!("Collected {} output units", units.len());

    let mut output = Output::open(config)?;
    render_units(&units, &renderer, &mut output)?;
    output.finalize()
}
