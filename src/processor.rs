//! Template tree traversal.
//! Walks each application's template directory, applying inherited ignore
//! rules, and turns every remaining file into an [`OutputUnit`].

use crate::config::ApplicationConfig;
use crate::context::{gen_context, set_value_context, Context};
use crate::decrypt::Decryptor;
use crate::error::{Error, Result};
use crate::ignore::{Rules, HELPERS_FILE, IGNORE_FILE};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use walkdir::WalkDir;

/// A resolved, renderable artifact.
#[derive(Debug, Clone)]
pub struct OutputUnit {
    /// Where the rendered content goes in `dir` mode
    pub output_path: PathBuf,
    /// Application helpers followed by the file's own template text
    pub template: String,
    /// Context shared by every unit of the same application
    pub context: Rc<Context>,
}

/// State that stays fixed while one application's tree is walked.
struct Scope<'a> {
    helper: &'a str,
    context: &'a Rc<Context>,
    mute_warning: bool,
}

/// Builds the contexts of all `applications` and collects their output units.
///
/// Units are returned in application order, and within an application in
/// depth-first, file-name order.
///
/// # Errors
/// * `Error::ParseError` / `Error::InvalidDocument` / `Error::DecryptError` for a malformed env or values source
/// * `Error::TemplateRootMissing` if an application's template root is missing
pub fn process_applications(
    applications: &[&ApplicationConfig],
    env_file: Option<&Path>,
    out_path: &Path,
    rules: &Rules,
    decryptor: &dyn Decryptor,
) -> Result<Vec<OutputUnit>> {
    let base = gen_context(env_file, decryptor)?;
    if !base.has_env() {
        warn!("No env_file found");
    }

    let mut units = Vec::new();
    for app in applications {
        debug!("Processing application '{}'", app.name);

        let app_base = match &app.env_file {
            Some(path) => {
                let context = gen_context(Some(path.as_path()), decryptor)?;
                if !context.has_env() {
                    warn!("No env_file found for application '{}'", app.name);
                }
                context
            }
            None => base.clone(),
        };

        let context = set_value_context(
            app.values.as_slice(),
            &app.override_vars,
            &app_base,
            decryptor,
        )?;
        let output_dir = out_path.join(&app.name);

        units.extend(process_application(
            &app.name,
            &app.templates,
            &output_dir,
            &Rc::new(context),
            rules,
            app.mute_warning,
        )?);
    }

    Ok(units)
}

/// Collects the output units of one application.
///
/// The helper file at the template root is prefixed onto every template
/// below it.
pub fn process_application(
    name: &str,
    input_dir: &Path,
    output_dir: &Path,
    context: &Rc<Context>,
    rules: &Rules,
    mute_warning: bool,
) -> Result<Vec<OutputUnit>> {
    if !input_dir.is_dir() {
        return Err(Error::TemplateRootMissing {
            app: name.to_string(),
            template_dir: input_dir.display().to_string(),
        });
    }

    let helper = read_helper(input_dir)?;
    let scope = Scope { helper: &helper, context, mute_warning };
    walk_dir(input_dir, output_dir, rules, &scope)
}

fn read_helper(input_dir: &Path) -> Result<String> {
    let path = input_dir.join(HELPERS_FILE);
    if !path.is_file() {
        return Ok(String::new());
    }
    debug!("Using helpers from {}", path.display());
    fs::read_to_string(&path).map_err(|e| Error::io_at(&path, e))
}

fn walk_dir(
    input_dir: &Path,
    output_dir: &Path,
    parent_rules: &Rules,
    scope: &Scope<'_>,
) -> Result<Vec<OutputUnit>> {
    let mut rules = parent_rules.clone();
    rules.parse_file(input_dir.join(IGNORE_FILE))?;

    let mut units = Vec::new();
    for entry in WalkDir::new(input_dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::io_at(input_dir, e.into()))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy();
        let is_dir = path.is_dir();

        if rules.ignore(&name, is_dir) {
            debug!("Skipping {} from ignore rules", path.display());
            continue;
        }

        let next_output = output_dir.join(entry.file_name());
        if is_dir {
            units.extend(walk_dir(path, &next_output, &rules, scope)?);
            continue;
        }

        let text = fs::read_to_string(path).map_err(|e| Error::io_at(path, e))?;
        if !scope.context.has_values() && !scope.mute_warning {
            warn!("No values found for template ({})", path.display());
        }

        debug!("Collected {} -> {}", path.display(), next_output.display());
        units.push(OutputUnit {
            output_path: next_output,
            template: format!("{}{}", scope.helper, text),
            context: Rc::clone(scope.context),
        });
    }

    Ok(units)
}
