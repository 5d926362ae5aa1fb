use cmdopt::{Error, Opt, Program, Values};
use serde::Serialize;

use crate::error::Result;

/// Resolved deploy options, as handed to the publishing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployOptions {
    pub dir: Option<String>,
    pub repo: Option<String>,
    pub message: String,
    pub branch: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub cname: Option<String>,
    pub add: bool,
    pub silent: bool,
    pub dotfiles: bool,
    pub notfound: bool,
    pub nojekyll: bool,
    pub dry_run: bool,
}

/// Everything the orchestrator consumes: option values plus positionals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cmdline {
    pub options: DeployOptions,
    pub args: Vec<String>,
}

pub fn build_program() -> Program {
    Program::new("ngh")
        .version(env!("CARGO_PKG_VERSION"))
        .description("Resolve the options of a GitHub pages deployment")
        .option(
            Opt::new("-d, --dir <dir>")
                .description("Base directory for all source files"),
        )
        .option(
            Opt::new("-r, --repo <repo>")
                .description("Provide the repository URL. Defaults to the origin remote"),
        )
        .option(
            Opt::new("-m, --message <message>")
                .description("The commit message")
                .default_val("Auto-generated commit"),
        )
        .option(
            Opt::new("-b, --branch <branch>")
                .description("The git branch to push your pages to")
                .default_val("gh-pages"),
        )
        .option(
            Opt::new("-n, --name <name>")
                .description("The git user-name which is associated with this commit"),
        )
        .option(
            Opt::new("-e, --email <email>")
                .description("The git user-email which is associated with this commit"),
        )
        .option(
            Opt::new("-c, --cname <domain>")
                .description("Generate a CNAME file for the specified domain"),
        )
        .option(Opt::new("-a, --add").description("Only add, and never remove existing files"))
        .option(
            Opt::new("-S, --no-silent")
                .description("Logging is in silent mode by default. Switch it off"),
        )
        .option(
            Opt::new("-T, --no-dotfiles")
                .description("Includes dotfiles by default. Switch it off"),
        )
        .option(
            Opt::new("--no-notfound")
                .description("By default a 404.html file is created. Switch it off"),
        )
        .option(
            Opt::new("--no-nojekyll")
                .description("By default a .nojekyll file is created. Switch it off"),
        )
        .option(
            Opt::new("--dry-run")
                .description("Run through without making any changes"),
        )
}

/// Single-valued string option; unset is `None`.
fn optional(values: &Values, name: &str) -> Result<Option<String>> {
    match values.get::<String>(name) {
        Ok(v) => Ok(Some(v)),
        Err(Error::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Boolean option; unset reads as `false`.
fn flag(values: &Values, name: &str) -> Result<bool> {
    match values.get::<bool>(name) {
        Ok(b) => Ok(b),
        Err(Error::NotFound(_)) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub fn deploy_options(values: &Values) -> Result<DeployOptions> {
    Ok(DeployOptions {
        dir: optional(values, "dir")?,
        repo: optional(values, "repo")?,
        message: optional(values, "message")?.unwrap_or_default(),
        branch: optional(values, "branch")?.unwrap_or_default(),
        name: optional(values, "name")?,
        email: optional(values, "email")?,
        cname: optional(values, "cname")?,
        add: flag(values, "add")?,
        silent: flag(values, "silent")?,
        dotfiles: flag(values, "dotfiles")?,
        notfound: flag(values, "notfound")?,
        nojekyll: flag(values, "nojekyll")?,
        dry_run: flag(values, "dryRun")?,
    })
}

pub fn cmdline(program: &Program, args: Vec<String>) -> Result<Cmdline> {
    let options = deploy_options(&program.values())?;
    tracing::debug!(?options, ?args, "resolved deploy options");
    Ok(Cmdline { options, args })
}
