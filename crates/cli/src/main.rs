mod logging;
mod render;

use std::fs;
use std::process;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use cli_reap_core::{
    BareOption, Environment, MatchMode, OptionsError, ReapOptions, Reaped, Reaper,
    load_options_from_str,
};
use tracing::{debug, info};

use crate::render::{
    Format, Report, StepReport, print_error_envelope, print_report, render_json_error,
};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "reap",
    version,
    about = "Claim flags and options from an argument vector and show what is left"
)]
struct Cli {
    /// Output mode: "pretty" for aligned terminal rows, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Match keys case-insensitively and treat `-` and `_` as the same.
    #[arg(long, global = true)]
    loose: bool,

    /// Treat an option with no usable value as a consumed flag.
    #[arg(long, global = true)]
    bare_presence: bool,

    /// JSON file with engine options (mode, bare_option, runtimes,
    /// run_marker, fixed_prefix). `--loose` and `--bare-presence` override it.
    #[arg(long, global = true, value_name = "FILE")]
    options: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

/// Raw tokens to reap, given after `--`.
#[derive(Args, Debug)]
struct Tokens {
    /// Argument tokens, invocation included (e.g. `-- node app.js --port 80`).
    #[arg(last = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

/// Fallback sources for `any`, `env`, and `run`.
#[derive(Args, Debug)]
struct EnvArgs {
    /// Primary fallback entry. Repeatable.
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_pair)]
    primary: Vec<(String, String)>,

    /// Secondary fallback entry, consulted after the primary. Repeatable.
    #[arg(long = "global", value_name = "KEY=VALUE", value_parser = parse_pair)]
    secondary: Vec<(String, String)>,

    /// Seed the primary entries from this process's environment.
    #[arg(long)]
    process_env: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    // ── Inspection ──────────────────────────────────────────────────
    /// Show the invocation prefix, the remaining tokens, and the terminator.
    Split {
        #[command(flatten)]
        tokens: Tokens,
    },

    /// List positional tokens without claiming anything.
    Pos {
        /// Also hide the value after every unclaimed bare flag.
        #[arg(long)]
        greedy: bool,
        #[command(flatten)]
        tokens: Tokens,
    },

    // ── Single claims ───────────────────────────────────────────────
    /// Claim a flag.
    Flag {
        /// Keys to try; the earliest matching token wins.
        #[arg(required = true)]
        keys: Vec<String>,
        #[command(flatten)]
        tokens: Tokens,
    },

    /// Claim an option value.
    Opt {
        /// Keys to try; the earliest matching token wins.
        #[arg(required = true)]
        keys: Vec<String>,
        #[command(flatten)]
        tokens: Tokens,
    },

    /// Check for a flag or option without claiming it.
    Has {
        /// Keys to look for.
        #[arg(required = true)]
        keys: Vec<String>,
        #[command(flatten)]
        tokens: Tokens,
    },

    /// Claim an option, then a flag, then fall back to the environment
    /// and finally a default.
    Any {
        /// Keys to try; the earliest matching token wins.
        #[arg(required = true)]
        keys: Vec<String>,
        /// Value returned when nothing else matches.
        #[arg(long)]
        default: Option<String>,
        #[command(flatten)]
        env: EnvArgs,
        #[command(flatten)]
        tokens: Tokens,
    },

    /// Look keys up in the fallback sources only.
    Env {
        /// Keys to look up, in order.
        #[arg(required = true)]
        keys: Vec<String>,
        #[command(flatten)]
        env: EnvArgs,
    },

    // ── Sequences ───────────────────────────────────────────────────
    /// Run a sequence of claims on one set of tokens, then list what is left.
    Run {
        /// A claim as KIND:KEY[,KEY...], where KIND is flag, opt, any, has,
        /// or env. `any` accepts a default as `any:KEY=DEFAULT`. Repeatable;
        /// steps run in order.
        #[arg(long = "step", value_name = "STEP", required = true)]
        steps: Vec<Step>,
        /// List positionals greedily after the steps.
        #[arg(long)]
        greedy: bool,
        #[command(flatten)]
        env: EnvArgs,
        #[command(flatten)]
        tokens: Tokens,
    },
}

/// The claim a `--step` performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepKind {
    Flag,
    Opt,
    Any,
    Has,
    Env,
}

impl StepKind {
    fn as_str(self) -> &'static str {
        match self {
            StepKind::Flag => "flag",
            StepKind::Opt => "opt",
            StepKind::Any => "any",
            StepKind::Has => "has",
            StepKind::Env => "env",
        }
    }
}

/// One parsed `--step` value.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    kind: StepKind,
    keys: Vec<String>,
    default: Option<String>,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((kind, rest)) = s.split_once(':') else {
            return Err(format!("expected KIND:KEY[,KEY...], got '{s}'"));
        };
        let kind = match kind {
            "flag" => StepKind::Flag,
            "opt" => StepKind::Opt,
            "any" => StepKind::Any,
            "has" => StepKind::Has,
            "env" => StepKind::Env,
            other => {
                return Err(format!(
                    "unknown step kind '{other}' (expected flag, opt, any, has, or env)"
                ));
            }
        };
        let (keys, default) = match (kind, rest.split_once('=')) {
            (StepKind::Any, Some((keys, default))) => (keys, Some(default.to_string())),
            _ => (rest, None),
        };
        Ok(Step {
            kind,
            keys: keys.split(',').map(str::to_string).collect(),
            default,
        })
    }
}

/// Parse `KEY=VALUE`, splitting at the first `=`.
fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    if let Err(err) = run(cli, format) {
        if format == Format::Json {
            print_error_envelope(&err);
            process::exit(1);
        }
        return Err(err);
    }
    Ok(())
}

fn run(cli: Cli, format: Format) -> Result<()> {
    let options = resolve_options(&cli, format)?;
    debug!(?options, "resolved engine options");

    let report = match cli.cmd {
        Cmd::Split { tokens } => cmd_steps(tokens.tokens, Environment::new(), options, &[], false),
        Cmd::Pos { greedy, tokens } => {
            cmd_steps(tokens.tokens, Environment::new(), options, &[], greedy)
        }
        Cmd::Flag { keys, tokens } => cmd_steps(
            tokens.tokens,
            Environment::new(),
            options,
            &[Step::single(StepKind::Flag, keys)],
            false,
        ),
        Cmd::Opt { keys, tokens } => cmd_steps(
            tokens.tokens,
            Environment::new(),
            options,
            &[Step::single(StepKind::Opt, keys)],
            false,
        ),
        Cmd::Has { keys, tokens } => cmd_steps(
            tokens.tokens,
            Environment::new(),
            options,
            &[Step::single(StepKind::Has, keys)],
            false,
        ),
        Cmd::Any {
            keys,
            default,
            env,
            tokens,
        } => {
            let step = Step {
                kind: StepKind::Any,
                keys,
                default,
            };
            cmd_steps(tokens.tokens, env.environment(), options, &[step], false)
        }
        Cmd::Env { keys, env } => cmd_steps(
            Vec::new(),
            env.environment(),
            options,
            &[Step::single(StepKind::Env, keys)],
            false,
        ),
        Cmd::Run {
            steps,
            greedy,
            env,
            tokens,
        } => cmd_steps(tokens.tokens, env.environment(), options, &steps, greedy),
    };

    print_report(&report, format)
}

// ── Commands ────────────────────────────────────────────────────────────

/// Build one engine over `tokens`, apply `steps` in order, and report the
/// state they leave behind.
fn cmd_steps(
    tokens: Vec<String>,
    env: Environment,
    options: ReapOptions,
    steps: &[Step],
    greedy: bool,
) -> Report {
    let mut reaper = Reaper::with_options(tokens, env, options);
    info!(steps = steps.len(), tokens = reaper.cur().len(), "reaping");

    let steps = steps.iter().map(|step| apply_step(&mut reaper, step)).collect();
    let pos = if greedy {
        reaper.pos_greedy()
    } else {
        reaper.pos()
    };

    Report {
        cmd: reaper.cmd().to_vec(),
        steps,
        pos,
        cur: reaper.cur().to_vec(),
        end: reaper.end(),
    }
}

fn apply_step(reaper: &mut Reaper, step: &Step) -> StepReport {
    let keys = step.keys.as_slice();
    let result = match step.kind {
        StepKind::Flag => presence(reaper.flag(keys)),
        StepKind::Opt => reaper.opt(keys).map_or(Reaped::NotFound, Reaped::Found),
        StepKind::Any => match &step.default {
            Some(default) => reaper.any_or(keys, default.as_str()),
            None => reaper.any(keys),
        },
        StepKind::Has => presence(reaper.has(keys)),
        StepKind::Env => reaper.env(keys).map_or(Reaped::NotFound, Reaped::Env),
    };
    debug!(op = step.kind.as_str(), ?keys, %result, "step");
    StepReport::new(step.kind.as_str(), keys, result)
}

fn presence(hit: bool) -> Reaped {
    if hit { Reaped::Flag } else { Reaped::NotFound }
}

impl Step {
    fn single(kind: StepKind, keys: Vec<String>) -> Self {
        Step {
            kind,
            keys,
            default: None,
        }
    }
}

impl EnvArgs {
    fn environment(&self) -> Environment {
        let base = if self.process_env {
            Environment::from_process()
        } else {
            Environment::new()
        };
        base.overlay_primary(self.primary.iter().cloned())
            .with_secondary(self.secondary.iter().cloned())
    }
}

// ── Options ─────────────────────────────────────────────────────────────

/// Options file first, then the `--loose` and `--bare-presence` overrides.
fn resolve_options(cli: &Cli, format: Format) -> Result<ReapOptions> {
    let mut options = match cli.options.as_deref() {
        Some(path) => load_options_file(path, format)?,
        None => ReapOptions::default(),
    };
    if cli.loose {
        options = options.with_mode(MatchMode::Loose);
    }
    if cli.bare_presence {
        options = options.with_bare_option(BareOption::Presence);
    }
    Ok(options)
}

fn load_options_file(path: &str, format: Format) -> Result<ReapOptions> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read options file '{path}'"))?;

    match load_options_from_str(&source) {
        Ok(options) => Ok(options),
        Err(OptionsError::InvalidJson(err)) if format == Format::Pretty => {
            render_json_error(&source, path, &err);
            process::exit(1);
        }
        Err(err) => Err(err).with_context(|| format!("failed to load options file '{path}'")),
    }
}
