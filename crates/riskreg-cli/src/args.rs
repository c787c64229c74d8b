//! Command-line definition
//!
//! Builds the `riskreg` [`Command`] and turns parsed matches into an
//! [`Invocation`].

use crate::commands::{Action, ListOptions, MatrixFormat};
use crate::table::SortColumn;
use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use riskreg_model::{NewRisk, ReportingLevel, RiskId, RiskType, RiskUpdate};
use std::path::PathBuf;
use std::str::FromStr;

/// One parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// `--config` override
    pub config: Option<PathBuf>,
    /// `--data` override
    pub data: Option<PathBuf>,
    /// Requested action
    pub action: Action,
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(RiskId::from_str)
        .help("Risk id, e.g. R-3 or 3")
}

fn path_arg(help: &'static str) -> Arg {
    Arg::new("path")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

fn field_args(required: bool) -> [Arg; 6] {
    [
        Arg::new("name")
            .long("name")
            .required(required)
            .help("Short name"),
        Arg::new("description")
            .long("description")
            .required(required)
            .help("Free-text description"),
        Arg::new("probability")
            .long("probability")
            .required(required)
            .allow_negative_numbers(true)
            .value_parser(value_parser!(f64))
            .help("Probability in percent (0-100)"),
        Arg::new("impact")
            .long("impact")
            .required(required)
            .allow_negative_numbers(true)
            .value_parser(value_parser!(f64))
            .help("Monetary impact in budget currency"),
        Arg::new("reporting-level")
            .long("reporting-level")
            .value_parser(ReportingLevel::from_str)
            .help("Project, Program or SteerCo [default on add: Project]"),
        Arg::new("risk-type")
            .long("risk-type")
            .value_parser(RiskType::from_str)
            .help("Project or Business [default on add: Project]"),
    ]
}

/// Build the `riskreg` command
#[must_use]
pub fn command() -> Command {
    Command::new("riskreg")
        .version(crate::VERSION)
        .about("Project risk register with probability/impact matrix")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Config file [default: ./riskreg.toml when present]"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Risk store file, overrides data_file from config"),
        )
        .subcommand(
            Command::new("budget")
                .about("Set or show the project budget")
                .subcommand_required(true)
                .subcommand(
                    Command::new("set").about("Set the project budget").arg(
                        Arg::new("value")
                            .required(true)
                            .allow_negative_numbers(true)
                            .value_parser(value_parser!(f64))
                            .help("Positive amount"),
                    ),
                )
                .subcommand(Command::new("show").about("Show the project budget")),
        )
        .subcommand(
            Command::new("add")
                .about("Record a new risk")
                .args(field_args(true)),
        )
        .subcommand(
            Command::new("update")
                .about("Change fields of a risk")
                .arg(id_arg())
                .args(field_args(false)),
        )
        .subcommand(Command::new("delete").about("Remove a risk").arg(id_arg()))
        .subcommand(Command::new("show").about("Show one risk in detail").arg(id_arg()))
        .subcommand(
            Command::new("list")
                .about("List risks as a table")
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser(value_parser!(SortColumn))
                        .help("Column to sort by [default: insertion order]"),
                )
                .arg(
                    Arg::new("desc")
                        .long("desc")
                        .action(ArgAction::SetTrue)
                        .help("Reverse the sort order"),
                )
                .arg(
                    Arg::new("risk-type")
                        .long("type")
                        .value_parser(RiskType::from_str)
                        .help("Only risks of this type"),
                )
                .arg(
                    Arg::new("reporting-level")
                        .long("reporting-level")
                        .value_parser(ReportingLevel::from_str)
                        .help("Only risks reported at this level"),
                )
                .arg(
                    Arg::new("high")
                        .long("high")
                        .action(ArgAction::SetTrue)
                        .help("Only High-level risks"),
                ),
        )
        .subcommand(
            Command::new("matrix")
                .about("Show the probability/impact matrix")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print occupied cells as JSON"),
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .default_value("Risk Matrix")
                        .help("Heading of the text matrix"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Save the register to another file")
                .arg(path_arg("Destination JSON file")),
        )
        .subcommand(
            Command::new("import")
                .about("Replace the register with the contents of a file")
                .arg(path_arg("Source JSON file")),
        )
}

fn required<T: Clone + Send + Sync + 'static>(args: &ArgMatches, id: &str) -> anyhow::Result<T> {
    args.get_one::<T>(id)
        .cloned()
        .with_context(|| format!("missing argument: {id}"))
}

fn new_risk(args: &ArgMatches) -> anyhow::Result<NewRisk> {
    let mut fields = NewRisk::new(
        required::<String>(args, "name")?,
        required::<String>(args, "description")?,
        required::<f64>(args, "probability")?,
        required::<f64>(args, "impact")?,
    );
    if let Some(level) = args.get_one::<ReportingLevel>("reporting-level") {
        fields = fields.with_reporting_level(*level);
    }
    if let Some(risk_type) = args.get_one::<RiskType>("risk-type") {
        fields = fields.with_risk_type(*risk_type);
    }
    Ok(fields)
}

fn risk_update(args: &ArgMatches) -> RiskUpdate {
    RiskUpdate {
        name: args.get_one::<String>("name").cloned(),
        description: args.get_one::<String>("description").cloned(),
        probability: args.get_one::<f64>("probability").copied(),
        impact: args.get_one::<f64>("impact").copied(),
        reporting_level: args.get_one::<ReportingLevel>("reporting-level").copied(),
        risk_type: args.get_one::<RiskType>("risk-type").copied(),
    }
}

impl Invocation {
    /// Interpret matches produced by [`command`]
    ///
    /// # Errors
    /// Returns an error for a missing or unknown subcommand
    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        let action = match matches.subcommand() {
            Some(("budget", args)) => match args.subcommand() {
                Some(("set", set)) => Action::SetBudget(required(set, "value")?),
                Some(("show", _)) => Action::ShowBudget,
                _ => anyhow::bail!("expected `budget set` or `budget show`"),
            },
            Some(("add", args)) => Action::Add(new_risk(args)?),
            Some(("update", args)) => Action::Update(required(args, "id")?, risk_update(args)),
            Some(("delete", args)) => Action::Delete(required(args, "id")?),
            Some(("show", args)) => Action::Show(required(args, "id")?),
            Some(("list", args)) => Action::List(ListOptions {
                sort: args.get_one::<SortColumn>("sort").copied(),
                descending: args.get_flag("desc"),
                risk_type: args.get_one::<RiskType>("risk-type").copied(),
                reporting_level: args.get_one::<ReportingLevel>("reporting-level").copied(),
                high_only: args.get_flag("high"),
            }),
            Some(("matrix", args)) => Action::Matrix {
                format: if args.get_flag("json") {
                    MatrixFormat::Json
                } else {
                    MatrixFormat::Text
                },
                title: required(args, "title")?,
            },
            Some(("export", args)) => Action::Export(required(args, "path")?),
            Some(("import", args)) => Action::Import(required(args, "path")?),
            Some((other, _)) => anyhow::bail!("unknown command: {other}"),
            None => anyhow::bail!("no command given"),
        };

        Ok(Self {
            config: matches.get_one::<PathBuf>("config").cloned(),
            data: matches.get_one::<PathBuf>("data").cloned(),
            action,
        })
    }

    /// Parse an argument list, program name first
    ///
    /// # Errors
    /// Returns the clap error for invalid arguments
    pub fn try_parse_from<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }
}
