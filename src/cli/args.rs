//! Command-line argument parsing for the prophet CLI.
//!
//! Arguments are split into positionals and `--flag value` pairs, then
//! matched against the command table. Unknown flags are usage errors.

use std::path::PathBuf;

use crate::error::ProphetError;
use crate::models::HostExportFormat;
use crate::state::Locale;

/// Parsed invocation: global options plus the command to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    /// `--api <url>` override of the backend URL.
    pub api_url: Option<String>,
    pub command: CliCommand,
}

/// Paging options shared by list commands. `None` means the configured default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListArgs {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostsCommand {
    List(ListArgs),
    Show { id: i64 },
    Delete { ids: Vec<i64> },
    Collect { ids: Vec<i64>, concurrent: Option<u32> },
    /// One host's data when `id` is set, else the CSV of all hosts.
    Export {
        id: Option<i64>,
        format: HostExportFormat,
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScansCommand {
    List(ListArgs),
    Show { id: i64 },
    Create {
        name: String,
        target: String,
        nmap_args: Option<String>,
    },
    Cancel { id: i64 },
    Results { id: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollectionsCommand {
    List(ListArgs),
    Show { id: i64 },
    Cancel { id: i64 },
    Retry { id: i64 },
    Watch { id: i64 },
    Export { id: i64, out: Option<PathBuf> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlatformsCommand {
    List,
    Test { id: i64 },
    Sync { id: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TagsCommand {
    List,
    Create {
        name: String,
        color: Option<String>,
        description: Option<String>,
    },
    Delete { id: i64 },
    Assign { tag_id: i64, host_id: i64 },
    Unassign { tag_id: i64, host_id: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppsCommand {
    List,
    Show { id: i64 },
    GraphGet { id: i64 },
    GraphSave { id: i64, file: PathBuf },
    GraphExport { id: i64, out: Option<PathBuf> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocaleAction {
    Show,
    Toggle,
    Set(Locale),
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Captcha { out: Option<PathBuf>, open: bool },
    Login {
        username: String,
        captcha_id: String,
        captcha: String,
    },
    Register {
        username: String,
        email: String,
        captcha_id: String,
        captcha: String,
    },
    Logout,
    Whoami,
    Hosts(HostsCommand),
    Scans(ScansCommand),
    Collections(CollectionsCommand),
    Platforms(PlatformsCommand),
    Tags(TagsCommand),
    Apps(AppsCommand),
    ConfigGet,
    ConfigSet {
        scan: Option<u32>,
        collect: Option<u32>,
    },
    ImportHosts { file: PathBuf },
    Locale(LocaleAction),
    PageSize(Option<u32>),
    /// Run the route guard for a path.
    Open { path: String },
    Version,
    Help,
}

/// Positionals and flags of one invocation.
struct ArgList {
    positionals: Vec<String>,
    flags: Vec<(String, Option<String>)>,
}

/// Flags that never take a value.
const SWITCHES: &[&str] = &["--open", "--help", "-h", "--version", "-V"];

impl ArgList {
    fn split(args: Vec<String>) -> Self {
        let mut positionals = Vec::new();
        let mut flags = Vec::new();
        let mut iter = args.into_iter().peekable();
        while let Some(arg) = iter.next() {
            if arg.starts_with('-') && arg.len() > 1 && arg.parse::<i64>().is_err() {
                if let Some((name, value)) = arg.split_once('=') {
                    flags.push((name.to_string(), Some(value.to_string())));
                } else if SWITCHES.contains(&arg.as_str()) {
                    flags.push((arg, None));
                } else {
                    let value = match iter.peek() {
                        Some(next) if !next.starts_with("--") => iter.next(),
                        _ => None,
                    };
                    flags.push((arg, value));
                }
            } else {
                positionals.push(arg);
            }
        }
        Self { positionals, flags }
    }

    fn take_switch(&mut self, name: &str) -> bool {
        let before = self.flags.len();
        self.flags.retain(|(n, _)| n != name);
        before != self.flags.len()
    }

    fn take(&mut self, name: &str) -> Result<Option<String>, ProphetError> {
        match self.flags.iter().position(|(n, _)| n == name) {
            Some(index) => match self.flags.remove(index).1 {
                Some(value) => Ok(Some(value)),
                None => Err(ProphetError::usage(format!("{} needs a value", name))),
            },
            None => Ok(None),
        }
    }

    fn take_required(&mut self, name: &str) -> Result<String, ProphetError> {
        self.take(name)?
            .ok_or_else(|| ProphetError::usage(format!("missing {}", name)))
    }

    fn take_number<T: std::str::FromStr>(&mut self, name: &str) -> Result<Option<T>, ProphetError> {
        self.take(name)?
            .map(|v| parse_number(name, &v))
            .transpose()
    }

    fn positional(&mut self, what: &str) -> Result<String, ProphetError> {
        if self.positionals.is_empty() {
            Err(ProphetError::usage(format!("missing {}", what)))
        } else {
            Ok(self.positionals.remove(0))
        }
    }

    fn optional_positional(&mut self) -> Option<String> {
        if self.positionals.is_empty() {
            None
        } else {
            Some(self.positionals.remove(0))
        }
    }

    fn id(&mut self, what: &str) -> Result<i64, ProphetError> {
        let value = self.positional(what)?;
        parse_number(what, &value)
    }

    fn ids(&mut self) -> Result<Vec<i64>, ProphetError> {
        let ids = std::mem::take(&mut self.positionals)
            .iter()
            .flat_map(|arg| arg.split(',').map(str::to_string).collect::<Vec<_>>())
            .filter(|s| !s.is_empty())
            .map(|s| parse_number("host id", &s))
            .collect::<Result<Vec<i64>, _>>()?;
        if ids.is_empty() {
            return Err(ProphetError::usage("missing host id"));
        }
        Ok(ids)
    }

    fn list_args(&mut self) -> Result<ListArgs, ProphetError> {
        Ok(ListArgs {
            page: self.take_number("--page")?,
            per_page: self.take_number("--per-page")?,
            search: self.take("--search")?,
            status: self.take("--status")?,
        })
    }

    fn finish(self) -> Result<(), ProphetError> {
        if let Some((name, _)) = self.flags.first() {
            return Err(ProphetError::usage(format!("unknown option {}", name)));
        }
        if let Some(extra) = self.positionals.first() {
            return Err(ProphetError::usage(format!("unexpected argument {}", extra)));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(what: &str, value: &str) -> Result<T, ProphetError> {
    value
        .parse()
        .map_err(|_| ProphetError::usage(format!("{} must be a number, got {:?}", what, value)))
}

/// Parse command-line arguments (including the program name) into a [`Cli`].
///
/// # Examples
///
/// ```
/// use prophet::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["prophet".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap().command, CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<Cli, ProphetError>
where
    I: Iterator<Item = String>,
{
    let mut list = ArgList::split(args.skip(1).collect());
    let api_url = list.take("--api")?;

    if list.take_switch("--version") || list.take_switch("-V") {
        return Ok(Cli {
            api_url,
            command: CliCommand::Version,
        });
    }
    if list.take_switch("--help") || list.take_switch("-h") || list.positionals.is_empty() {
        return Ok(Cli {
            api_url,
            command: CliCommand::Help,
        });
    }

    let name = list.positional("command")?;
    let command = match name.as_str() {
        "captcha" => CliCommand::Captcha {
            out: list.take("--out")?.map(PathBuf::from),
            open: list.take_switch("--open"),
        },
        "login" => CliCommand::Login {
            username: list.positional("username")?,
            captcha_id: list.take_required("--captcha-id")?,
            captcha: list.take_required("--captcha")?,
        },
        "register" => CliCommand::Register {
            username: list.positional("username")?,
            email: list.take_required("--email")?,
            captcha_id: list.take_required("--captcha-id")?,
            captcha: list.take_required("--captcha")?,
        },
        "logout" => CliCommand::Logout,
        "whoami" => CliCommand::Whoami,
        "hosts" => CliCommand::Hosts(parse_hosts(&mut list)?),
        "scans" => CliCommand::Scans(parse_scans(&mut list)?),
        "collections" => CliCommand::Collections(parse_collections(&mut list)?),
        "platforms" => CliCommand::Platforms(parse_platforms(&mut list)?),
        "tags" => CliCommand::Tags(parse_tags(&mut list)?),
        "apps" => CliCommand::Apps(parse_apps(&mut list)?),
        "config" => match list.positional("config action")?.as_str() {
            "get" => CliCommand::ConfigGet,
            "set" => CliCommand::ConfigSet {
                scan: list.take_number("--scan")?,
                collect: list.take_number("--collect")?,
            },
            other => return Err(unknown("config", other)),
        },
        "import" => match list.positional("import kind")?.as_str() {
            "hosts" => CliCommand::ImportHosts {
                file: PathBuf::from(list.positional("CSV file")?),
            },
            other => return Err(unknown("import", other)),
        },
        "locale" => match list.optional_positional().as_deref() {
            None => CliCommand::Locale(LocaleAction::Show),
            Some("toggle") => CliCommand::Locale(LocaleAction::Toggle),
            Some(value) => match Locale::parse(value) {
                Some(locale) => CliCommand::Locale(LocaleAction::Set(locale)),
                None => return Err(unknown("locale", value)),
            },
        },
        "settings" => match list.positional("setting")?.as_str() {
            "page-size" => CliCommand::PageSize(
                list.optional_positional()
                    .map(|v| parse_number("page size", &v))
                    .transpose()?,
            ),
            other => return Err(unknown("settings", other)),
        },
        "open" => CliCommand::Open {
            path: list.positional("path")?,
        },
        "version" => CliCommand::Version,
        "help" => CliCommand::Help,
        other => return Err(ProphetError::usage(format!("unknown command {}", other))),
    };

    list.finish()?;
    Ok(Cli { api_url, command })
}

fn unknown(group: &str, action: &str) -> ProphetError {
    ProphetError::usage(format!("unknown {} action {}", group, action))
}

fn parse_hosts(list: &mut ArgList) -> Result<HostsCommand, ProphetError> {
    let action = list.optional_positional().unwrap_or_else(|| "list".to_string());
    Ok(match action.as_str() {
        "list" => HostsCommand::List(list.list_args()?),
        "show" => HostsCommand::Show {
            id: list.id("host id")?,
        },
        "delete" => HostsCommand::Delete { ids: list.ids()? },
        "collect" => HostsCommand::Collect {
            concurrent: list.take_number("--concurrent")?,
            ids: list.ids()?,
        },
        "export" => {
            let format = match list.take("--format")? {
                Some(value) => HostExportFormat::parse(&value)
                    .ok_or_else(|| ProphetError::usage(format!("unknown format {}", value)))?,
                None => HostExportFormat::Json,
            };
            HostsCommand::Export {
                out: list.take("--out")?.map(PathBuf::from),
                format,
                id: list
                    .optional_positional()
                    .map(|v| parse_number("host id", &v))
                    .transpose()?,
            }
        }
        other => return Err(unknown("hosts", other)),
    })
}

fn parse_scans(list: &mut ArgList) -> Result<ScansCommand, ProphetError> {
    let action = list.optional_positional().unwrap_or_else(|| "list".to_string());
    Ok(match action.as_str() {
        "list" => ScansCommand::List(list.list_args()?),
        "show" => ScansCommand::Show {
            id: list.id("scan id")?,
        },
        "create" => ScansCommand::Create {
            target: list.positional("scan target")?,
            name: list.take_required("--name")?,
            nmap_args: list.take("--nmap-args")?,
        },
        "cancel" => ScansCommand::Cancel {
            id: list.id("scan id")?,
        },
        "results" => ScansCommand::Results {
            id: list.id("scan id")?,
        },
        other => return Err(unknown("scans", other)),
    })
}

fn parse_collections(list: &mut ArgList) -> Result<CollectionsCommand, ProphetError> {
    let action = list.optional_positional().unwrap_or_else(|| "list".to_string());
    Ok(match action.as_str() {
        "list" => CollectionsCommand::List(list.list_args()?),
        "show" => CollectionsCommand::Show {
            id: list.id("task id")?,
        },
        "cancel" => CollectionsCommand::Cancel {
            id: list.id("task id")?,
        },
        "retry" => CollectionsCommand::Retry {
            id: list.id("task id")?,
        },
        "watch" => CollectionsCommand::Watch {
            id: list.id("task id")?,
        },
        "export" => CollectionsCommand::Export {
            id: list.id("task id")?,
            out: list.take("--out")?.map(PathBuf::from),
        },
        other => return Err(unknown("collections", other)),
    })
}

fn parse_platforms(list: &mut ArgList) -> Result<PlatformsCommand, ProphetError> {
    let action = list.optional_positional().unwrap_or_else(|| "list".to_string());
    Ok(match action.as_str() {
        "list" => PlatformsCommand::List,
        "test" => PlatformsCommand::Test {
            id: list.id("platform id")?,
        },
        "sync" => PlatformsCommand::Sync {
            id: list.id("platform id")?,
        },
        other => return Err(unknown("platforms", other)),
    })
}

fn parse_tags(list: &mut ArgList) -> Result<TagsCommand, ProphetError> {
    let action = list.optional_positional().unwrap_or_else(|| "list".to_string());
    Ok(match action.as_str() {
        "list" => TagsCommand::List,
        "create" => TagsCommand::Create {
            name: list.positional("tag name")?,
            color: list.take("--color")?,
            description: list.take("--description")?,
        },
        "delete" => TagsCommand::Delete {
            id: list.id("tag id")?,
        },
        "assign" => TagsCommand::Assign {
            tag_id: list.id("tag id")?,
            host_id: list.id("host id")?,
        },
        "unassign" => TagsCommand::Unassign {
            tag_id: list.id("tag id")?,
            host_id: list.id("host id")?,
        },
        other => return Err(unknown("tags", other)),
    })
}

fn parse_apps(list: &mut ArgList) -> Result<AppsCommand, ProphetError> {
    let action = list.optional_positional().unwrap_or_else(|| "list".to_string());
    Ok(match action.as_str() {
        "list" => AppsCommand::List,
        "show" => AppsCommand::Show {
            id: list.id("application id")?,
        },
        "graph" => {
            let sub = list.positional("graph action")?;
            let id = list.id("application id")?;
            match sub.as_str() {
                "get" => AppsCommand::GraphGet { id },
                "save" => AppsCommand::GraphSave {
                    id,
                    file: PathBuf::from(list.positional("graph file")?),
                },
                "export" => AppsCommand::GraphExport {
                    id,
                    out: list.take("--out")?.map(PathBuf::from),
                },
                other => return Err(unknown("graph", other)),
            }
        }
        other => return Err(unknown("apps", other)),
    })
}
