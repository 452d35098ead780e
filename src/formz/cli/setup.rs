use clap::{Args, CommandFactory, Parser, Subcommand};
use once_cell::sync::Lazy;
use std::path::PathBuf;

/// "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
static VERSION: Lazy<String> = Lazy::new(|| {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    if IS_RELEASE == "true" || GIT_HASH.is_empty() {
        VERSION.to_string()
    } else {
        format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
    }
});

fn get_version() -> &'static str {
    VERSION.as_str()
}

#[derive(Parser, Debug)]
#[command(
    name = "formz",
    bin_name = "formz",
    version = get_version(),
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Build forms, fill them in, collect the responses", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding form-storage.json and config.json
    #[arg(long, global = true, env = "FORMZ_HOME", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help. Root only: subcommands keep clap's own help flag, which
    /// works before their required arguments are checked.
    #[arg(short, long)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Forms,
    Responses,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Forms => "Form Commands:",
            CommandGroup::Responses => "Response Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "new" | "edit" | "delete" => Some(CommandGroup::Forms),
            "preview" | "responses" => Some(CommandGroup::Responses),
            "go" | "config" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Forms,
            CommandGroup::Responses,
            CommandGroup::Misc,
        ]
    }
}

pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("formz {version}\n"));
    output.push_str("Build forms, fill them in, collect the responses\n");
    output.push('\n');
    output.push_str("Usage: formz [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --data-dir <DIR>  Where forms are stored [env: FORMZ_HOME]\n");
    output.push_str("  -v, --verbose         Verbose output\n");
    output.push_str("  -h, --help            Print help\n");
    output.push_str("  -V, --version         Print version\n");

    output
}

/// Prints grouped help at the top level, clap's own help for a subcommand.
pub fn print_help(command: &Option<Commands>) {
    let Some(command) = command else {
        print!("{}", get_grouped_help());
        return;
    };

    let mut cmd = Cli::command();
    if let Some(subcmd) = cmd.find_subcommand_mut(command.name()) {
        print!("{}", subcmd.render_help());
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List forms
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Create a form
    #[command(alias = "n", display_order = 2)]
    New {
        #[command(flatten)]
        edits: BuilderArgs,
    },

    /// Edit a form's title, description and fields
    #[command(alias = "e", display_order = 3)]
    Edit {
        /// Form position, id or id prefix
        form: String,

        #[command(flatten)]
        edits: BuilderArgs,
    },

    /// Delete a form and all of its responses
    #[command(alias = "rm", display_order = 4)]
    Delete {
        /// Form position, id or id prefix
        form: String,
    },

    /// Fill in a form and submit a response
    #[command(alias = "p", display_order = 10)]
    Preview {
        /// Form position, id or id prefix
        form: String,

        #[command(flatten)]
        answers: AnswerArgs,
    },

    /// Show the responses collected by a form
    #[command(alias = "r", display_order = 11)]
    Responses {
        /// Form position, id or id prefix
        form: String,
    },

    /// Navigate to a path such as /forms/new or /forms/<id>/preview
    #[command(display_order = 20)]
    Go {
        path: String,

        #[command(flatten)]
        edits: BuilderArgs,

        #[command(flatten)]
        answers: AnswerArgs,
    },

    /// Get or set configuration
    #[command(display_order = 21)]
    Config {
        /// Configuration key (date-format, show-responses)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::List => "list",
            Commands::New { .. } => "new",
            Commands::Edit { .. } => "edit",
            Commands::Delete { .. } => "delete",
            Commands::Preview { .. } => "preview",
            Commands::Responses { .. } => "responses",
            Commands::Go { .. } => "go",
            Commands::Config { .. } => "config",
        }
    }
}

/// Builder operations. Positions are 1-based.
#[derive(Args, Debug, Default, Clone)]
pub struct BuilderArgs {
    /// Form title
    #[arg(long)]
    pub title: Option<String>,

    /// Form description
    #[arg(long)]
    pub description: Option<String>,

    /// Append a field: KIND[*]:LABEL[:OPT1,OPT2] (KIND is text, single-choice or multi-choice; * marks it required)
    #[arg(long = "field", value_name = "SPEC")]
    pub fields: Vec<String>,

    /// Relabel a field: N=LABEL
    #[arg(long = "label", value_name = "N=LABEL")]
    pub labels: Vec<String>,

    /// Mark field N required
    #[arg(long = "require", value_name = "N")]
    pub require: Vec<usize>,

    /// Mark field N optional
    #[arg(long = "optional", value_name = "N")]
    pub optional: Vec<usize>,

    /// Append an option to choice field N: N=TEXT
    #[arg(long = "option", value_name = "N=TEXT")]
    pub add_options: Vec<String>,

    /// Change option O of choice field N: N.O=TEXT
    #[arg(long = "set-option", value_name = "N.O=TEXT")]
    pub set_options: Vec<String>,

    /// Remove field N (positions refer to the form before any removal)
    #[arg(long = "remove", value_name = "N")]
    pub remove: Vec<usize>,
}

impl BuilderArgs {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.fields.is_empty()
            && self.labels.is_empty()
            && self.require.is_empty()
            && self.optional.is_empty()
            && self.add_options.is_empty()
            && self.set_options.is_empty()
            && self.remove.is_empty()
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct AnswerArgs {
    /// Answer field N: N=VALUE (options by text or number, comma-separated for multi-choice). Without any, questions are prompted on stdin.
    #[arg(long = "answer", value_name = "N=VALUE")]
    pub answers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_new_with_fields() {
        let cli = Cli::try_parse_from([
            "formz",
            "new",
            "--title",
            "Survey",
            "--field",
            "text*:Name",
            "--field",
            "multi-choice:Extras:A,B",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::New { edits }) => {
                assert_eq!(edits.title.as_deref(), Some("Survey"));
                assert_eq!(edits.fields.len(), 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn parses_edit_operations() {
        let cli = Cli::try_parse_from([
            "formz", "edit", "2", "--remove", "1", "--remove", "3", "--require", "2",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Edit { form, edits }) => {
                assert_eq!(form, "2");
                assert_eq!(edits.remove, vec![1, 3]);
                assert_eq!(edits.require, vec![2]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn subcommand_help_ignores_missing_arguments() {
        for name in ["edit", "delete", "preview", "responses", "go"] {
            let err = Cli::try_parse_from(["formz", name, "--help"]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp, "{}", name);
        }
        let err = Cli::try_parse_from(["formz", "edit", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn root_help_flag_is_ours() {
        let cli = Cli::try_parse_from(["formz", "-h"]).unwrap();
        assert!(cli.help);
        assert!(cli.command.is_none());
    }

    #[test]
    fn every_visible_command_has_a_group() {
        let cmd = Cli::command();
        for sc in cmd.get_subcommands() {
            assert!(
                CommandGroup::for_command(sc.get_name()).is_some(),
                "{} has no help group",
                sc.get_name()
            );
        }
    }

    #[test]
    fn grouped_help_lists_commands() {
        let help = get_grouped_help();
        assert!(help.contains("Form Commands:"));
        assert!(help.contains("preview"));
    }
}
