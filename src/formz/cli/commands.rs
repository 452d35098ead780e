use super::input::{apply_answer_args, apply_builder_args};
use super::print::{print_messages, render_form, render_form_list, render_responses};
use super::prompt::fill_interactively;
use super::setup::{print_help, AnswerArgs, BuilderArgs, Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use formz::api::{CmdResult, ConfigAction, FormzApi};
use formz::builder::BuilderEntry;
use formz::config::KEYS;
use formz::error::{FormzError, Result};
use formz::model::Form;
use formz::router::Route;
use formz::store::fs::FileBackend;
use formz::store::FormStore;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type Api = FormzApi<FileBackend>;

struct AppContext {
    api: Api,
}

/// What the user typed for the view a route lands on.
#[derive(Default)]
struct ViewInput {
    edits: BuilderArgs,
    answers: AnswerArgs,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.help {
        print_help(&cli.command);
        return Ok(());
    }

    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        None => navigate(&mut ctx, Route::Root, ViewInput::default()),
        Some(Commands::List) => navigate(&mut ctx, Route::List, ViewInput::default()),
        Some(Commands::New { edits }) => navigate(
            &mut ctx,
            Route::New,
            ViewInput {
                edits,
                ..ViewInput::default()
            },
        ),
        Some(Commands::Edit { form, edits }) => navigate(
            &mut ctx,
            Route::Edit(form),
            ViewInput {
                edits,
                ..ViewInput::default()
            },
        ),
        Some(Commands::Delete { form }) => handle_delete(&mut ctx, &form),
        Some(Commands::Preview { form, answers }) => navigate(
            &mut ctx,
            Route::Preview(form),
            ViewInput {
                answers,
                ..ViewInput::default()
            },
        ),
        Some(Commands::Responses { form }) => {
            navigate(&mut ctx, Route::Responses(form), ViewInput::default())
        }
        Some(Commands::Go {
            path,
            edits,
            answers,
        }) => navigate(&mut ctx, Route::parse(&path)?, ViewInput { edits, answers }),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "formz=debug" } else { "formz=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // A subscriber may already be installed (tests); keep it
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };
    debug!(data_dir = %data_dir.display(), "opening form store");

    let store = FormStore::open(FileBackend::new(data_dir.clone()));
    Ok(AppContext {
        api: FormzApi::new(store, data_dir),
    })
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "formz", "formz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| FormzError::Store("Could not determine a data directory".to_string()))
}

/// Renders the view for `route`, then keeps following wherever that view
/// navigates next.
fn navigate(ctx: &mut AppContext, route: Route, input: ViewInput) -> Result<()> {
    let mut next = Some(route);
    while let Some(route) = next.take() {
        let route = route.resolve();
        debug!(%route, "navigating");
        next = match route {
            Route::Root | Route::List => {
                handle_list(ctx)?;
                None
            }
            Route::New => handle_builder(ctx, None, &input.edits, Api::create_form)?,
            Route::Edit(reference) => {
                handle_builder(ctx, Some(reference.as_str()), &input.edits, Api::update_form)?
            }
            Route::Preview(reference) => handle_preview(ctx, &reference, &input.answers)?,
            Route::Responses(reference) => {
                handle_responses(ctx, &reference)?;
                None
            }
        };
    }
    Ok(())
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    let config = ctx.api.load_config()?;
    let result = ctx.api.list_forms()?;
    print!(
        "{}",
        render_form_list(&result.listed_forms, config.show_responses)
    );
    print_messages(&result.messages);
    Ok(())
}

/// The save handler comes from the route: `add` for new forms, `update` for
/// existing ones.
fn handle_builder<F>(
    ctx: &mut AppContext,
    reference: Option<&str>,
    edits: &BuilderArgs,
    save: F,
) -> Result<Option<Route>>
where
    F: FnOnce(&mut Api, Form) -> Result<CmdResult>,
{
    let mut builder = match ctx.api.open_builder(reference)? {
        BuilderEntry::Editing(builder) => builder,
        BuilderEntry::Redirect(route) => {
            debug!(?reference, %route, "form not found, redirecting");
            return Ok(Some(route));
        }
    };

    if reference.is_some() && edits.is_empty() {
        print!("{}", render_form(builder.form()));
        return Ok(None);
    }

    apply_builder_args(&mut builder, edits)?;
    let api = &mut ctx.api;
    let result = builder.save(|form| save(api, form))?;

    print_messages(&result.messages);
    if let Some(form) = result.affected_forms.first() {
        println!();
        print!("{}", render_form(form));
        println!();
    }
    Ok(Some(Route::List))
}

fn handle_preview(
    ctx: &mut AppContext,
    reference: &str,
    answers: &AnswerArgs,
) -> Result<Option<Route>> {
    let Some(mut session) = ctx.api.open_fill(reference)? else {
        println!("Form not found");
        return Ok(None);
    };

    if answers.answers.is_empty() {
        let form = session.form();
        println!("{}", form.title);
        if !form.description.is_empty() {
            println!("{}", form.description);
        }
        if console::user_attended() {
            println!("(press Enter to skip optional questions)");
        }
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout().lock();
        fill_interactively(&mut session, &mut input, &mut out)?;
    } else {
        apply_answer_args(&mut session, answers)?;
    }

    let response = session.submit()?;
    let result = ctx.api.submit_response(response)?;
    print_messages(&result.messages);
    Ok(Some(Route::List))
}

fn handle_responses(ctx: &mut AppContext, reference: &str) -> Result<()> {
    let result = ctx.api.responses(reference)?;
    if let Some(form) = result.affected_forms.first() {
        print!("{}", render_responses(form, &result.responses));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, reference: &str) -> Result<()> {
    let result = ctx.api.delete_form(reference)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            for key in KEYS {
                println!("{} = {}", key, config.get(key).unwrap_or_default());
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}
