use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use directories::ProjectDirs;
use rollcall::api::RollcallApi;
use rollcall::backend::http::HttpBackend;
use rollcall::config::RollcallConfig;
use rollcall::error::{Result, RollcallError};
use rollcall::model::StudentDraft;

mod args;
mod print;
mod session;

use args::{Cli, Commands};
use print::{print_messages, print_search_banner, print_stats, print_student, print_students};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: RollcallApi<HttpBackend>,
    config: RollcallConfig,
    config_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { name, age, grade }) => handle_add(&mut ctx, name, age, grade),
        Some(Commands::List { grade, search }) => handle_list(&mut ctx, grade, search),
        Some(Commands::Get { id }) => handle_get(&ctx, id),
        Some(Commands::Edit {
            id,
            name,
            age,
            grade,
        }) => handle_edit(&mut ctx, id, name, age, grade),
        Some(Commands::Delete { id, yes }) => handle_delete(&mut ctx, id, yes),
        Some(Commands::Search { query }) => handle_search(&mut ctx, query),
        Some(Commands::Stats) => handle_stats(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Browse) => session::run(ctx.api),
        None => handle_list(&mut ctx, None, None),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    // ROLLCALL_CONFIG_DIR keeps tests away from the real config.
    let config_dir = match std::env::var_os("ROLLCALL_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("com", "rollcall", "rollcall")
            .expect("Could not determine config dir")
            .config_dir()
            .to_path_buf(),
    };

    let mut config = RollcallConfig::load(&config_dir).unwrap_or_default();
    if let Ok(url) = std::env::var("ROLLCALL_URL") {
        config.base_url = url;
    }
    if let Some(url) = &cli.url {
        config.base_url = url.clone();
    }

    let backend = HttpBackend::new(&config)?;
    Ok(AppContext {
        api: RollcallApi::new(backend),
        config,
        config_dir,
    })
}

fn handle_add(ctx: &mut AppContext, name: String, age: u32, grade: String) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RollcallError::InvalidInput("Name cannot be empty".into()));
    }

    let result = ctx.api.submit_form(&StudentDraft::new(name, age, grade))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(
    ctx: &mut AppContext,
    grade: Option<String>,
    search: Option<String>,
) -> Result<()> {
    if let Some(query) = search {
        return handle_search(ctx, query);
    }

    let result = ctx.api.list(grade.as_deref())?;
    print_students(&result.students, None);
    print_messages(&result.messages);
    Ok(())
}

fn handle_get(ctx: &AppContext, id: i64) -> Result<()> {
    let result = ctx.api.get(id)?;
    if let Some(student) = &result.student {
        print_student(student);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    id: i64,
    name: Option<String>,
    age: Option<u32>,
    grade: Option<String>,
) -> Result<()> {
    if name.is_none() && age.is_none() && grade.is_none() {
        return Err(RollcallError::InvalidInput(
            "Nothing to update: pass at least one of --name, --age, --grade".into(),
        ));
    }

    // Fetch current values so unspecified fields keep what the server has.
    let fetched = ctx.api.begin_edit(id)?;
    let current = fetched
        .student
        .ok_or(RollcallError::NotFound(id))?;

    let draft = StudentDraft::new(
        name.unwrap_or(current.name),
        age.unwrap_or(current.age),
        grade.unwrap_or(current.grade),
    );
    if draft.name.trim().is_empty() {
        return Err(RollcallError::InvalidInput("Name cannot be empty".into()));
    }

    let result = ctx.api.submit_form(&draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: i64, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        print!("Are you sure you want to delete student {}? [y/N]: ", id);
        io::stdout().flush().map_err(RollcallError::Io)?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .map_err(RollcallError::Io)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Operation cancelled.");
            return Ok(());
        }
    }

    let result = ctx.api.delete_one(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &mut AppContext, query: String) -> Result<()> {
    let result = ctx.api.search(&query)?;
    if let Some(info) = &result.search {
        print_search_banner(info);
    }
    print_students(&result.students, Some(&query));
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stats()?;
    if let Some(stats) = &result.stats {
        print_stats(stats);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(
    ctx: &mut AppContext,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    match (key.as_deref(), value) {
        (None, _) => {
            println!("base-url = {}", ctx.config.base_url);
            println!("api-prefix = {}", ctx.config.api_prefix);
            println!("timeout = {}", ctx.config.timeout_secs);
        }
        (Some("base-url"), None) => println!("base-url = {}", ctx.config.base_url),
        (Some("api-prefix"), None) => println!("api-prefix = {}", ctx.config.api_prefix),
        (Some("timeout"), None) => println!("timeout = {}", ctx.config.timeout_secs),
        (Some("base-url"), Some(v)) => {
            ctx.config.base_url = v.trim_end_matches('/').to_string();
            ctx.config.save(&ctx.config_dir)?;
            println!("base-url = {}", ctx.config.base_url);
        }
        (Some("api-prefix"), Some(v)) => {
            ctx.config.set_api_prefix(&v);
            ctx.config.save(&ctx.config_dir)?;
            println!("api-prefix = {}", ctx.config.api_prefix);
        }
        (Some("timeout"), Some(v)) => {
            let secs: u64 = v.parse().map_err(|_| {
                RollcallError::InvalidInput(format!("Invalid timeout: {}", v))
            })?;
            ctx.config.timeout_secs = secs;
            ctx.config.save(&ctx.config_dir)?;
            println!("timeout = {}", ctx.config.timeout_secs);
        }
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
        }
    }
    Ok(())
}
