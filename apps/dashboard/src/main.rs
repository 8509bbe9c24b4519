use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use client_core::{
    DashboardController, DashboardSurface, DirectoryClient, FormController, FormInput,
    NotificationChannel, Tab, UiSignal,
};
use shared::domain::SortKey;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

mod config;
mod console;

#[derive(Parser, Debug)]
#[command(
    name = "dashboard",
    about = "Console front-end for the provider directory service"
)]
struct Args {
    /// Base URL of the directory service; overrides config and environment.
    #[arg(long)]
    server_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = config::load_settings(args.server_url);
    tracing::info!(server_url = %settings.server_url, "starting dashboard");

    let surface: Arc<dyn DashboardSurface> = Arc::new(console::ConsoleSurface::new());
    let signal = UiSignal::new(Arc::clone(&surface));
    install_failure_guard(Arc::clone(&signal));

    let client = Arc::new(DirectoryClient::new(&settings.server_url, Arc::clone(&signal)));
    let notices = NotificationChannel::new(Arc::clone(&surface));
    let controller = DashboardController::new(
        Arc::clone(&client),
        Arc::clone(&surface),
        Arc::clone(&notices),
        settings.sort_key,
    );
    let form = FormController::new(client, Arc::clone(&controller), surface, notices);

    controller.start().await;
    run_command_loop(&controller, &form).await
}

/// A panicking task must not leave the loading indicator stuck.
fn install_failure_guard(signal: Arc<UiSignal>) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!("unhandled panic: {info}");
        signal.force_idle();
        default_hook(info);
    }));
}

const HELP: &str = "\
commands:
  tab <buscar|todos|agregar|comparar|estadisticas>   switch tab
  search <service>                                   search providers by service
  id <provider id>                                   look up a provider by id
  compare <service>                                  compare both search strategies
  sort <name|rating|service>                         reorder the provider list
  add <id>,<name>,<service>,<rating>                 register a provider
  seed                                               load server-side sample data
  help                                               show this help
  quit                                               exit";

async fn run_command_loop(controller: &DashboardController, form: &FormController) -> Result<()> {
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        match command {
            "" => {}
            "tab" => match Tab::from_slug(rest) {
                Some(tab) => controller.activate(tab).await,
                None => println!("unknown tab: {rest}"),
            },
            "search" => controller.run_service_search(rest).await,
            "id" => controller.run_id_search(rest).await,
            "compare" => controller.run_comparison(rest).await,
            "sort" => match SortKey::from_arg(rest) {
                Some(sort) => controller.set_sort_key(sort).await,
                None => println!("unknown sort key: {rest}"),
            },
            "add" => match parse_add(rest) {
                Some(input) => form.submit(input).await,
                None => println!("usage: add <id>,<name>,<service>,<rating>"),
            },
            "seed" => controller.seed_sample_data().await,
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            other => println!("unknown command: {other} (try 'help')"),
        }
    }
    Ok(())
}

fn parse_add(rest: &str) -> Option<FormInput> {
    let fields: Vec<&str> = rest.splitn(4, ',').map(str::trim).collect();
    if fields.len() != 4 {
        return None;
    }
    Some(FormInput {
        id: fields[0].to_string(),
        name: fields[1].to_string(),
        service: fields[2].to_string(),
        rating: fields[3].to_string(),
    })
}
