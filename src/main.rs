// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Church administration command line.
//!
//! Lists, filters, creates and edits members, ministries and roles against
//! the REST API, or runs the in-memory API server for local development.

use anyhow::Context;
use church_admin::{
    cache::QueryCache,
    config::Config,
    models::{
        Group, Member, MemberDraft, MemberRole, Ministry, MinistryDraft, Record, Resource, Role,
        RoleDraft,
    },
    routes::create_router,
    services::{ApiClient, MemoryStore},
    views::{
        BaptismFilter, Choice, ListView, MemberListView, MinistryListView, Notification,
        RecordFilter, RoleListView,
    },
    AppState,
};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "church-admin", version, about = "Church membership administration")]
struct Cli {
    /// Root URL of the REST API (overrides API_BASE_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the in-memory API server
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    #[command(subcommand)]
    Members(MemberCommand),
    #[command(subcommand)]
    Ministries(MinistryCommand),
    #[command(subcommand)]
    Roles(RoleCommand),
}

#[derive(Subcommand)]
enum MemberCommand {
    /// List members matching every given filter
    List {
        /// Case-insensitive substring of the given names
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        group: Choice<Group>,
        #[arg(long, default_value = "all")]
        role: Choice<MemberRole>,
        /// all, yes or no
        #[arg(long, default_value = "all")]
        baptized: BaptismFilter,
    },
    /// Print the number of members known to the server
    Count,
    Add(MemberFields),
    Edit {
        id: String,
        #[command(flatten)]
        fields: MemberFields,
    },
}

#[derive(Args)]
struct MemberFields {
    #[arg(long)]
    names: Option<String>,
    #[arg(long)]
    last_names: Option<String>,
    #[arg(long)]
    role: Option<MemberRole>,
    #[arg(long)]
    group: Option<Group>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    baptized: Option<bool>,
}

impl MemberFields {
    fn apply(self, draft: &mut MemberDraft) {
        set(&mut draft.names, self.names);
        set(&mut draft.last_names, self.last_names);
        set(&mut draft.role, self.role.map(Some));
        set(&mut draft.minister, self.group.map(Some));
        set(&mut draft.address, self.address);
        set(&mut draft.email, self.email);
        set(&mut draft.phone, self.phone);
        set(&mut draft.image, self.image);
        set(&mut draft.baptized, self.baptized);
    }
}

#[derive(Subcommand)]
enum MinistryCommand {
    List,
    Add(MinistryFields),
    Edit {
        id: String,
        #[command(flatten)]
        fields: MinistryFields,
    },
}

#[derive(Args)]
struct MinistryFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    leader: Option<String>,
}

impl MinistryFields {
    fn apply(self, draft: &mut MinistryDraft) {
        set(&mut draft.name, self.name);
        set(&mut draft.description, self.description);
        set(&mut draft.leader, self.leader);
    }
}

#[derive(Subcommand)]
enum RoleCommand {
    List,
    Add(RoleFields),
    Edit {
        id: String,
        #[command(flatten)]
        fields: RoleFields,
    },
}

#[derive(Args)]
struct RoleFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Comma separated
    #[arg(long)]
    permissions: Option<String>,
}

impl RoleFields {
    fn apply(self, draft: &mut RoleDraft) {
        set(&mut draft.name, self.name);
        set(&mut draft.description, self.description);
        if let Some(text) = self.permissions {
            draft.set_permissions_text(&text);
        }
    }
}

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_base_url(url)?;
    }

    let cache = QueryCache::new(ApiClient::new(&config.api_base_url));

    match cli.command {
        Command::Serve { port } => serve(config, port).await,
        Command::Members(command) => members(command, &cache).await,
        Command::Ministries(command) => ministries(command, &cache).await,
        Command::Roles(command) => roles(command, &cache).await,
    }
}

async fn serve(config: Config, port: Option<u16>) -> anyhow::Result<()> {
    let port = port.unwrap_or(config.port);
    let state = Arc::new(AppState {
        config,
        store: MemoryStore::new(),
    });
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn members(command: MemberCommand, cache: &QueryCache<ApiClient>) -> anyhow::Result<()> {
    let mut view = MemberListView::new();
    match command {
        MemberCommand::List {
            search,
            group,
            role,
            baptized,
        } => {
            view.filter.search = search;
            view.filter.group = group;
            view.filter.role = role;
            view.filter.baptism = baptized;
            load(&mut view, cache).await?;

            println!("Miembro\tRol\tGrupo\tCorreo\tTeléfono\tDirección\tBautizado");
            for member in view.filtered() {
                print_member(member);
            }
            Ok(())
        }
        MemberCommand::Count => {
            match view.member_count(cache).await? {
                Some(count) => println!("{}", count),
                None => anyhow::bail!("{}", church_admin::models::member::COUNT_FAILED),
            }
            Ok(())
        }
        MemberCommand::Add(fields) => {
            view.open_create();
            if let Some(draft) = view.draft_mut() {
                fields.apply(draft);
            }
            save(&mut view, cache).await
        }
        MemberCommand::Edit { id, fields } => {
            open_for_edit(&mut view, cache, &id).await?;
            if let Some(draft) = view.draft_mut() {
                fields.apply(draft);
            }
            save(&mut view, cache).await
        }
    }
}

async fn ministries(command: MinistryCommand, cache: &QueryCache<ApiClient>) -> anyhow::Result<()> {
    let mut view = MinistryListView::new();
    match command {
        MinistryCommand::List => {
            load(&mut view, cache).await?;
            println!("{}", view.total_label());
            println!("Nombre\tDescripción\tLíder");
            for ministry in view.filtered() {
                print_ministry(ministry);
            }
            Ok(())
        }
        MinistryCommand::Add(fields) => {
            view.open_create();
            if let Some(draft) = view.draft_mut() {
                fields.apply(draft);
            }
            save(&mut view, cache).await
        }
        MinistryCommand::Edit { id, fields } => {
            open_for_edit(&mut view, cache, &id).await?;
            if let Some(draft) = view.draft_mut() {
                fields.apply(draft);
            }
            save(&mut view, cache).await
        }
    }
}

async fn roles(command: RoleCommand, cache: &QueryCache<ApiClient>) -> anyhow::Result<()> {
    let mut view = RoleListView::new();
    match command {
        RoleCommand::List => {
            load(&mut view, cache).await?;
            println!("{}", view.total_label());
            println!("Nombre\tDescripción\tPermisos");
            for role in view.filtered() {
                print_role(role);
            }
            Ok(())
        }
        RoleCommand::Add(fields) => {
            view.open_create();
            if let Some(draft) = view.draft_mut() {
                fields.apply(draft);
            }
            save(&mut view, cache).await
        }
        RoleCommand::Edit { id, fields } => {
            open_for_edit(&mut view, cache, &id).await?;
            if let Some(draft) = view.draft_mut() {
                fields.apply(draft);
            }
            save(&mut view, cache).await
        }
    }
}

/// Load the collection; a failed load is reported and ends the command.
async fn load<R, F>(view: &mut ListView<R, F>, cache: &QueryCache<ApiClient>) -> anyhow::Result<()>
where
    R: Resource,
    F: RecordFilter<R::Record> + Default,
{
    view.load(cache).await?;
    let notifications = view.take_notifications();
    let failed = notifications.iter().any(Notification::is_error);
    print_notifications(notifications);
    if failed {
        anyhow::bail!("could not load {}", R::PATH);
    }
    Ok(())
}

async fn open_for_edit<R, F>(
    view: &mut ListView<R, F>,
    cache: &QueryCache<ApiClient>,
    id: &str,
) -> anyhow::Result<()>
where
    R: Resource,
    F: RecordFilter<R::Record> + Default,
{
    load(view, cache).await?;
    if !view.open_edit(id) {
        anyhow::bail!("no {} record with id {}", R::PATH, id);
    }
    Ok(())
}

/// Submit the open form and print the saved record.
async fn save<R, F>(view: &mut ListView<R, F>, cache: &QueryCache<ApiClient>) -> anyhow::Result<()>
where
    R: Resource,
    F: RecordFilter<R::Record> + Default,
{
    if let Some(title) = view.form_title() {
        tracing::info!(title, "Submitting form");
    }
    let saved = view.submit(cache).await?;
    print_notifications(view.take_notifications());

    match saved {
        Some(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        None => anyhow::bail!("{} was not saved", R::PATH),
    }
}

fn print_notifications(notifications: Vec<Notification>) {
    for notification in notifications {
        eprintln!("{}: {}", notification.title, notification.description);
    }
}

fn print_member(member: &Member) {
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        member.display_name(),
        member.role_label(),
        member.group_label(),
        member.email,
        member.phone,
        member.address,
        if member.baptized { "Sí" } else { "No" }
    );
}

fn print_ministry(ministry: &Ministry) {
    println!(
        "{}\t{}\t{}",
        ministry.name, ministry.description, ministry.leader
    );
}

fn print_role(role: &Role) {
    println!(
        "{}\t{}\t{}",
        role.name,
        role.description,
        role.permissions.join(", ")
    );
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("church_admin=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
