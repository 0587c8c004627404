mod logging;
mod render;

use admin_client::{
    Action, Confirm, Controller, Dashboard, EntityKind, EntityType, Outcome, Transport,
};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::sync::Arc;

const MAX_CELL: usize = 40;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Data service base URL
    #[arg(
        short,
        long,
        env = "ADMIN_API_URL",
        default_value = "http://localhost:3000"
    )]
    server: String,

    /// Bearer token sent with every request
    #[arg(long, env = "ADMIN_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Work on seeded in-memory data instead of a server
    #[arg(long)]
    demo: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short, long)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage posts
    #[command(subcommand)]
    Posts(PostCommand),

    /// Manage users
    #[command(subcommand)]
    Users(UserCommand),
}

#[derive(Subcommand)]
enum PostCommand {
    List,

    Create(PostFields),

    Update {
        #[arg(short, long)]
        id: i64,

        #[command(flatten)]
        fields: PostFields,
    },

    Delete {
        #[arg(short, long)]
        id: i64,
    },

    Publish {
        #[arg(short, long)]
        id: i64,
    },

    Archive {
        #[arg(short, long)]
        id: i64,
    },

    Restore {
        #[arg(short, long)]
        id: i64,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    List,

    Create(UserFields),

    Update {
        #[arg(short, long)]
        id: i64,

        #[command(flatten)]
        fields: UserFields,
    },

    Delete {
        #[arg(short, long)]
        id: i64,
    },
}

#[derive(Args)]
struct PostFields {
    #[arg(short, long)]
    title: Option<String>,

    #[arg(short, long)]
    content: Option<String>,

    #[arg(short, long)]
    author: Option<String>,

    /// development, design or accessibility
    #[arg(long)]
    category: Option<String>,
}

impl PostFields {
    fn values(&self) -> Vec<(&'static str, &str)> {
        present(&[
            ("title", &self.title),
            ("content", &self.content),
            ("author", &self.author),
            ("category", &self.category),
        ])
    }
}

#[derive(Args)]
struct UserFields {
    #[arg(short, long)]
    username: Option<String>,

    #[arg(short, long)]
    email: Option<String>,

    /// user, moderator or admin
    #[arg(long)]
    role: Option<String>,

    /// active, inactive or suspended
    #[arg(long)]
    status: Option<String>,
}

impl UserFields {
    fn values(&self) -> Vec<(&'static str, &str)> {
        present(&[
            ("username", &self.username),
            ("email", &self.email),
            ("role", &self.role),
            ("status", &self.status),
        ])
    }
}

fn present<'a>(fields: &[(&'static str, &'a Option<String>)]) -> Vec<(&'static str, &'a str)> {
    fields
        .iter()
        .filter_map(|(name, value)| value.as_deref().map(|value| (*name, value)))
        .collect()
}

/// Reads `y`/`yes` from stdin unless told to assume yes.
struct PromptConfirm {
    assume_yes: bool,
}

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("❓ {} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

/// Commands shared by every entity kind.
enum Op<'a> {
    List,
    Create(Vec<(&'static str, &'a str)>),
    Update(i64, Vec<(&'static str, &'a str)>),
    Delete(i64),
}

fn bind<K: EntityKind>(
    controller: &mut Controller<K>,
    values: &[(&'static str, &str)],
) -> Result<()> {
    for (name, value) in values {
        controller
            .set_field(name, value)
            .with_context(|| format!("Invalid --{} for {}", name, K::MESSAGES.noun))?;
    }
    Ok(())
}

async fn apply<K: EntityKind>(
    controller: &mut Controller<K>,
    loaded: Outcome,
    op: Op<'_>,
) -> Result<Outcome> {
    match op {
        Op::List => Ok(loaded),
        Op::Create(values) => {
            println!("📝 Creating new {}...", K::MESSAGES.noun);
            controller.open_create();
            bind(controller, &values)?;
            Ok(controller.submit_create().await)
        }
        Op::Update(id, values) => {
            println!("✏️ Updating {} #{}", K::MESSAGES.noun, id);
            if !controller.start_edit_by_id(id) {
                bail!("{} #{} is not in the list", K::MESSAGES.noun, id);
            }
            bind(controller, &values)?;
            Ok(controller.commit_edit().await)
        }
        Op::Delete(id) => {
            println!("🗑️ Deleting {} #{}", K::MESSAGES.noun, id);
            Ok(controller.remove(id).await)
        }
    }
}

fn announce(action: Action, id: i64) {
    println!("🔁 {} post #{}", action.label(), id);
}

async fn run_posts(dashboard: &mut Dashboard, command: PostCommand) -> Result<Outcome> {
    let loaded = dashboard.select(EntityType::Post).await;
    let posts = dashboard.posts_mut();

    match command {
        PostCommand::List => apply(posts, loaded, Op::List).await,
        PostCommand::Create(fields) => apply(posts, loaded, Op::Create(fields.values())).await,
        PostCommand::Update { id, fields } => {
            apply(posts, loaded, Op::Update(id, fields.values())).await
        }
        PostCommand::Delete { id } => apply(posts, loaded, Op::Delete(id)).await,
        PostCommand::Publish { id } => {
            announce(Action::Publish, id);
            Ok(posts.publish(id).await)
        }
        PostCommand::Archive { id } => {
            announce(Action::Archive, id);
            Ok(posts.archive(id).await)
        }
        PostCommand::Restore { id } => {
            announce(Action::Restore, id);
            Ok(posts.restore(id).await)
        }
    }
}

async fn run_users(dashboard: &mut Dashboard, command: UserCommand) -> Result<Outcome> {
    let loaded = dashboard.select(EntityType::User).await;
    let users = dashboard.users_mut();

    match command {
        UserCommand::List => apply(users, loaded, Op::List).await,
        UserCommand::Create(fields) => apply(users, loaded, Op::Create(fields.values())).await,
        UserCommand::Update { id, fields } => {
            apply(users, loaded, Op::Update(id, fields.values())).await
        }
        UserCommand::Delete { id } => apply(users, loaded, Op::Delete(id)).await,
    }
}

fn show_table<K: EntityKind>(controller: &Controller<K>) {
    render::table(K::columns(), &controller.rows(), MAX_CELL);
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging();

    let transport = if cli.demo {
        Transport::Memory
    } else {
        Transport::Http {
            base_url: cli.server.clone(),
            token: cli.token.clone(),
        }
    };

    println!("🔌 Connecting to: {}", transport);

    let confirm = Arc::new(PromptConfirm {
        assume_yes: cli.yes,
    });
    let mut dashboard = Dashboard::connect(&transport, confirm);

    let outcome = match cli.command {
        Commands::Posts(command) => run_posts(&mut dashboard, command).await?,
        Commands::Users(command) => run_users(&mut dashboard, command).await?,
    };

    if outcome == Outcome::Cancelled {
        println!("↩️ Cancelled");
    }

    render::banners(dashboard.active_banners());
    render::cards(&dashboard.active_summary());
    match dashboard.entity_type() {
        EntityType::Post => show_table(dashboard.posts()),
        EntityType::User => show_table(dashboard.users()),
    }

    if outcome.is_failure() {
        std::process::exit(1);
    }

    Ok(())
}
