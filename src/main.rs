use anyhow::Result;
use clap::{Parser, Subcommand};

use adminsync::api::{ApiClient, Post, PostCreate, User, UserCreate};
use adminsync::config::Config;
use adminsync::stats;
use adminsync::store::{PostPatch, Store};

/// Operator console for the users/posts record service.
#[derive(Parser)]
#[command(name = "adminsync", version, about)]
struct Cli {
    /// Override the configured service base URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether the service is reachable.
    Ping,
    /// Print aggregate statistics across users and posts.
    Stats,
    /// Manage user records.
    Users {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// Manage post records.
    Posts {
        #[command(subcommand)]
        command: PostCommand,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// List all users.
    List,
    /// Show a single user.
    Show { id: String },
    /// List a user's posts.
    Posts { id: String },
    /// Create a user.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        age: i64,
    },
    /// Update a user (full field set).
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        age: i64,
    },
    /// Delete a user and, server-side, all their posts.
    Delete { id: String },
}

#[derive(Subcommand)]
enum PostCommand {
    /// List all posts.
    List,
    /// Create a post for an existing user.
    Create {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Update a post's title and content.
    Update {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Delete a post.
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    adminsync::init_tracing();

    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }
    let client = ApiClient::new(&config);

    match cli.command {
        Command::Ping => {
            if client.ping().await {
                println!("service at {} is reachable", client.base_url());
            } else {
                println!("service at {} is not reachable", client.base_url());
                std::process::exit(1);
            }
        }
        Command::Stats => run_stats(&client).await?,
        Command::Users { command } => run_users(&client, command).await?,
        Command::Posts { command } => run_posts(&client, command).await?,
    }

    Ok(())
}

async fn run_stats(client: &ApiClient) -> Result<()> {
    let users: Store<User> = Store::new(client.clone());
    let posts: Store<Post> = Store::new(client.clone());
    users.refresh().await?;
    posts.refresh().await?;

    let user_snapshot = users.snapshot();
    let post_snapshot = posts.snapshot();

    println!("total users:    {}", stats::count_of(&user_snapshot));
    println!("total posts:    {}", stats::count_of(&post_snapshot));
    println!(
        "average age:    {:.1}",
        stats::average_of(&user_snapshot, |u| u.age as f64)
    );
    println!(
        "posts per user: {:.1}",
        stats::ratio_of(&post_snapshot, &user_snapshot)
    );

    let recent = stats::most_recent(&post_snapshot, 5);
    if !recent.is_empty() {
        println!("recent posts:");
        for post in recent {
            let author = stats::resolve_user_name(&user_snapshot, &post.user_id);
            println!("  {}  {}  by {}", post.created_at, post.title, author);
        }
    }

    Ok(())
}

async fn run_users(client: &ApiClient, command: UserCommand) -> Result<()> {
    let store: Store<User> = Store::new(client.clone());

    match command {
        UserCommand::List => {
            store.refresh().await?;
            for user in store.snapshot() {
                println!("{}  {}  {}  age {}", user.id, user.name, user.email, user.age);
            }
        }
        UserCommand::Show { id } => {
            let user = client.get_user(&id).await?;
            println!("{}  {}  {}  age {}", user.id, user.name, user.email, user.age);
            println!("created at {}", user.created_at);
        }
        UserCommand::Posts { id } => {
            for post in client.user_posts(&id).await? {
                println!("{}  {}  {}", post.id, post.created_at, post.title);
            }
        }
        UserCommand::Create { name, email, age } => {
            let user = store.create(&UserCreate { name, email, age }).await?;
            println!("created user {}", user.id);
        }
        UserCommand::Update {
            id,
            name,
            email,
            age,
        } => {
            let user = store.update(&id, &UserCreate { name, email, age }).await?;
            println!("updated user {}", user.id);
        }
        UserCommand::Delete { id } => {
            store.delete(&id).await?;
            // The server cascades to the user's posts; a fresh post snapshot
            // shows what survived.
            let posts: Store<Post> = Store::new(client.clone());
            posts.refresh().await?;
            println!("deleted user {}; {} posts remain", id, posts.len());
        }
    }

    Ok(())
}

async fn run_posts(client: &ApiClient, command: PostCommand) -> Result<()> {
    let store: Store<Post> = Store::new(client.clone());

    match command {
        PostCommand::List => {
            store.refresh().await?;
            for post in store.snapshot() {
                println!(
                    "{}  {}  {}  by {}",
                    post.id, post.created_at, post.title, post.user_id
                );
            }
        }
        PostCommand::Create {
            user_id,
            title,
            content,
        } => {
            let post = store
                .create(&PostCreate {
                    user_id,
                    title,
                    content,
                })
                .await?;
            println!("created post {}", post.id);
        }
        PostCommand::Update { id, title, content } => {
            let post = store.update(&id, &PostPatch { title, content }).await?;
            println!("updated post {}", post.id);
        }
        PostCommand::Delete { id } => {
            store.delete(&id).await?;
            println!("deleted post {}", id);
        }
    }

    Ok(())
}
