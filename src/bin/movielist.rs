use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use movielist::client::{
    render_movie_list, ClientConfig, ClientError, ClientState, FileTokenStore, MovieClient,
    Notice,
};

/// Keep a list of favorite movies.
#[derive(Parser)]
#[command(name = "movielist", version)]
struct Cli {
    /// Auth service base URL
    #[arg(long, env = "AUTH_URL", default_value = "http://localhost:8080")]
    auth_url: String,

    /// Movie service base URL (defaults to the auth URL)
    #[arg(long, env = "MOVIES_URL")]
    movies_url: Option<String>,

    /// Where the session token is kept
    #[arg(long, env = "MOVIELIST_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Register {
        email: String,
        #[arg(long, env = "MOVIELIST_PASSWORD")]
        password: String,
    },
    Login {
        email: String,
        #[arg(long, env = "MOVIELIST_PASSWORD")]
        password: String,
    },
    Logout,
    /// Show your movies
    List,
    /// Add a movie and show the updated list
    Add {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Print whether a session token is stored
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", Notice::from(&e));
            if e.requires_login() {
                eprintln!("Run `movielist login <email>` to sign in.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let movies_url = cli.movies_url.unwrap_or_else(|| cli.auth_url.clone());
    let store = FileTokenStore::new(cli.token_file.unwrap_or_else(FileTokenStore::default_path));
    let client = MovieClient::new(ClientConfig::new(cli.auth_url, movies_url), Arc::new(store))?;

    match cli.command {
        Command::Register { email, password } => {
            println!("{}", client.register(&email, &password).await?);
        }
        Command::Login { email, password } => {
            println!("{}", client.login(&email, &password).await?);
            print_list(&client.fetch_movies().await?);
        }
        Command::Logout => println!("{}", client.logout()?),
        Command::List => print_list(&client.fetch_movies().await?),
        Command::Add { name } => {
            let movies = client.add_movie(&name.join(" ")).await?;
            println!("Movie added successfully!");
            print_list(&movies);
        }
        Command::Status => match client.state()? {
            ClientState::Authenticated => println!("Logged in."),
            ClientState::Unauthenticated => println!("Not logged in."),
        },
    }
    Ok(())
}

fn print_list(movies: &[movielist::client::MovieEntry]) {
    for line in render_movie_list(movies) {
        println!("  {line}");
    }
}
