use einesteine::{build_app, cli, config::Config, db};
use tokio::net::TcpListener;

const USAGE: &str = "usage:
  einesteine                                          serve HTTP
  einesteine create-user <username> <email> <password>
  einesteine import <file.json> <username>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let pool = db::init_pool(&config.database_url).await?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] | ["serve"] => {}
        ["create-user", username, email, password] => {
            return cli::create_user(&pool, username, email, password).await;
        }
        ["import", file, username] => {
            return cli::import_data(&pool, file, username).await;
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    let app = build_app(pool, config.secure_cookies).await?;
    let listener = TcpListener::bind(config.bind_addr).await?;

    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
