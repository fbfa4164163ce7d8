use clap::Parser;
use projchat::app::Application;
use projchat::cli::Args;
use projchat::config::Config;
use projchat::display;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            display::display_error(&e);
            std::process::exit(1);
        }
    };

    let mut app = match Application::new(args, config) {
        Ok(app) => app,
        Err(e) => {
            display::display_error(&e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run().await {
        display::display_error(&e);
        std::process::exit(1);
    }
}
