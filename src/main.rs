use mazeseek::{app::App, config::Config};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

fn main() -> std::io::Result<()> {
    let (config, problems) = Config::from_env();

    // The terminal is taken over by the app, so logs go to a file
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("mazeseek")
        .filename_suffix("log")
        .build(&config.log_dir)
        .map_err(std::io::Error::other)?;
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(config.log_level)
        .init();

    for problem in &problems {
        tracing::warn!("[config] {}", problem);
    }
    tracing::info!("Starting mazeseek with {:?}", config);

    let app = App::new(&config);
    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout);
    App::restore_terminal(&mut stdout)?;

    if let Err(e) = &result {
        tracing::error!("App exited with error: {}", e);
    }
    result
}
