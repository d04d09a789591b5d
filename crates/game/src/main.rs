use tracing::error;

mod app;

fn main() {
    if let Err(err) = app::run() {
        error!(error = %err, "startup_failed");
        std::process::exit(1);
    }
}
