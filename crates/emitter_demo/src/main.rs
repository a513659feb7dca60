use tracing::error;

fn main() {
    if let Err(e) = lib_emitter_demo::init() {
        error!("❌ Application error: {e}");
        std::process::exit(1);
    }
}
