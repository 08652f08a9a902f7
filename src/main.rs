fn main() {
    env_logger::init();
    if let Err(err) = skills_radar::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
