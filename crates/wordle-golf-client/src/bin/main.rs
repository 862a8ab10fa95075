fn main() {
    if let Err(e) = wordle_golf_client::app::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
