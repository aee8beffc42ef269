fn main() {
    if let Err(err) = logsplit::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
