fn main() {
    if let Err(error) = lazy_singleton::run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
