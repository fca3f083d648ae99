use pageqa::session;

fn main() {
    // A missing .env file is fine; settings may come from the environment
    let _ = dotenvy::dotenv();

    if let Err(e) = session::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
