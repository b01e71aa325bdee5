//! cmdkit CLI binary
//!
//! All logic is in the library; main.rs only invokes cli::run().

fn main() {
    // cli::run() handles all output including errors
    let code = cmdkit::cli::run();
    if code != 0 {
        std::process::exit(code);
    }
}
