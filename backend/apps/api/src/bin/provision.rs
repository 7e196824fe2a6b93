//! Employee credential provisioning
//!
//! Reads a password from stdin and prints the `EMPLOYEE_*` lines for `.env`.
//!
//! ```text
//! printf '%s' "$PASSWORD" | cargo run -p api --bin provision -- memorialtransportation
//! ```

use std::env;
use std::io::{self, BufRead};

use anyhow::{Context, bail};
use platform::password::{ClearTextPassword, DEFAULT_ITERATIONS, HashedPassword};

const DEFAULT_USERNAME: &str = "memorialtransportation";

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let username = env::args()
        .nth(1)
        .or_else(|| env::var("EMPLOYEE_USERNAME").ok())
        .unwrap_or_else(|| DEFAULT_USERNAME.to_string());

    let iterations = match env::var("EMPLOYEE_PBKDF2_ITERATIONS") {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid EMPLOYEE_PBKDF2_ITERATIONS: {raw:?}"))?,
        Err(_) => DEFAULT_ITERATIONS,
    };

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    let len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(len);

    if line.is_empty() {
        bail!("empty password");
    }

    let password = ClearTextPassword::new(line);
    let hashed = HashedPassword::generate(&password, iterations)?;

    println!("EMPLOYEE_USERNAME={username}");
    println!("EMPLOYEE_SALT_B64={}", hashed.salt_base64());
    println!("EMPLOYEE_HASH_B64={}", hashed.hash_base64());
    println!("EMPLOYEE_PBKDF2_ITERATIONS={}", hashed.iterations());

    Ok(())
}
