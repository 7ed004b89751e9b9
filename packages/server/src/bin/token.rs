//! Mint a bearer token for local testing.
//!
//! Run with:
//! ```not_rust
//! ROLLCALL_JWT_SECRET=secret cargo run --bin rollcall-token -- --user-id t1 --role teacher
//! ```

use std::time::Duration;

use clap::Parser;
use rollcall_server::{
    domain::{Identity, Role, UserId},
    infrastructure::auth::{DEFAULT_TOKEN_TTL, JwtTokenVerifier},
};

#[derive(Debug, Parser)]
#[command(name = "rollcall-token", version, about = "Issue a token for the attendance server")]
struct Args {
    #[arg(long)]
    user_id: String,

    /// `teacher` or `student`
    #[arg(long)]
    role: String,

    #[arg(long, env = "ROLLCALL_JWT_SECRET", hide_env_values = true)]
    secret: String,

    /// Token lifetime in seconds
    #[arg(long, default_value_t = DEFAULT_TOKEN_TTL.as_secs())]
    ttl_secs: u64,
}

fn main() {
    let args = Args::parse();

    let identity = match (UserId::new(args.user_id), Role::try_from(args.role.as_str())) {
        (Ok(user_id), Ok(role)) => Identity::new(user_id, role),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("invalid identity: {e}");
            std::process::exit(2);
        }
    };

    match JwtTokenVerifier::new(&args.secret).issue(&identity, Duration::from_secs(args.ttl_secs)) {
        Ok(token) => println!("{token}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
