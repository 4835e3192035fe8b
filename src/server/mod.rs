use std::net::TcpListener;
use std::thread::spawn;
use chrono::Utc;
use self::handlers::handle_client;
use self::listener::accept_client;

/// Accepts connections forever. A failed accept is logged and tolerated;
/// the loop never gives up on its own, the process dies only by signal.
pub fn serve(listener: TcpListener) {
    loop {
        match accept_client(&listener) {
            Ok(stream) => {
                println!("{} Incoming connection!", Utc::now().to_rfc2822());
                // the stream moves into the worker; this loop keeps no
                // handle to it
                spawn(move || handle_client(stream));
            },
            Err(e) => eprintln!("{} {}", Utc::now().to_rfc2822(), e)
        }
    }
}

pub mod listener;
mod http;
mod file_system;
mod response;
mod handlers;
