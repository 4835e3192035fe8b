use std::net::Ipv4Addr;
use std::thread::{spawn, JoinHandle};
use server::listener::{init_listener, InitError};

extern crate bufstream;
extern crate chrono;
extern crate libc;

pub mod server;

pub struct ServerHandle {
    pub ip: String, pub port: u16, pub handle: JoinHandle<()>
}

/// Binds and starts serving on a background thread. Port 0 asks the OS
/// for an ephemeral port; the handle reports the address actually bound.
pub fn start_server(address: Ipv4Addr, port: u16) -> Result<ServerHandle, InitError> {
    let listener = init_listener(address, port)?;

    let (ip, bind_port) = match listener.local_addr() {
        Ok(addr) => (addr.ip().to_string(), addr.port()),
        Err(_) => (address.to_string(), port)
    };
    println!("binding to:{}:{}", ip, bind_port);

    let handle = spawn(move || server::serve(listener));
    Ok(ServerHandle { ip, port: bind_port, handle })
}
