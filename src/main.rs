use std::net::Ipv4Addr;
use std::process::exit;
use clap::{Arg, App};
use rust_http10_server::server;
use rust_http10_server::server::listener::{LISTEN_ALL, LOOPBACK};

extern crate clap;
extern crate rust_http10_server;

fn main() {
    let matches = App::new("rust_http10_server")
        .version("1.0")
        .about("A minimal HTTP/1.0 static file server")
        .arg(Arg::with_name("address")
            .short("a")
            .value_name("BIND_ADDRESS")
            .possible_values(&[LISTEN_ALL, LOOPBACK])
            .default_value(LISTEN_ALL)
            .takes_value(true))
        .arg(Arg::with_name("port")
            .required(true)
            .value_name("LISTENING_PORT"))
        .get_matches();

    let address_arg = matches.value_of("address").unwrap();
    let port_arg = matches.value_of("port").unwrap();

    let address: Ipv4Addr = match address_arg.parse() {
        Ok(address) => address,
        Err(e) => {
            eprintln!("Invalid bind address {}:{}", address_arg, e);
            exit(1);
        }
    };
    let port: u16 = match port_arg.parse() {
        Ok(port) => port,
        Err(e) => {
            eprintln!("Invalid port {}:{}", port_arg, e);
            exit(1);
        }
    };

    match server::listener::init_listener(address, port) {
        Ok(listener) => {
            println!("Listening on: {}:{}", address_arg, port);
            server::serve(listener);
        },
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    }
}
