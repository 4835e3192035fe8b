use std::fmt;
use std::io;
use std::mem;
use std::net::{Ipv4Addr, TcpListener, TcpStream};
use std::os::unix::io::FromRawFd;
use libc;

pub const LISTEN_ALL: &'static str = "0.0.0.0";
pub const LOOPBACK: &'static str = "127.0.0.1";

const BACKLOG: libc::c_int = 5;

#[derive(Debug)]
pub enum InitError {
    Socket(io::Error),
    Bind(io::Error),
    Listen(io::Error)
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InitError::Socket(ref e) => write!(f, "socket() error! Socket creation failed:{}", e),
            InitError::Bind(ref e) => write!(f, "bind() error! Socket bind failed:{}", e),
            InitError::Listen(ref e) => write!(f, "listen() error! Listen failed:{}", e)
        }
    }
}

#[derive(Debug)]
pub struct AcceptError(pub io::Error);

impl fmt::Display for AcceptError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "accept() error! Server accept failed:{}", self.0)
    }
}

/// Creates the listening socket by hand so the backlog stays at 5 and a
/// failure reports which of socket/bind/listen refused. The fd is adopted
/// as a std listener once it is passive.
pub fn init_listener(address: Ipv4Addr, port: u16) -> Result<TcpListener, InitError> {
    unsafe {
        let sock_fd = libc::socket(libc::AF_INET, libc::SOCK_STREAM, 0);
        if sock_fd < 0 {
            return Err(InitError::Socket(io::Error::last_os_error()));
        }

        let mut server: libc::sockaddr_in = mem::zeroed();
        server.sin_family = libc::AF_INET as libc::sa_family_t;
        server.sin_addr.s_addr = u32::from(address).to_be();
        server.sin_port = port.to_be();

        let addr_ptr = &server as *const libc::sockaddr_in as *const libc::sockaddr;
        let addr_len = mem::size_of::<libc::sockaddr_in>() as libc::socklen_t;
        if libc::bind(sock_fd, addr_ptr, addr_len) != 0 {
            let cause = io::Error::last_os_error();
            libc::close(sock_fd);
            return Err(InitError::Bind(cause));
        }

        if libc::listen(sock_fd, BACKLOG) != 0 {
            let cause = io::Error::last_os_error();
            libc::close(sock_fd);
            return Err(InitError::Listen(cause));
        }

        Ok(TcpListener::from_raw_fd(sock_fd))
    }
}

pub fn accept_client(listener: &TcpListener) -> Result<TcpStream, AcceptError> {
    match listener.accept() {
        Ok((stream, _)) => Ok(stream),
        Err(e) => Err(AcceptError(e))
    }
}

#[cfg(test)]
mod tests {
    use super::{init_listener, accept_client, InitError};
    use std::net::{Ipv4Addr, TcpStream};
    use std::thread::spawn;

    fn loopback() -> Ipv4Addr {
        Ipv4Addr::new(127, 0, 0, 1)
    }

    #[test]
    fn binds_an_ephemeral_port() {
        let listener = init_listener(loopback(), 0).unwrap();

        let addr = listener.local_addr().unwrap();
        assert!(addr.port() != 0);
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
    }

    #[test]
    fn reports_bind_failure_on_port_in_use() {
        let first = init_listener(loopback(), 0).unwrap();
        let port = first.local_addr().unwrap().port();

        match init_listener(loopback(), port) {
            Err(InitError::Bind(_)) => {},
            Err(e) => panic!("Expected a bind error, got {:?}", e),
            Ok(_) => panic!("Expected a bind error, got a listener")
        }
    }

    #[test]
    fn accepts_a_client() {
        let listener = init_listener(loopback(), 0).unwrap();
        let port = listener.local_addr().unwrap().port();

        let client = spawn(move || TcpStream::connect(("127.0.0.1", port)).unwrap());

        assert!(accept_client(&listener).is_ok());
        client.join().unwrap();
    }
}
