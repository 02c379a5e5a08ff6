//! Authorization-code echo listener.
//!
//! A tiny HTTP endpoint on a fixed port. Google redirects the browser here
//! after consent; the handler lifts the `code` query parameter out of the
//! request line and prints it so the user can paste it at the terminal
//! prompt. The thread runs for the life of the process and is never joined.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use tracing::{debug, warn};

use crate::error::{GoogleError, GoogleResult};

const RESPONSE_PAGE: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n\
    <html><body><p>You can close this window and return to the terminal.</p></body></html>";

/// Binds the listener and spawns its serving thread.
///
/// Returns once the socket is bound; requests are handled in the
/// background from then on.
///
/// # Errors
///
/// Fails when the port cannot be bound (typically because another instance
/// is already running).
pub fn spawn(port: u16) -> GoogleResult<()> {
    let listener = TcpListener::bind(("127.0.0.1", port)).map_err(|e| {
        GoogleError::Configuration(format!(
            "unable to bind authorization listener on port {}: {}",
            port, e
        ))
    })?;
    debug!("authorization listener bound on port {}", port);

    thread::spawn(move || {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => handle(stream),
                Err(e) => warn!("authorization listener accept failed: {}", e),
            }
        }
    });

    Ok(())
}

/// Answers one request, echoing the authorization code if present.
fn handle(mut stream: TcpStream) {
    let mut request_line = String::new();
    {
        let mut reader = BufReader::new(&stream);
        if reader.read_line(&mut request_line).is_err() {
            return;
        }
    }

    if let Some(code) = code_from_request_line(&request_line) {
        println!("Copy/paste this code at the prompt and press enter: {}", code);
    }

    let _ = stream.write_all(RESPONSE_PAGE.as_bytes());
    let _ = stream.flush();
}

/// Extracts the `code` query parameter from an HTTP request line
/// (`GET /?code=...&scope=... HTTP/1.1`).
fn code_from_request_line(line: &str) -> Option<String> {
    let path = line.split_whitespace().nth(1)?;
    let query = path.split_once('?')?.1;

    for param in query.split('&') {
        if let Some((key, value)) = param.split_once('=')
            && key == "code"
            && !value.is_empty()
        {
            return urlencoding::decode(value).ok().map(|v| v.into_owned());
        }
    }
    None
}
