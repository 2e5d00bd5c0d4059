//! Line-by-line command session

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use crate::handler::CommandHandler;
use crate::reply::Reply;

/// Feed every line of `input` to the handler and write each reply
///
/// Bad lines, including lines that are not valid UTF-8, produce an error
/// reply and the session carries on; only I/O failures end it early.
///
/// # Returns
/// * Number of commands that produced a reply
pub fn run<R: BufRead, W: Write>(
    handler: &CommandHandler,
    mut input: R,
    output: &mut W,
) -> io::Result<usize> {
    let mut replies = 0;
    let mut lineno = 0usize;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lineno += 1;

        let reply = match std::str::from_utf8(&buf) {
            Ok(line) => handler.handle_line(line),
            Err(_) => {
                warn!(line = lineno, "invalid UTF-8 in command line");
                Some(Reply::Error("invalid UTF-8 in command line".to_string()))
            }
        };

        if let Some(reply) = reply {
            debug!(line = lineno, "replied");
            writeln!(output, "{}", reply)?;
            replies += 1;
        }
    }

    output.flush()?;
    info!(replies, "session finished");
    Ok(replies)
}
