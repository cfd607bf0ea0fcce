//! Line input for the monitor
//!
//! [`LineSource`] is what the shell loop reads from. [`LineEditor`] is the
//! byte-at-a-time editor behind the serial source; it echoes through the
//! console and supports backspace and Ctrl+C.

use crate::console::Console;
use alloc::string::String;
use kmon_shared::constants::monitor::CMDBUF_SIZE;

/// Source of command lines
pub trait LineSource {
    /// Print `prompt` and read one line.
    ///
    /// `None` is a null read: the line was abandoned or nothing was read.
    fn read_line(&mut self, prompt: &str, console: &mut dyn Console) -> Option<String>;
}

/// Outcome of feeding one byte to the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Line still being typed
    Pending,
    /// Enter pressed
    Line(String),
    /// Ctrl+C pressed; the buffer was discarded
    Cancelled,
}

/// Line buffer with terminal echo
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: String,
}

impl LineEditor {
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(CMDBUF_SIZE),
        }
    }

    /// Bytes typed so far on the current line.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Handle one input byte:
    /// - printable ASCII: appended and echoed while the line has room
    /// - backspace / DEL: drop the last character
    /// - CR / LF: finish the line
    /// - Ctrl+C: abandon the line
    ///
    /// Other control bytes are ignored.
    pub fn feed(&mut self, byte: u8, echo: &mut dyn Console) -> Edit {
        match byte {
            b'\r' | b'\n' => {
                echo.write_bytes(b"\n");
                Edit::Line(core::mem::take(&mut self.buffer))
            }
            0x08 | 0x7F => {
                if self.buffer.pop().is_some() {
                    echo.write_bytes(b"\x08 \x08");
                }
                Edit::Pending
            }
            0x03 => {
                self.buffer.clear();
                echo.write_bytes(b"^C\n");
                Edit::Cancelled
            }
            0x20..=0x7E => {
                // One byte of the command buffer is reserved for the terminator
                if self.buffer.len() < CMDBUF_SIZE - 1 {
                    self.buffer.push(byte as char);
                    echo.write_bytes(&[byte]);
                }
                Edit::Pending
            }
            _ => Edit::Pending,
        }
    }
}

/// Reads lines from a polled 16550 UART
#[cfg(target_arch = "x86_64")]
pub struct SerialLineSource {
    port: crate::serial::SerialPort,
    editor: LineEditor,
}

#[cfg(target_arch = "x86_64")]
impl SerialLineSource {
    /// Line source on COM1. The port must already be programmed.
    pub fn com1() -> Self {
        Self {
            port: crate::serial::SerialPort::com1(),
            editor: LineEditor::new(),
        }
    }
}

#[cfg(target_arch = "x86_64")]
impl LineSource for SerialLineSource {
    fn read_line(&mut self, prompt: &str, console: &mut dyn Console) -> Option<String> {
        console.write_str(prompt);
        loop {
            let Some(byte) = self.port.try_read_byte() else {
                core::hint::spin_loop();
                continue;
            };
            match self.editor.feed(byte, console) {
                Edit::Pending => {}
                Edit::Line(line) => return Some(line),
                Edit::Cancelled => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::BufferConsole;

    fn feed_all(editor: &mut LineEditor, echo: &mut BufferConsole, bytes: &[u8]) -> Edit {
        let mut last = Edit::Pending;
        for &b in bytes {
            last = editor.feed(b, echo);
        }
        last
    }

    #[test]
    fn echoes_and_completes_a_line() {
        let mut editor = LineEditor::new();
        let mut echo = BufferConsole::new();
        let edit = feed_all(&mut editor, &mut echo, b"help\r");
        assert_eq!(edit, Edit::Line("help".into()));
        assert_eq!(echo.contents(), "help\n");
        assert_eq!(editor.pending(), "");
    }

    #[test]
    fn backspace_erases_the_last_character() {
        let mut editor = LineEditor::new();
        let mut echo = BufferConsole::new();
        feed_all(&mut editor, &mut echo, b"helpp\x7f");
        assert_eq!(editor.pending(), "help");
        assert_eq!(echo.contents(), "helpp\x08 \x08");

        // Nothing to erase: no echo
        let mut empty = LineEditor::new();
        let mut quiet = BufferConsole::new();
        assert_eq!(empty.feed(0x08, &mut quiet), Edit::Pending);
        assert!(quiet.as_bytes().is_empty());
    }

    #[test]
    fn ctrl_c_abandons_the_line() {
        let mut editor = LineEditor::new();
        let mut echo = BufferConsole::new();
        assert_eq!(feed_all(&mut editor, &mut echo, b"kern\x03"), Edit::Cancelled);
        assert_eq!(editor.pending(), "");
        assert!(echo.contents().ends_with("^C\n"));
    }

    #[test]
    fn overlong_input_is_dropped() {
        let mut editor = LineEditor::new();
        let mut echo = BufferConsole::new();
        feed_all(&mut editor, &mut echo, &[b'a'; CMDBUF_SIZE + 10]);
        assert_eq!(editor.pending().len(), CMDBUF_SIZE - 1);
        assert_eq!(echo.as_bytes().len(), CMDBUF_SIZE - 1);
    }

    #[test]
    fn other_control_bytes_are_ignored() {
        let mut editor = LineEditor::new();
        let mut echo = BufferConsole::new();
        feed_all(&mut editor, &mut echo, b"a\x1b\x00\tb");
        assert_eq!(editor.pending(), "ab");
    }
}
